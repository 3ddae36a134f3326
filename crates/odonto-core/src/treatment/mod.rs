//! Treatment domain module.

mod model;

// Re-export public API
pub use model::{Treatment, TreatmentInput};
