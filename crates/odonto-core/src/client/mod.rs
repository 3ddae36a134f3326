//! Client (patient) domain module.

mod model;

// Re-export public API
pub use model::{Client, ClientInput, TreatmentRecord};
