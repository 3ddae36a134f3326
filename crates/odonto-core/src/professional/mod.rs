//! Professional domain module.

mod model;

// Re-export public API
pub use model::{AvailabilitySlot, Professional, ProfessionalInput};
