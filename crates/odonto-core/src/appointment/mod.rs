//! Appointment (consultation) domain module.
//!
//! # Module Structure
//!
//! - `model`: `Appointment`, `AppointmentStatus`, and the view tabs

mod model;

// Re-export public API
pub use model::{Appointment, AppointmentInput, AppointmentStatus, AppointmentTab};
