//! List-resource controllers.
//!
//! # Module Structure
//!
//! - `list_controller`: the generic `ListController<R>` shared by every
//!   collection view
//! - `resources`: per-resource constructors with their capability gates
//! - `appointments`: tab partitioning of the appointment list
//! - `users`: the user directory with its delete guards
//! - `busy`: the per-controller in-flight flag

mod appointments;
mod busy;
mod list_controller;
mod resources;
mod users;

pub use list_controller::{ListController, Settled};
pub use resources::{
    AppointmentController, ClientController, ProfessionalController, TreatmentController,
    UserController, appointment_controller, client_controller, professional_controller,
    treatment_controller, user_controller,
};
pub use users::UserDirectory;
