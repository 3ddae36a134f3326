use odonto_core::access::Capability;
use odonto_core::appointment::Appointment;
use odonto_core::client::Client;
use odonto_core::professional::Professional;
use odonto_core::resource::ResourceGateway;
use odonto_core::treatment::Treatment;
use odonto_core::user::User;
use std::sync::Arc;

use super::ListController;
use crate::session::SessionManager;

pub type ClientController = ListController<Client>;
pub type TreatmentController = ListController<Treatment>;
pub type AppointmentController = ListController<Appointment>;
pub type ProfessionalController = ListController<Professional>;
pub type UserController = ListController<User>;

pub fn client_controller(
    gateway: Arc<dyn ResourceGateway<Client>>,
    session: Arc<SessionManager>,
) -> ClientController {
    ListController::new(gateway, session)
        .with_capabilities(Capability::ViewClients, Capability::ManageClients)
}

pub fn treatment_controller(
    gateway: Arc<dyn ResourceGateway<Treatment>>,
    session: Arc<SessionManager>,
) -> TreatmentController {
    ListController::new(gateway, session)
        .with_capabilities(Capability::ViewTreatments, Capability::ManageTreatments)
}

pub fn appointment_controller(
    gateway: Arc<dyn ResourceGateway<Appointment>>,
    session: Arc<SessionManager>,
) -> AppointmentController {
    ListController::new(gateway, session)
        .with_capabilities(Capability::ViewAppointments, Capability::ManageAppointments)
}

pub fn professional_controller(
    gateway: Arc<dyn ResourceGateway<Professional>>,
    session: Arc<SessionManager>,
) -> ProfessionalController {
    ListController::new(gateway, session)
        .with_capabilities(Capability::ViewProfessionals, Capability::ManageProfessionals)
}

/// Listing and managing accounts are both admin-only.
pub fn user_controller(
    gateway: Arc<dyn ResourceGateway<User>>,
    session: Arc<SessionManager>,
) -> UserController {
    ListController::new(gateway, session)
        .with_capabilities(Capability::ManageUsers, Capability::ManageUsers)
}
