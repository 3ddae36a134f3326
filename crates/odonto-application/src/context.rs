//! The application context built at the composition root.

use odonto_core::Result;
use odonto_core::appointment::Appointment;
use odonto_core::client::Client;
use odonto_core::professional::Professional;
use odonto_core::resource::ResourceGateway;
use odonto_core::session::{AuthGateway, SessionState, SessionStore};
use odonto_core::statistics::StatisticsGateway;
use odonto_core::summary::Summarizer;
use odonto_core::treatment::Treatment;
use odonto_core::user::User;
use std::sync::Arc;

use crate::client_detail::ClientDetailService;
use crate::controller::{
    AppointmentController, ClientController, ProfessionalController, TreatmentController,
    UserDirectory, appointment_controller, client_controller, professional_controller,
    treatment_controller, user_controller,
};
use crate::dashboard::DashboardService;
use crate::history_summary::HistorySummaryService;
use crate::session::SessionManager;

/// The ports an [`AppContext`] is assembled from.
pub struct AppDependencies {
    pub store: Arc<dyn SessionStore>,
    pub auth: Arc<dyn AuthGateway>,
    pub clients: Arc<dyn ResourceGateway<Client>>,
    pub treatments: Arc<dyn ResourceGateway<Treatment>>,
    pub appointments: Arc<dyn ResourceGateway<Appointment>>,
    pub professionals: Arc<dyn ResourceGateway<Professional>>,
    pub users: Arc<dyn ResourceGateway<User>>,
    pub statistics: Arc<dyn StatisticsGateway>,
    pub summarizer: Arc<dyn Summarizer>,
    /// Accounts the user directory refuses to delete
    pub protected_emails: Vec<String>,
}

/// Session manager, controllers and use cases sharing one session.
///
/// Lifecycle: [`AppContext::init`] restores the persisted session,
/// [`AppContext::teardown`] ends it.
pub struct AppContext {
    pub session: Arc<SessionManager>,
    pub clients: Arc<ClientController>,
    pub treatments: Arc<TreatmentController>,
    pub appointments: Arc<AppointmentController>,
    pub professionals: Arc<ProfessionalController>,
    pub users: UserDirectory,
    pub client_detail: ClientDetailService,
    pub summaries: HistorySummaryService,
    pub dashboard: DashboardService,
}

impl AppContext {
    /// Wires the context without touching storage or the backend.
    pub fn new(deps: AppDependencies) -> Self {
        let session = Arc::new(SessionManager::new(deps.store, deps.auth));

        let clients = Arc::new(client_controller(deps.clients, session.clone()));
        let treatments = Arc::new(treatment_controller(deps.treatments, session.clone()));
        let appointments = Arc::new(appointment_controller(deps.appointments, session.clone()));
        let professionals = Arc::new(professional_controller(deps.professionals, session.clone()));
        let users = UserDirectory::new(
            Arc::new(user_controller(deps.users, session.clone())),
            deps.protected_emails,
        );

        let client_detail = ClientDetailService::new(clients.clone(), appointments.clone());
        let summaries = HistorySummaryService::new(session.clone(), deps.summarizer);
        let dashboard = DashboardService::new(session.clone(), deps.statistics);

        Self {
            session,
            clients,
            treatments,
            appointments,
            professionals,
            users,
            client_detail,
            summaries,
            dashboard,
        }
    }

    /// Wires the context and restores the persisted session.
    pub async fn init(deps: AppDependencies) -> (Self, SessionState) {
        let context = Self::new(deps);
        let state = context.session.restore_session().await;
        (context, state)
    }

    /// Ends the session and clears its durable storage.
    pub async fn teardown(&self) -> Result<()> {
        self.session.logout().await
    }
}
