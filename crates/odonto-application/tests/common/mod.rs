//! In-memory backend doubles shared by the scenario tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use odonto_application::{AppContext, AppDependencies};
use odonto_core::appointment::{Appointment, AppointmentInput, AppointmentStatus};
use odonto_core::client::{Client, ClientInput};
use odonto_core::professional::{Professional, ProfessionalInput};
use odonto_core::resource::{Resource, ResourceGateway};
use odonto_core::session::{AuthGateway, Credentials, LoginResponse, Registration};
use odonto_core::statistics::{Statistics, StatisticsGateway};
use odonto_core::treatment::{Treatment, TreatmentInput};
use odonto_core::user::{Role, User, UserInput, UserProfile};
use odonto_core::{OdontoError, Result};
use odonto_infrastructure::{CannedSummarizer, MemorySessionStore};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const PASSWORD: &str = "s3cret";

// ============================================================================
// Auth
// ============================================================================

#[derive(Default)]
pub struct FakeAuth {
    accounts: Mutex<HashMap<String, UserProfile>>,
    tokens: Mutex<HashMap<String, UserProfile>>,
    offline: Mutex<bool>,
    pub login_calls: AtomicUsize,
}

impl FakeAuth {
    pub fn with_account(self, id: &str, name: &str, email: &str, role: Role) -> Self {
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            UserProfile {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                role,
            },
        );
        self
    }

    /// Makes the backend forget every issued token.
    pub fn revoke_all(&self) {
        self.tokens.lock().unwrap().clear();
    }

    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    fn check_online(&self) -> Result<()> {
        if *self.offline.lock().unwrap() {
            Err(OdontoError::network("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AuthGateway for FakeAuth {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        let profile = self
            .accounts
            .lock()
            .unwrap()
            .get(&credentials.email)
            .cloned()
            .filter(|_| credentials.password == PASSWORD)
            .ok_or_else(|| OdontoError::authentication("invalid credentials"))?;

        let token = format!("token-{}-{}", profile.id, self.login_calls.load(Ordering::SeqCst));
        self.tokens
            .lock()
            .unwrap()
            .insert(token.clone(), profile.clone());
        Ok(LoginResponse {
            token,
            user: profile,
        })
    }

    async fn current_user(&self, token: &str) -> Result<UserProfile> {
        self.check_online()?;
        self.tokens
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(OdontoError::Unauthorized)
    }

    async fn register(&self, registration: &Registration) -> Result<UserProfile> {
        self.check_online()?;
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&registration.email) {
            return Err(OdontoError::conflict("email already registered"));
        }
        let profile = UserProfile {
            id: format!("u-{}", accounts.len() + 100),
            name: registration.name.clone(),
            email: registration.email.clone(),
            role: registration.role,
        };
        accounts.insert(registration.email.clone(), profile.clone());
        Ok(profile)
    }
}

// ============================================================================
// Resources
// ============================================================================

/// Builds the entity the fake backend stores for a create or update.
pub trait FakeEntity: Resource {
    fn from_input(id: String, input: &Self::Input) -> Self;
}

/// Pauses a gateway call until the test releases it.
#[derive(Clone, Default)]
pub struct Hold {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

pub struct FakeGateway<R: FakeEntity> {
    items: Mutex<Vec<R>>,
    next_error: Mutex<Option<OdontoError>>,
    referenced: Mutex<HashSet<String>>,
    hold: Mutex<Option<Hold>>,
    next_id: AtomicUsize,
    prefix: &'static str,
    pub list_calls: AtomicUsize,
    pub mutation_calls: AtomicUsize,
}

impl<R: FakeEntity> FakeGateway<R> {
    pub fn new(prefix: &'static str, items: Vec<R>) -> Self {
        Self {
            next_id: AtomicUsize::new(items.len() + 1),
            items: Mutex::new(items),
            next_error: Mutex::new(None),
            referenced: Mutex::new(HashSet::new()),
            hold: Mutex::new(None),
            prefix,
            list_calls: AtomicUsize::new(0),
            mutation_calls: AtomicUsize::new(0),
        }
    }

    /// The next call fails with `error`.
    pub fn fail_next(&self, error: OdontoError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    /// Deleting `id` is refused with a conflict.
    pub fn mark_referenced(&self, id: &str) {
        self.referenced.lock().unwrap().insert(id.to_string());
    }

    /// The next call waits until `Hold::release` is notified.
    pub fn hold_next(&self) -> Hold {
        let hold = Hold::default();
        *self.hold.lock().unwrap() = Some(hold.clone());
        hold
    }

    pub fn server_items(&self) -> Vec<R> {
        self.items.lock().unwrap().clone()
    }

    pub fn insert_server_side(&self, entity: R) {
        self.items.lock().unwrap().push(entity);
    }

    async fn enter(&self) -> Result<()> {
        let hold = self.hold.lock().unwrap().take();
        if let Some(hold) = hold {
            hold.entered.notify_one();
            hold.release.notified().await;
        }
        match self.next_error.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<R: FakeEntity> ResourceGateway<R> for FakeGateway<R> {
    async fn list(&self) -> Result<Vec<R>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn create(&self, input: &R::Input) -> Result<R> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        let id = format!("{}-{}", self.prefix, self.next_id.fetch_add(1, Ordering::SeqCst));
        let entity = R::from_input(id, input);
        self.items.lock().unwrap().push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: &str, input: &R::Input) -> Result<R> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        let mut items = self.items.lock().unwrap();
        let slot = items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| OdontoError::not_found(R::KIND, id))?;
        *slot = R::from_input(id.to_string(), input);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        if self.referenced.lock().unwrap().contains(id) {
            return Err(OdontoError::conflict(format!("{} is referenced", id)));
        }
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Err(OdontoError::not_found(R::KIND, id));
        }
        Ok(())
    }
}

impl FakeEntity for Client {
    fn from_input(id: String, input: &ClientInput) -> Self {
        Client {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            date_of_birth: input.date_of_birth,
            address: input.address.clone(),
            medical_history: input.medical_history.clone(),
            treatment_history: Vec::new(),
        }
    }
}

impl FakeEntity for Treatment {
    fn from_input(id: String, input: &TreatmentInput) -> Self {
        Treatment {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            duration: input.duration,
            price: input.price,
        }
    }
}

impl FakeEntity for Appointment {
    fn from_input(id: String, input: &AppointmentInput) -> Self {
        Appointment {
            id,
            client_id: input.client_id.clone(),
            client_name: Some(format!("Client {}", input.client_id)),
            professional_id: input.professional_id.clone(),
            professional_name: Some(format!("Professional {}", input.professional_id)),
            treatment_id: input.treatment_id.clone(),
            treatment_name: Some(format!("Treatment {}", input.treatment_id)),
            date: input.date,
            time: input.time,
            status: input.status,
            notes: input.notes.clone(),
        }
    }
}

impl FakeEntity for Professional {
    fn from_input(id: String, input: &ProfessionalInput) -> Self {
        Professional {
            id,
            name: input.name.clone(),
            specialty: input.specialty.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            availability: input.availability.clone(),
        }
    }
}

impl FakeEntity for User {
    fn from_input(id: String, input: &UserInput) -> Self {
        User {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            role: input.role,
        }
    }
}

#[derive(Default)]
pub struct FakeStatistics;

#[async_trait]
impl StatisticsGateway for FakeStatistics {
    async fn fetch(&self) -> Result<Statistics> {
        Ok(Statistics {
            scheduled_consultations: 3,
            total_clients: 2,
            total_treatments: 2,
            potential_revenue: 450.0,
            total_revenue: 120.0,
        })
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn client(id: &str, name: &str, email: &str, phone: &str) -> Client {
    Client {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        date_of_birth: None,
        address: None,
        medical_history: None,
        treatment_history: Vec::new(),
    }
}

pub fn treatment(id: &str, name: &str, description: &str) -> Treatment {
    Treatment {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        duration: 30,
        price: 150.0,
    }
}

pub fn appointment(id: &str, client_id: &str, date: &str, status: AppointmentStatus) -> Appointment {
    Appointment {
        id: id.to_string(),
        client_id: client_id.to_string(),
        client_name: Some(format!("Client {}", client_id)),
        professional_id: "p-1".to_string(),
        professional_name: Some("Dr. Costa".to_string()),
        treatment_id: "t-1".to_string(),
        treatment_name: Some("Cleaning".to_string()),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        status,
        notes: None,
    }
}

pub fn user(id: &str, name: &str, email: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
    }
}

pub struct Harness {
    pub ctx: AppContext,
    pub store: Arc<MemorySessionStore>,
    pub auth: Arc<FakeAuth>,
    pub clients: Arc<FakeGateway<Client>>,
    pub treatments: Arc<FakeGateway<Treatment>>,
    pub appointments: Arc<FakeGateway<Appointment>>,
    pub professionals: Arc<FakeGateway<Professional>>,
    pub users: Arc<FakeGateway<User>>,
}

pub fn default_auth() -> FakeAuth {
    FakeAuth::default()
        .with_account("u-1", "Ana Admin", "admin@clinic.test", Role::Admin)
        .with_account("u-2", "Dr. Costa", "costa@clinic.test", Role::Professional)
        .with_account("u-3", "Carla Client", "carla@clinic.test", Role::Client)
}

/// Builds a context over fresh fakes. The session is still `Loading`.
pub fn harness_with(store: Arc<MemorySessionStore>, auth: Arc<FakeAuth>) -> Harness {
    let clients = Arc::new(FakeGateway::new(
        "c",
        vec![
            client("c-1", "Maria Silva", "maria@mail.test", "555-0101"),
            client("c-2", "João Souza", "joao@mail.test", "555-0102"),
        ],
    ));
    let treatments = Arc::new(FakeGateway::new(
        "t",
        vec![
            treatment("t-1", "Cleaning", "Routine cleaning"),
            treatment("t-2", "Whitening", "Cosmetic whitening"),
        ],
    ));
    let appointments = Arc::new(FakeGateway::new(
        "a",
        vec![
            appointment("a-1", "c-1", "2030-01-10", AppointmentStatus::Scheduled),
            appointment("a-2", "c-1", "2020-05-02", AppointmentStatus::Completed),
            appointment("a-3", "c-2", "2030-02-01", AppointmentStatus::Scheduled),
        ],
    ));
    let professionals = Arc::new(FakeGateway::new("p", Vec::new()));
    let users = Arc::new(FakeGateway::new(
        "u",
        vec![
            user("u-1", "Ana Admin", "admin@clinic.test", Role::Admin),
            user("u-2", "Dr. Costa", "costa@clinic.test", Role::Professional),
            user("u-3", "Carla Client", "carla@clinic.test", Role::Client),
            user("u-4", "Owner", "owner@clinic.test", Role::Admin),
        ],
    ));

    let ctx = AppContext::new(AppDependencies {
        store: store.clone(),
        auth: auth.clone(),
        clients: clients.clone(),
        treatments: treatments.clone(),
        appointments: appointments.clone(),
        professionals: professionals.clone(),
        users: users.clone(),
        statistics: Arc::new(FakeStatistics),
        summarizer: Arc::new(CannedSummarizer::default()),
        protected_emails: vec!["Owner@Clinic.test".to_string()],
    });

    Harness {
        ctx,
        store,
        auth,
        clients,
        treatments,
        appointments,
        professionals,
        users,
    }
}

pub fn harness() -> Harness {
    harness_with(Arc::new(MemorySessionStore::new()), Arc::new(default_auth()))
}

/// A harness whose session is restored and signed in as `email`.
pub async fn signed_in(email: &str) -> Harness {
    let h = harness();
    h.ctx.session.restore_session().await;
    h.ctx
        .session
        .login(email, PASSWORD)
        .await
        .expect("fixture login");
    h
}
