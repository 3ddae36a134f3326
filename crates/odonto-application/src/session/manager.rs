use odonto_core::access::{Capability, GateDecision, can, gate};
use odonto_core::session::{
    AuthGateway, Credentials, PersistedSession, Registration, Session, SessionState,
    SessionStore, clear_session, persist_session, read_session,
};
use odonto_core::user::{Role, UserProfile};
use odonto_core::{OdontoError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};

/// Owns the current-user identity, its durable storage and the
/// authentication state machine.
///
/// `SessionManager` starts in [`SessionState::Loading`] and leaves it
/// exactly once, through [`SessionManager::restore_session`]. After that
/// the only transitions are `Anonymous → Authenticated` (login) and
/// `Authenticated → Anonymous` (logout or a rejected token).
///
/// # Epoch
///
/// Every transition bumps an epoch counter. Controllers read it before
/// dispatching a request and hand the response to [`SessionManager::settle`],
/// which drops responses that arrive after the session they were issued
/// under has ended.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    auth: Arc<dyn AuthGateway>,
    state: RwLock<SessionState>,
    epoch: AtomicU64,
    restoring: Mutex<()>,
}

impl SessionManager {
    /// Creates a manager in the `Loading` state.
    pub fn new(store: Arc<dyn SessionStore>, auth: Arc<dyn AuthGateway>) -> Self {
        Self {
            store,
            auth,
            state: RwLock::new(SessionState::Loading),
            epoch: AtomicU64::new(0),
            restoring: Mutex::new(()),
        }
    }

    /// A snapshot of the current state.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    /// The signed-in session, if any.
    pub async fn current(&self) -> Option<Session> {
        self.state.read().await.session().cloned()
    }

    pub async fn role(&self) -> Option<Role> {
        self.state.read().await.role()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    fn bump_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Reads the persisted session and revalidates it with the backend.
    ///
    /// Runs once; later calls return the current state unchanged.
    ///
    /// - nothing stored: `Anonymous`
    /// - half a session or an unreadable profile: storage cleared, `Anonymous`
    /// - token rejected by the backend: storage cleared, `Anonymous`
    /// - backend unreachable: the stored session is trusted as is; the
    ///   first rejected request will force a logout
    pub async fn restore_session(&self) -> SessionState {
        let _restoring = self.restoring.lock().await;
        {
            let state = self.state.read().await;
            if !state.is_loading() {
                return state.clone();
            }
        }

        let next = match read_session(self.store.as_ref()) {
            Ok(PersistedSession::Empty) => SessionState::Anonymous,
            Ok(PersistedSession::Stale) => {
                tracing::warn!("Discarding incomplete persisted session");
                self.clear_storage();
                SessionState::Anonymous
            }
            Ok(PersistedSession::Complete { profile, token }) => {
                self.revalidate(profile, token).await
            }
            Err(e) => {
                tracing::error!("Failed to read persisted session: {}", e);
                self.clear_storage();
                SessionState::Anonymous
            }
        };

        tracing::info!(authenticated = next.is_authenticated(), "Session restored");
        *self.state.write().await = next.clone();
        self.bump_epoch();
        next
    }

    async fn revalidate(&self, stored: UserProfile, token: String) -> SessionState {
        match self.auth.current_user(&token).await {
            Ok(profile) => {
                if profile != stored {
                    if let Err(e) = persist_session(self.store.as_ref(), &profile, &token) {
                        tracing::warn!("Failed to refresh persisted profile: {}", e);
                    }
                }
                SessionState::Authenticated(Session::new(profile, token))
            }
            Err(e) if e.is_unauthorized() || e.is_authentication() || e.is_forbidden() => {
                tracing::info!("Persisted token rejected, signing out");
                self.clear_storage();
                SessionState::Anonymous
            }
            Err(e) => {
                tracing::warn!("Could not revalidate persisted session: {}", e);
                SessionState::Authenticated(Session::new(stored, token))
            }
        }
    }

    /// Exchanges credentials for a session.
    ///
    /// Only valid while `Anonymous`. On failure any stale persisted state
    /// is cleared, the state stays `Anonymous` and the error is returned
    /// unchanged. Never retried.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        self.ensure_anonymous("login").await?;

        let credentials = Credentials::new(email.trim(), password);
        let response = match self.auth.login(&credentials).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(email = %credentials.email, "Login failed: {}", e);
                self.clear_storage();
                return Err(e);
            }
        };

        let mut state = self.state.write().await;
        if !matches!(*state, SessionState::Anonymous) {
            return Err(OdontoError::invalid_state(
                "another sign-in completed while this one was in flight",
            ));
        }

        let session = Session::new(response.user, response.token);
        if let Err(e) = persist_session(self.store.as_ref(), &session.profile(), &session.auth_token) {
            self.clear_storage();
            return Err(e);
        }

        tracing::info!(user_id = %session.user_id, role = %session.role, "Signed in");
        *state = SessionState::Authenticated(session.clone());
        self.bump_epoch();
        Ok(session)
    }

    /// Creates an account and signs in with it.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Session> {
        self.ensure_anonymous("registration").await?;

        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(OdontoError::validation("Name and email are required."));
        }
        if password.is_empty() {
            return Err(OdontoError::validation("Password is required."));
        }

        let registration = Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        };
        let created = self.auth.register(&registration).await?;
        tracing::info!(user_id = %created.id, "Account registered");

        self.login(email, password).await
    }

    /// Ends the session and clears durable storage.
    ///
    /// Idempotent. The state becomes `Anonymous` even if clearing storage
    /// fails; the storage error is still returned.
    pub async fn logout(&self) -> Result<()> {
        let mut state = self.state.write().await;
        let result = clear_session(self.store.as_ref());
        if state.is_authenticated() {
            tracing::info!("Signed out");
        }
        *state = SessionState::Anonymous;
        self.bump_epoch();
        result
    }

    /// Ends the session after the backend rejected its token.
    pub async fn force_logout(&self) {
        let mut state = self.state.write().await;
        if !state.is_authenticated() {
            return;
        }
        tracing::warn!("Backend rejected the session token, signing out");
        self.clear_storage();
        *state = SessionState::Anonymous;
        self.bump_epoch();
    }

    /// Navigation decision for a view requiring `required`.
    pub async fn gate(&self, required: Option<Capability>) -> GateDecision {
        gate(&*self.state.read().await, required)
    }

    /// Checks that the signed-in role holds `capability` before an action
    /// is attempted.
    pub async fn require(&self, capability: Capability) -> Result<Session> {
        match &*self.state.read().await {
            SessionState::Loading => Err(OdontoError::invalid_state("session is still loading")),
            SessionState::Anonymous => Err(OdontoError::Unauthorized),
            SessionState::Authenticated(session) if can(session.role, capability) => {
                Ok(session.clone())
            }
            SessionState::Authenticated(session) => Err(OdontoError::forbidden(format!(
                "{} may not {:?}",
                session.role, capability
            ))),
        }
    }

    /// Settles a backend response issued under `epoch`.
    ///
    /// Returns `Ok(None)` when the session changed while the request was in
    /// flight. A rejected token forces a logout and is returned as
    /// `Unauthorized`.
    pub async fn settle<T>(&self, epoch: u64, result: Result<T>) -> Result<Option<T>> {
        if self.epoch() != epoch {
            tracing::debug!("Discarding response from an ended session");
            return Ok(None);
        }
        match result {
            Ok(value) => Ok(Some(value)),
            Err(OdontoError::Unauthorized) => {
                self.force_logout().await;
                Err(OdontoError::Unauthorized)
            }
            Err(e) => Err(e),
        }
    }

    async fn ensure_anonymous(&self, action: &str) -> Result<()> {
        match &*self.state.read().await {
            SessionState::Anonymous => Ok(()),
            SessionState::Loading => Err(OdontoError::invalid_state(format!(
                "{} is not available while the session is loading",
                action
            ))),
            SessionState::Authenticated(_) => Err(OdontoError::invalid_state(format!(
                "{} requires signing out first",
                action
            ))),
        }
    }

    fn clear_storage(&self) {
        if let Err(e) = clear_session(self.store.as_ref()) {
            tracing::error!("Failed to clear persisted session: {}", e);
        }
    }
}
