use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use odonto_application::{AppContext, AppDependencies};
use odonto_core::session::{SessionState, SessionStore};
use odonto_infrastructure::logging::init_logging;
use odonto_infrastructure::{
    ApiClient, ClientConfig, FileSessionStore, OdontoPaths, RestAuthGateway, RestResourceGateway,
    RestStatisticsGateway, build_summarizer,
};
use tracing_appender::non_blocking::WorkerGuard;

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub api_url: Option<String>,
    pub log_level: Option<String>,
}

pub struct AppBootstrap {
    pub context: AppContext,
    pub state: SessionState,
    pub config: ClientConfig,
    // Flushes the log file on drop
    _log_guard: Option<WorkerGuard>,
}

impl AppBootstrap {
    /// Loads configuration, initialises logging, wires the REST adapters
    /// into an [`AppContext`] and restores the persisted session.
    pub async fn start(overrides: Overrides) -> Result<Self> {
        let paths = OdontoPaths::new(None);
        let mut config = ClientConfig::load(overrides.config.as_deref(), &paths)
            .context("Failed to load configuration")?;
        if let Some(url) = overrides.api_url {
            config.api.base_url = url;
        }
        if let Some(level) = overrides.log_level {
            config.logging.level = level;
        }

        let logs_dir = if config.logging.file {
            paths.logs_dir().ok()
        } else {
            None
        };
        let guard = init_logging(&config.logging.level, logs_dir.as_deref())
            .context("Failed to initialise logging")?;

        let storage_dir = config
            .storage_dir(&paths)
            .context("Failed to resolve the storage directory")?;
        let session_path = storage_dir.join("session.toml");
        tracing::debug!("Session file: {:?}", session_path);
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(session_path));

        let api = Arc::new(
            ApiClient::new(&config.api, store.clone()).context("Invalid API configuration")?,
        );
        let summarizer =
            build_summarizer(&config.summarizer).context("Failed to set up the summarizer")?;

        let deps = AppDependencies {
            store,
            auth: Arc::new(RestAuthGateway::new(api.clone())),
            clients: Arc::new(RestResourceGateway::clients(api.clone())),
            treatments: Arc::new(RestResourceGateway::treatments(api.clone())),
            appointments: Arc::new(RestResourceGateway::appointments(api.clone())),
            professionals: Arc::new(RestResourceGateway::professionals(api.clone())),
            users: Arc::new(RestResourceGateway::users(api.clone())),
            statistics: Arc::new(RestStatisticsGateway::new(api)),
            summarizer,
            protected_emails: config.users.protected_emails.clone(),
        };

        let (context, state) = AppContext::init(deps).await;
        tracing::info!(base_url = %config.api.base_url, "Odonto client ready");

        Ok(Self {
            context,
            state,
            config,
            _log_guard: guard,
        })
    }
}
