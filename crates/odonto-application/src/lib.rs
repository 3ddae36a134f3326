//! Application layer for the Odonto client.
//!
//! Coordinates the domain ports from `odonto-core` into the session state
//! machine, the list controllers every collection view uses, and the
//! remaining use cases (client detail, history summary, dashboard).

pub mod client_detail;
pub mod context;
pub mod controller;
pub mod dashboard;
pub mod history_summary;
pub mod session;

pub use client_detail::{ClientDetail, ClientDetailService};
pub use context::{AppContext, AppDependencies};
pub use controller::{ListController, Settled, UserDirectory};
pub use dashboard::DashboardService;
pub use history_summary::HistorySummaryService;
pub use session::SessionManager;
