//! Infrastructure layer of the Odonto clinic client.
//!
//! Implements the ports declared in `odonto-core`: REST gateways over
//! reqwest, durable session storage, summarizer adapters, plus
//! configuration, paths and logging setup.

pub mod config;
pub mod http;
pub mod logging;
pub mod paths;
pub mod storage;
pub mod summarizer;

pub use crate::config::ClientConfig;
pub use crate::http::{ApiClient, RestAuthGateway, RestResourceGateway, RestStatisticsGateway};
pub use crate::paths::OdontoPaths;
pub use crate::storage::{FileSessionStore, MemorySessionStore};
pub use crate::summarizer::{CannedSummarizer, PromptSummarizer, build_summarizer};
