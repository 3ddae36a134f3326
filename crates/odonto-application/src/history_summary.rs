//! Client history summarization.

use odonto_core::access::Capability;
use odonto_core::summary::{Summarizer, SummaryRequest};
use odonto_core::{OdontoError, Result};
use std::sync::Arc;

use crate::controller::Settled;
use crate::session::SessionManager;

/// Sends a client's history to the summarizer.
pub struct HistorySummaryService {
    session: Arc<SessionManager>,
    summarizer: Arc<dyn Summarizer>,
}

impl HistorySummaryService {
    pub fn new(session: Arc<SessionManager>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            session,
            summarizer,
        }
    }

    /// Summarizes `history`. Blank input is rejected before the
    /// summarizer is called.
    pub async fn summarize(&self, history: &str) -> Result<Settled<String>> {
        self.session.require(Capability::SummarizeHistory).await?;

        let history = history.trim();
        if history.is_empty() {
            return Err(OdontoError::validation("Client history cannot be empty."));
        }

        let epoch = self.session.epoch();
        let request = SummaryRequest {
            history: history.to_string(),
        };
        tracing::debug!(chars = history.len(), "Requesting history summary");

        let result = self.summarizer.summarize(&request).await;
        Ok(match self.session.settle(epoch, result).await? {
            Some(response) => Settled::Applied(response.summary),
            None => Settled::Discarded,
        })
    }
}
