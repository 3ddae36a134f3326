//! Summarizer adapters.
//!
//! - `prompt`: prompt based text generation over HTTP
//! - `canned`: local summary, no network

mod canned;
mod prompt;

pub use canned::CannedSummarizer;
pub use prompt::PromptSummarizer;

use odonto_core::summary::Summarizer;
use odonto_core::{OdontoError, Result};
use std::sync::Arc;

use crate::config::{SummarizerConfig, SummarizerProvider};

/// Builds the summarizer selected in configuration.
pub fn build_summarizer(config: &SummarizerConfig) -> Result<Arc<dyn Summarizer>> {
    match config.provider {
        SummarizerProvider::Canned => Ok(Arc::new(CannedSummarizer::default())),
        SummarizerProvider::Anthropic => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                OdontoError::config(
                    "summarizer.api_key or ANTHROPIC_API_KEY is required for the anthropic provider",
                )
            })?;
            Ok(Arc::new(PromptSummarizer::new(api_key, config)?))
        }
    }
}
