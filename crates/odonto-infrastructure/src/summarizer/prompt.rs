//! Prompt based summarizer.
//!
//! Renders the summary prompt with minijinja and sends it to the Anthropic
//! messages API.

use async_trait::async_trait;
use minijinja::{Environment, context};
use odonto_core::summary::{Summarizer, SummaryRequest, SummaryResponse};
use odonto_core::{OdontoError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SummarizerConfig;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

const PROMPT_TEMPLATE: &str = "You are an expert medical professional.

Please summarize the following client history, highlighting key treatments, issues, and needs:

Client History: {{ history }}";

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Summarizer backed by a hosted text-generation model.
#[derive(Clone)]
pub struct PromptSummarizer {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
    endpoint: String,
}

impl PromptSummarizer {
    pub fn new(api_key: impl Into<String>, config: &SummarizerConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs.max(1)),
            endpoint: MESSAGES_URL.to_string(),
        })
    }

    /// Points the summarizer at another messages endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Renders the summary prompt for `history`.
    pub fn render_prompt(history: &str) -> Result<String> {
        let mut env = Environment::new();
        env.add_template("summary", PROMPT_TEMPLATE)
            .map_err(|e| OdontoError::internal(format!("Invalid summary template: {}", e)))?;
        let template = env
            .get_template("summary")
            .map_err(|e| OdontoError::internal(e.to_string()))?;
        template
            .render(context! { history => history })
            .map_err(|e| OdontoError::internal(format!("Failed to render summary prompt: {}", e)))
    }
}

#[async_trait]
impl Summarizer for PromptSummarizer {
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse> {
        let body = MessagesRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: Self::render_prompt(&request.history)?,
            }],
            max_tokens: self.max_tokens,
        };

        tracing::debug!("Requesting history summary ({} chars)", request.history.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| OdontoError::network(format!("Summary request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OdontoError::backend(
                status.as_u16(),
                format!("Summary service error: {}", crate::http::error_message(&error_text)),
            ));
        }

        let parsed: MessagesResponse = response.json().await?;
        let summary = parsed
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        if summary.trim().is_empty() {
            return Err(OdontoError::backend(status.as_u16(), "Summary service returned no text"));
        }

        Ok(SummaryResponse { summary })
    }
}
