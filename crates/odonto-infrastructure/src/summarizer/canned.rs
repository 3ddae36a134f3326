//! Offline summarizer.

use async_trait::async_trait;
use odonto_core::Result;
use odonto_core::summary::{Summarizer, SummaryRequest, SummaryResponse};

/// Returns the first lines of the history under a fixed heading.
///
/// Lets the summary view work without a text-generation service.
#[derive(Debug, Clone)]
pub struct CannedSummarizer {
    max_lines: usize,
}

impl Default for CannedSummarizer {
    fn default() -> Self {
        Self { max_lines: 5 }
    }
}

impl CannedSummarizer {
    pub fn with_max_lines(max_lines: usize) -> Self {
        Self {
            max_lines: max_lines.max(1),
        }
    }
}

#[async_trait]
impl Summarizer for CannedSummarizer {
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse> {
        let lines: Vec<&str> = request
            .history
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let mut summary = String::from("Client history highlights:");
        for line in lines.iter().take(self.max_lines) {
            summary.push_str("\n- ");
            summary.push_str(line.trim_start_matches("- "));
        }
        if lines.len() > self.max_lines {
            summary.push_str(&format!("\n({} more entries)", lines.len() - self.max_lines));
        }

        Ok(SummaryResponse { summary })
    }
}
