//! Dashboard statistics.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Summary figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub scheduled_consultations: u64,
    pub total_clients: u64,
    pub total_treatments: u64,
    /// Revenue of the scheduled consultations
    pub potential_revenue: f64,
    pub total_revenue: f64,
}

/// Backend access to the statistics summary.
#[async_trait]
pub trait StatisticsGateway: Send + Sync {
    async fn fetch(&self) -> Result<Statistics>;
}
