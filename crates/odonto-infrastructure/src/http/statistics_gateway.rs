//! REST implementation of `StatisticsGateway`.

use async_trait::async_trait;
use odonto_core::Result;
use odonto_core::statistics::{Statistics, StatisticsGateway};
use std::sync::Arc;

use super::api_client::{ApiClient, Auth};

pub struct RestStatisticsGateway {
    api: Arc<ApiClient>,
}

impl RestStatisticsGateway {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl StatisticsGateway for RestStatisticsGateway {
    async fn fetch(&self) -> Result<Statistics> {
        let url = self.api.url(&["statistics"])?;
        self.api.get_json(url, Auth::Stored).await
    }
}
