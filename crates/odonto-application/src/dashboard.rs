//! Dashboard statistics.

use odonto_core::access::Capability;
use odonto_core::statistics::{Statistics, StatisticsGateway};
use odonto_core::Result;
use std::sync::Arc;

use crate::controller::Settled;
use crate::session::SessionManager;

pub struct DashboardService {
    session: Arc<SessionManager>,
    gateway: Arc<dyn StatisticsGateway>,
}

impl DashboardService {
    pub fn new(session: Arc<SessionManager>, gateway: Arc<dyn StatisticsGateway>) -> Self {
        Self { session, gateway }
    }

    pub async fn statistics(&self) -> Result<Settled<Statistics>> {
        self.session.require(Capability::ViewStatistics).await?;
        let epoch = self.session.epoch();
        let result = self.gateway.fetch().await;
        Ok(match self.session.settle(epoch, result).await? {
            Some(statistics) => Settled::Applied(statistics),
            None => Settled::Discarded,
        })
    }
}
