use std::sync::Arc;

use quiz_core::{SessionStats, StatsAggregator};
use tracing::info;

use crate::dashboard::DashboardVm;
use crate::error::HistoryError;
use crate::history::HistoryStore;

/// Reads the history store and derives dashboard stats on demand.
#[derive(Clone)]
pub struct StatsService {
    history: Arc<dyn HistoryStore>,
}

impl StatsService {
    #[must_use]
    pub fn new(history: Arc<dyn HistoryStore>) -> Self {
        Self { history }
    }

    /// Stats for the history as it stands now.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the store cannot be read.
    pub async fn session_stats(&self) -> Result<SessionStats, HistoryError> {
        let snapshot = self.history.snapshot().await?;
        Ok(StatsAggregator::aggregate(&snapshot))
    }

    /// # Errors
    ///
    /// Returns `HistoryError` if the store cannot be read.
    pub async fn dashboard(&self) -> Result<DashboardVm, HistoryError> {
        let stats = self.session_stats().await?;
        info!(
            answers = stats.total_answers,
            accuracy = stats.accuracy_percent,
            "dashboard built"
        );
        Ok(DashboardVm::from_stats(&stats))
    }
}
