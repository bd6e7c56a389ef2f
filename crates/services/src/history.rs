use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quiz_core::model::{AnswerEvent, HistorySnapshot};

use crate::error::HistoryError;

/// Accumulates answer events for the current practice session.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Fold one answer event into the session history.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the store cannot be written.
    async fn record(&self, event: &AnswerEvent) -> Result<(), HistoryError>;

    /// Read an immutable copy of the accumulated counters.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the store cannot be read.
    async fn snapshot(&self) -> Result<HistorySnapshot, HistoryError>;

    /// Forget everything recorded so far.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if the store cannot be written.
    async fn reset(&self) -> Result<(), HistoryError>;
}

/// Process-local history store. Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    inner: Arc<Mutex<HistorySnapshot>>,
}

impl InMemoryHistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot, e.g. one exported earlier as JSON.
    #[must_use]
    pub fn from_snapshot(snapshot: HistorySnapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(snapshot)),
        }
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn record(&self, event: &AnswerEvent) -> Result<(), HistoryError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| HistoryError::Unavailable(e.to_string()))?;
        guard.record(event);
        Ok(())
    }

    async fn snapshot(&self) -> Result<HistorySnapshot, HistoryError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| HistoryError::Unavailable(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn reset(&self) -> Result<(), HistoryError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| HistoryError::Unavailable(e.to_string()))?;
        *guard = HistorySnapshot::empty();
        tracing::info!("history store reset");
        Ok(())
    }
}
