//! In-memory rating store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rating_core::{RatingState, TrackedAction};
use tokio::sync::Mutex;

use crate::application::request_rating::{RatingStore, StorageError};

/// Keeps the rating record in process memory.
#[derive(Debug, Default)]
pub struct MemoryRatingStore {
    state: Mutex<RatingState>,
}

impl MemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing record, e.g. one restored by the host.
    pub fn with_state(state: RatingState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// A copy of the current record.
    pub async fn snapshot(&self) -> RatingState {
        self.state.lock().await.clone()
    }
}

#[async_trait]
impl RatingStore for MemoryRatingStore {
    async fn action_timestamps(
        &self,
    ) -> Result<Vec<(TrackedAction, Option<DateTime<Utc>>)>, StorageError> {
        Ok(self.state.lock().await.action_timestamps())
    }

    async fn increment_count(&self) -> Result<u64, StorageError> {
        Ok(self.state.lock().await.increment())
    }

    async fn record_decline(&self) -> Result<(), StorageError> {
        self.state
            .lock()
            .await
            .record(TrackedAction::Declined, Utc::now());
        Ok(())
    }

    async fn record_rated(&self) -> Result<(), StorageError> {
        self.state.lock().await.record(TrackedAction::Rated, Utc::now());
        Ok(())
    }

    async fn reset_data(&self) -> Result<(), StorageError> {
        *self.state.lock().await = RatingState::default();
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
