//! TOML-backed rating store.
//!
//! Keeps the [`RatingState`] record in `ratings.toml` under the
//! platform-appropriate data directory:
//! - Windows:  `%APPDATA%\RatingRequestor\ratings.toml`
//! - Linux:    `~/.local/share/rating-requestor/ratings.toml`
//! - macOS:    `~/Library/Application Support/RatingRequestor/ratings.toml`
//!
//! Mobile hosts usually pass their sandbox path to [`TomlRatingStore::at_path`].
//!
//! A record looks like:
//!
//! ```toml
//! declined = "2026-03-01T12:00:00Z"
//! event_count = 9
//! ```
//!
//! Unset timestamps are omitted.  A missing file reads as the default
//! (awaiting) record, so first launch needs no setup.  Writes go to
//! `ratings.toml.tmp` and are renamed over the record.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rating_core::{RatingState, TrackedAction};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::request_rating::{RatingStore, StorageError};

const FILE_NAME: &str = "ratings.toml";

/// Determines the platform-appropriate directory for the rating record.
///
/// # Errors
///
/// Returns [`StorageError::NoPlatformDataDir`] when the base directory cannot
/// be determined from the environment.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    platform_data_dir().ok_or(StorageError::NoPlatformDataDir)
}

/// Stores the rating record in a TOML file.
#[derive(Debug)]
pub struct TomlRatingStore {
    path: PathBuf,
    // Serialises read-modify-write cycles on `path`.
    lock: Mutex<()>,
}

impl TomlRatingStore {
    /// Uses `ratings.toml` in the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoPlatformDataDir`] if the directory cannot be
    /// determined.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::at_path(data_dir()?.join(FILE_NAME)))
    }

    /// Uses the file at `path`.  Nothing is read or created until first use.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the record, returning the default when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] for file-system errors other than "not
    /// found", and [`StorageError::Parse`] if the TOML is malformed.
    pub async fn load(&self) -> Result<RatingState, StorageError> {
        let _guard = self.lock.lock().await;
        self.read_state().await
    }

    async fn read_state(&self) -> Result<RatingState, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RatingState::default()),
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn write_state(&self, state: &RatingState) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| StorageError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        // Stage then rename; an interrupted write must not truncate the record.
        let content = toml::to_string_pretty(state)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, content)
            .await
            .map_err(|source| StorageError::Io {
                path: staging.clone(),
                source,
            })?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })
    }

    /// `ratings.toml.tmp` next to the record.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Loads, applies `change`, and writes back under the store lock.
    async fn update<T: Send>(
        &self,
        change: impl FnOnce(&mut RatingState) -> T + Send,
    ) -> Result<T, StorageError> {
        let _guard = self.lock.lock().await;
        let mut state = self.read_state().await?;
        let out = change(&mut state);
        self.write_state(&state).await?;
        Ok(out)
    }
}

#[async_trait]
impl RatingStore for TomlRatingStore {
    async fn action_timestamps(
        &self,
    ) -> Result<Vec<(TrackedAction, Option<DateTime<Utc>>)>, StorageError> {
        Ok(self.load().await?.action_timestamps())
    }

    async fn increment_count(&self) -> Result<u64, StorageError> {
        let count = self.update(|state| state.increment()).await?;
        debug!(count, path = %self.path.display(), "positive event count persisted");
        Ok(count)
    }

    async fn record_decline(&self) -> Result<(), StorageError> {
        self.update(|state| state.record(TrackedAction::Declined, Utc::now()))
            .await
    }

    async fn record_rated(&self) -> Result<(), StorageError> {
        self.update(|state| state.record(TrackedAction::Rated, Utc::now()))
            .await
    }

    async fn reset_data(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Resolves the platform data directory including the app subdirectory.
fn platform_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("RatingRequestor"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_DATA_HOME or ~/.local/share
        let base = std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local").join("share"))
            })?;
        Some(base.join("rating-requestor"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("RatingRequestor")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rating_core::RatingPhase;
    use uuid::Uuid;

    fn temp_store() -> (TomlRatingStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("rating_test_{}", Uuid::new_v4()));
        let store = TomlRatingStore::at_path(dir.join(FILE_NAME));
        (store, dir)
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_default_record() {
        // Arrange
        let (store, dir) = temp_store();

        // Act
        let state = store.load().await.unwrap();

        // Assert
        assert_eq!(state, RatingState::default());
        assert!(!dir.exists(), "reading must not create the directory");
    }

    #[tokio::test]
    async fn test_increment_creates_file_and_persists_count() {
        // Arrange
        let (store, dir) = temp_store();

        // Act
        store.increment_count().await.unwrap();
        let second = store.increment_count().await.unwrap();

        // Assert
        assert_eq!(second, 2);
        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("event_count = 2"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_record_survives_a_new_store_instance() {
        // Arrange
        let (store, dir) = temp_store();
        store.increment_count().await.unwrap();
        store.record_decline().await.unwrap();

        // Act
        let reopened = TomlRatingStore::at_path(store.path());
        let state = reopened.load().await.unwrap();

        // Assert
        assert_eq!(state.phase(), RatingPhase::Declined);
        assert_eq!(state.event_count, 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_record_rated_reports_through_action_timestamps() {
        let (store, dir) = temp_store();
        store.record_rated().await.unwrap();

        let timestamps = store.action_timestamps().await.unwrap();

        assert!(timestamps
            .iter()
            .any(|(action, at)| *action == TrackedAction::Rated && at.is_some()));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_reset_removes_record_and_tolerates_missing_file() {
        // Arrange
        let (store, dir) = temp_store();
        store.record_rated().await.unwrap();

        // Act
        store.reset_data().await.unwrap();
        store.reset_data().await.unwrap();

        // Assert
        assert_eq!(store.load().await.unwrap(), RatingState::default());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_malformed_file_returns_parse_error() {
        // Arrange
        let (store, dir) = temp_store();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(store.path(), "[[[ not valid toml").unwrap();

        // Act
        let result = store.load().await;

        // Assert
        assert!(matches!(result, Err(StorageError::Parse(_))));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_record_readable() {
        // Arrange
        let (store, dir) = temp_store();
        store.increment_count().await.unwrap();
        store.record_decline().await.unwrap();
        // A directory in the staging slot makes the next write fail midway.
        std::fs::create_dir_all(store.staging_path()).unwrap();

        // Act
        let result = store.increment_count().await;

        // Assert
        assert!(matches!(result, Err(StorageError::Io { .. })));
        let state = store.load().await.unwrap();
        assert_eq!(state.phase(), RatingPhase::Declined);
        assert_eq!(state.event_count, 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_successful_write_leaves_no_staging_file() {
        // Arrange
        let (store, dir) = temp_store();

        // Act
        store.increment_count().await.unwrap();
        store.record_rated().await.unwrap();

        // Assert
        assert!(store.path().exists());
        assert!(!store.staging_path().exists());
        assert!(store.staging_path().ends_with("ratings.toml.tmp"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_default_path_ends_with_ratings_toml() {
        if let Ok(store) = TomlRatingStore::open_default() {
            assert!(store.path().ends_with(FILE_NAME));
        }
        // NoPlatformDataDir is acceptable in a stripped environment.
    }
}
