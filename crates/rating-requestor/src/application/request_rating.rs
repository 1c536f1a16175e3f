//! RequestRating: turns positive events into, at most, one rating prompt.
//!
//! This use case owns the effective [`RatingConfig`] and reaches the outside
//! world only through two injected traits:
//!
//! - [`RatingStore`] – the durable rating record (action timestamps and the
//!   positive-event counter).
//! - [`RatingPlatform`] – OS detection, the native review sheet, URL opening,
//!   and the modal alert.
//!
//! # Ordering
//!
//! Every storage call is awaited before the next step starts:
//! guard read → counter increment → timing decision → dialog.  Two
//! concurrent `handle_positive_event` calls against a store without its own
//! locking can both read the same count; one increment is then lost.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rating_core::{
    store_url, ActionLabels, ConfigError, ConfigOverrides, MobileOs, PromptOutcome, RatingConfig,
    RatingResult, TrackedAction,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Dialog buttons, in presentation order.
const DIALOG_ACTIONS: [RatingResult; 3] =
    [RatingResult::Accept, RatingResult::Delay, RatingResult::Decline];

/// Error type for rating storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The platform data directory could not be determined.
    #[error("could not determine platform data directory")]
    NoPlatformDataDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing rating data at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored record could not be parsed.
    #[error("failed to parse rating data: {0}")]
    Parse(#[from] toml::de::Error),

    /// The record could not be serialized.
    #[error("failed to serialize rating data: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Any other backend failure.
    #[error("rating storage unavailable: {0}")]
    Unavailable(String),
}

/// Error type for platform review actions.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("native review request failed: {0}")]
    NativeReview(String),
    #[error("could not open {url}: {reason}")]
    OpenUrl { url: String, reason: String },
}

/// Error type for the request-rating use case.
#[derive(Debug, Error)]
pub enum RatingError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("rating storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Receives `(did_appear, result)` once a call has an answer for the host.
pub type RatingCallback = Box<dyn FnOnce(bool, Option<RatingResult>) + Send>;

/// Durable storage for the rating record.
///
/// Infrastructure implementations keep a TOML file or an in-memory record;
/// tests use mocks.
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Returns every tracked action with its timestamp, `None` when unset.
    async fn action_timestamps(
        &self,
    ) -> Result<Vec<(TrackedAction, Option<DateTime<Utc>>)>, StorageError>;

    /// Increments the persisted positive-event counter and returns the new value.
    async fn increment_count(&self) -> Result<u64, StorageError>;

    /// Sets the decline timestamp to now.
    async fn record_decline(&self) -> Result<(), StorageError>;

    /// Sets the rated timestamp to now.
    async fn record_rated(&self) -> Result<(), StorageError>;

    /// Clears every timestamp and the counter.
    async fn reset_data(&self) -> Result<(), StorageError>;
}

/// The host platform's review and dialog capabilities.
#[async_trait]
pub trait RatingPlatform: Send + Sync {
    /// The mobile OS the app is running on.
    fn os(&self) -> MobileOs;

    /// Whether the OS version offers a native in-app review sheet.
    fn native_review_available(&self) -> bool;

    /// Shows the native in-app review sheet.
    async fn request_native_review(&self) -> Result<(), PlatformError>;

    /// Opens `url` outside the app.
    async fn open_url(&self, url: &str) -> Result<(), PlatformError>;

    /// Presents a modal alert and resolves with the index of the pressed
    /// button, or `None` if the alert was dismissed without a choice.
    async fn alert(&self, title: &str, message: &str, buttons: &[String]) -> Option<usize>;
}

fn report(callback: Option<RatingCallback>, outcome: PromptOutcome) {
    if let Some(callback) = callback {
        callback(outcome.did_appear, outcome.result);
    }
}

fn label_for(labels: &ActionLabels, action: RatingResult) -> &str {
    match action {
        RatingResult::Accept => &labels.accept,
        RatingResult::Delay => &labels.delay,
        RatingResult::Decline => &labels.decline,
    }
}

/// The request-rating use case.
pub struct RatingRequestor {
    config: RatingConfig,
    store: Arc<dyn RatingStore>,
    platform: Arc<dyn RatingPlatform>,
}

impl RatingRequestor {
    /// Builds the configuration for `app_name` and creates the requestor.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::InvalidConfiguration`] when `app_store_id` is
    /// empty.  No requestor exists in that case.
    pub fn new(
        app_store_id: &str,
        app_name: &str,
        overrides: Option<ConfigOverrides>,
        store: Arc<dyn RatingStore>,
        platform: Arc<dyn RatingPlatform>,
    ) -> Result<Self, RatingError> {
        let config = RatingConfig::build(app_store_id, app_name, overrides)?;
        Ok(Self::with_config(config, store, platform))
    }

    /// Creates a requestor from an already-built configuration.
    pub fn with_config(
        config: RatingConfig,
        store: Arc<dyn RatingStore>,
        platform: Arc<dyn RatingPlatform>,
    ) -> Self {
        Self {
            config,
            store,
            platform,
        }
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Returns `true` while no tracked action has been recorded.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::Storage`] if the record cannot be read.
    pub async fn is_awaiting_rating(&self) -> Result<bool, RatingError> {
        let timestamps = self.store.action_timestamps().await?;
        Ok(timestamps.iter().all(|(_, at)| at.is_none()))
    }

    /// Call when a positive interaction has occurred in the host app.
    ///
    /// Depending on the stored count and the timing function this may show
    /// the rating dialog.  `callback` hears `(false, None)` when no dialog
    /// appears, and `(true, Some(Delay | Decline))` for those choices.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::Storage`] if the record cannot be read or
    /// updated.
    pub async fn handle_positive_event(
        &self,
        callback: Option<RatingCallback>,
    ) -> Result<PromptOutcome, RatingError> {
        if !self.is_awaiting_rating().await? {
            debug!("rating decision already recorded; ignoring positive event");
            report(callback, PromptOutcome::not_shown());
            return Ok(PromptOutcome::not_shown());
        }

        let count = self.store.increment_count().await?;
        if !self.config.should_prompt(count) {
            debug!(count, "positive event counted; not a prompt point");
            report(callback, PromptOutcome::not_shown());
            return Ok(PromptOutcome::not_shown());
        }

        info!(count, "positive event count reached a prompt point");
        self.show_initial_dialog(callback).await
    }

    /// Shows the rate / later / never dialog and records the choice.
    ///
    /// Accepting hands over to [`store_review`](Self::store_review) without
    /// `callback`, so the callback only hears about delay and decline.  The
    /// returned outcome always carries the choice.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::Storage`] if recording the choice fails.  The
    /// error is returned before `callback` runs, so a host that relies on the
    /// callback alone hears nothing for that prompt.
    pub async fn show_initial_dialog(
        &self,
        callback: Option<RatingCallback>,
    ) -> Result<PromptOutcome, RatingError> {
        let labels = self.config.action_labels();
        let buttons: Vec<String> = DIALOG_ACTIONS
            .iter()
            .map(|&action| label_for(labels, action).to_string())
            .collect();

        let pressed = self
            .platform
            .alert(self.config.rate_title(), self.config.rate_prompt(), &buttons)
            .await;

        let choice = match pressed {
            Some(index) => match DIALOG_ACTIONS.get(index) {
                Some(&action) => action,
                None => {
                    warn!(index, "alert reported a button that was not offered");
                    return Ok(PromptOutcome::dismissed());
                }
            },
            None => {
                debug!("rating dialog dismissed without a choice");
                return Ok(PromptOutcome::dismissed());
            }
        };

        info!(?choice, "rating dialog answered");
        match choice {
            RatingResult::Accept => self.store_review(None).await?,
            RatingResult::Delay => report(callback, PromptOutcome::chosen(choice)),
            RatingResult::Decline => {
                self.store.record_decline().await?;
                report(callback, PromptOutcome::chosen(choice));
            }
        }
        Ok(PromptOutcome::chosen(choice))
    }

    /// Records the rating and sends the user to the store.
    ///
    /// The rated timestamp is written first and `callback` hears
    /// `(true, Some(Accept))` before the platform action starts.  On iOS the
    /// native review sheet is used when available; otherwise the store page
    /// URL is opened.  Platform failures are logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::Storage`] if the rated timestamp cannot be
    /// written.  `callback` is not invoked and no platform action starts in
    /// that case.
    pub async fn store_review(&self, callback: Option<RatingCallback>) -> Result<(), RatingError> {
        let os = self.platform.os();
        let url = store_url(os, self.config.app_store_id());

        self.store.record_rated().await?;
        report(callback, PromptOutcome::chosen(RatingResult::Accept));

        let attempt = if os == MobileOs::Ios && self.platform.native_review_available() {
            debug!("requesting native review sheet");
            self.platform.request_native_review().await
        } else {
            debug!(%url, "opening store review page");
            self.platform.open_url(&url).await
        };
        if let Err(e) = attempt {
            warn!("store review action failed: {e}");
        }
        Ok(())
    }

    /// Clears all stored rating data.  For development and testing.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::Storage`] if the record cannot be cleared.
    pub async fn reset_data(&self) -> Result<(), RatingError> {
        self.store.reset_data().await?;
        info!("rating data reset");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
