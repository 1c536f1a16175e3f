//! Effective dialog configuration for one rating requestor.
//!
//! A [`RatingConfig`] is built once from three inputs:
//!
//! 1. The app's store identifier (required, must be non-empty).
//! 2. The app's display name, interpolated into the default title, prompt,
//!    and "accept" label.
//! 3. Optional [`ConfigOverrides`] from the host, merged field by field over
//!    the defaults.  Action labels merge individually, so overriding only the
//!    decline label keeps the other three defaults.
//!
//! The result is immutable and owned by the controller that built it.
//!
//! # Overrides from TOML
//!
//! Dialog text can live in a host config file:
//!
//! ```toml
//! rate_title = "Enjoying Puzzles?"
//!
//! [action_labels]
//! decline = "Never"
//! ```
//!
//! The timing function is code, not text, and is only settable through
//! [`ConfigOverrides::with_timing_function`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::timing::default_timing_function;

/// Decides from the cumulative positive-event count whether to prompt now.
pub type TimingFunction = Arc<dyn Fn(u64) -> bool + Send + Sync>;

/// Error type for building a [`RatingConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The app store identifier was empty.
    #[error("an app store identifier is required to request ratings")]
    MissingAppStoreId,

    /// Override text could not be parsed.
    #[error("failed to parse rating config overrides: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config types ──────────────────────────────────────────────────────────────

/// Display strings for the four dialog actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLabels {
    pub decline: String,
    pub delay: String,
    /// Reserved; no dialog button uses it yet.
    pub feedback: String,
    pub accept: String,
}

impl ActionLabels {
    /// Default labels for `app_name`.
    pub fn for_app(app_name: &str) -> Self {
        Self {
            decline: "No, Thanks".to_string(),
            delay: "Maybe Later".to_string(),
            feedback: "I Will".to_string(),
            accept: format!("Rate {app_name}"),
        }
    }

    fn merge(&mut self, overrides: ActionLabelOverrides) {
        if let Some(decline) = overrides.decline {
            self.decline = decline;
        }
        if let Some(delay) = overrides.delay {
            self.delay = delay;
        }
        if let Some(feedback) = overrides.feedback {
            self.feedback = feedback;
        }
        if let Some(accept) = overrides.accept {
            self.accept = accept;
        }
    }
}

/// Per-label overrides; `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionLabelOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
}

/// Caller-supplied partial configuration.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_prompt: Option<String>,
    pub action_labels: ActionLabelOverrides,
    #[serde(skip)]
    pub timing_function: Option<TimingFunction>,
}

impl ConfigOverrides {
    /// Parses dialog text overrides from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `content` is not valid TOML or does
    /// not match the override schema.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Replaces the timing function.
    pub fn with_timing_function<F>(mut self, timing: F) -> Self
    where
        F: Fn(u64) -> bool + Send + Sync + 'static,
    {
        self.timing_function = Some(Arc::new(timing));
        self
    }
}

impl fmt::Debug for ConfigOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverrides")
            .field("rate_title", &self.rate_title)
            .field("rate_prompt", &self.rate_prompt)
            .field("action_labels", &self.action_labels)
            .field("timing_function", &self.timing_function.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

/// The effective configuration a controller runs with.
#[derive(Clone)]
pub struct RatingConfig {
    app_store_id: String,
    rate_title: String,
    rate_prompt: String,
    action_labels: ActionLabels,
    timing_function: TimingFunction,
}

impl RatingConfig {
    /// Builds the default configuration for `app_name` and merges `overrides`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAppStoreId`] when `app_store_id` is empty.
    pub fn build(
        app_store_id: &str,
        app_name: &str,
        overrides: Option<ConfigOverrides>,
    ) -> Result<Self, ConfigError> {
        if app_store_id.is_empty() {
            return Err(ConfigError::MissingAppStoreId);
        }

        let mut config = Self {
            app_store_id: app_store_id.to_string(),
            rate_title: format!("Rate {app_name}?"),
            rate_prompt: format!(
                "We're glad you love {app_name}! Please take a moment to rate your experience.  Thank you so much!"
            ),
            action_labels: ActionLabels::for_app(app_name),
            timing_function: Arc::new(default_timing_function),
        };

        if let Some(overrides) = overrides {
            debug!(?overrides, "merging rating config overrides");
            config.merge(overrides);
        }
        Ok(config)
    }

    fn merge(&mut self, overrides: ConfigOverrides) {
        if let Some(title) = overrides.rate_title {
            self.rate_title = title;
        }
        if let Some(prompt) = overrides.rate_prompt {
            self.rate_prompt = prompt;
        }
        self.action_labels.merge(overrides.action_labels);
        if let Some(timing) = overrides.timing_function {
            self.timing_function = timing;
        }
    }

    pub fn app_store_id(&self) -> &str {
        &self.app_store_id
    }

    pub fn rate_title(&self) -> &str {
        &self.rate_title
    }

    pub fn rate_prompt(&self) -> &str {
        &self.rate_prompt
    }

    pub fn action_labels(&self) -> &ActionLabels {
        &self.action_labels
    }

    /// Evaluates the timing function for the current event count.
    pub fn should_prompt(&self, count: u64) -> bool {
        (self.timing_function)(count)
    }
}

impl fmt::Debug for RatingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatingConfig")
            .field("app_store_id", &self.app_store_id)
            .field("rate_title", &self.rate_title)
            .field("rate_prompt", &self.rate_prompt)
            .field("action_labels", &self.action_labels)
            .finish_non_exhaustive()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
