//! The persisted rating record and the outcomes reported to the host.
//!
//! # State machine
//!
//! ```text
//!            positive event (no prompt) / "Maybe Later"
//!              ┌──────────┐
//!              ▼          │
//!          ┌──────────┐───┘
//!          │ Awaiting │
//!          └──────────┘
//!        decline │   │ accept
//!                ▼   ▼
//!       ┌──────────┐ ┌───────┐
//!       │ Declined │ │ Rated │   (terminal)
//!       └──────────┘ └───────┘
//! ```
//!
//! The phase is never stored directly.  It is derived from which action
//! timestamps are set, so a record written by any version of the store reads
//! back consistently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A timestamped action tracked in the persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedAction {
    /// The user chose "No, Thanks".
    Declined,
    /// The user was sent to the store review flow.
    Rated,
    /// Reserved for a future feedback flow; never set by the controller.
    Feedback,
}

impl TrackedAction {
    /// Every tracked action, in storage order.
    pub const ALL: [TrackedAction; 3] =
        [TrackedAction::Declined, TrackedAction::Rated, TrackedAction::Feedback];
}

/// The user's choice in the rating dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingResult {
    Accept,
    Delay,
    Decline,
}

/// What one call reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PromptOutcome {
    /// Whether the rating dialog was shown.
    pub did_appear: bool,
    /// The user's choice, if the dialog appeared and a button was pressed.
    pub result: Option<RatingResult>,
}

impl PromptOutcome {
    /// The dialog did not appear.
    pub const fn not_shown() -> Self {
        Self { did_appear: false, result: None }
    }

    /// The dialog appeared and the user chose `result`.
    pub const fn chosen(result: RatingResult) -> Self {
        Self { did_appear: true, result: Some(result) }
    }

    /// The dialog appeared but was dismissed without a choice.
    pub const fn dismissed() -> Self {
        Self { did_appear: true, result: None }
    }
}

/// Conceptual phase derived from a [`RatingState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingPhase {
    Awaiting,
    Declined,
    Rated,
}

/// The durable rating record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declined: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<DateTime<Utc>>,
    /// Positive events counted while awaiting a decision.
    pub event_count: u64,
}

impl RatingState {
    /// Returns the timestamp recorded for `action`.
    pub fn timestamp(&self, action: TrackedAction) -> Option<DateTime<Utc>> {
        match action {
            TrackedAction::Declined => self.declined,
            TrackedAction::Rated => self.rated,
            TrackedAction::Feedback => self.feedback,
        }
    }

    /// Every tracked action paired with its timestamp, in storage order.
    pub fn action_timestamps(&self) -> Vec<(TrackedAction, Option<DateTime<Utc>>)> {
        TrackedAction::ALL
            .iter()
            .map(|&action| (action, self.timestamp(action)))
            .collect()
    }

    /// `true` while no tracked action has been recorded.
    pub fn is_awaiting(&self) -> bool {
        TrackedAction::ALL
            .iter()
            .all(|&action| self.timestamp(action).is_none())
    }

    /// Derives the state-machine phase.  A decline wins if both are set.
    pub fn phase(&self) -> RatingPhase {
        if self.declined.is_some() {
            RatingPhase::Declined
        } else if self.rated.is_some() {
            RatingPhase::Rated
        } else {
            RatingPhase::Awaiting
        }
    }

    /// Bumps the event count and returns the new value.
    pub fn increment(&mut self) -> u64 {
        self.event_count = self.event_count.saturating_add(1);
        self.event_count
    }

    pub fn record(&mut self, action: TrackedAction, at: DateTime<Utc>) {
        match action {
            TrackedAction::Declined => self.declined = Some(at),
            TrackedAction::Rated => self.rated = Some(at),
            TrackedAction::Feedback => self.feedback = Some(at),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
