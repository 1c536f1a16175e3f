//! # rating-core
//!
//! Shared domain library for the rating requestor: the effective dialog
//! configuration, the prompt timing policy, and the persisted rating record.
//!
//! This crate has zero dependencies on async runtimes, storage backends, or
//! platform UI.  Everything here can be compiled and tested on any machine.
//!
//! # What does the rating requestor do?
//!
//! A host application reports *positive events* (a finished level, a saved
//! document, a successful sync).  Each event bumps a persisted counter.  When
//! the timing policy says the counter has reached a prompt point, the user is
//! shown a dialog offering to rate the app now, later, or never.  Rating or
//! declining is permanent: the user is never asked again.
//!
//! - **`domain::config`** – Default dialog text for an app name, merged with
//!   caller overrides into one immutable [`RatingConfig`].
//! - **`domain::timing`** – The default log-base-3 prompt cadence.
//! - **`domain::store`** – Which mobile OS is running and where its store
//!   review page lives.
//! - **`domain::state`** – The persisted [`RatingState`] record and the
//!   outcome types reported back to the host.

pub mod domain;

pub use domain::config::{
    ActionLabelOverrides, ActionLabels, ConfigError, ConfigOverrides, RatingConfig, TimingFunction,
};
pub use domain::state::{PromptOutcome, RatingPhase, RatingResult, RatingState, TrackedAction};
pub use domain::store::{store_url, MobileOs};
pub use domain::timing::default_timing_function;
