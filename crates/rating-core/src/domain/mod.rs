//! Domain entities for the rating requestor.
//!
//! Pure business rules only: no storage, no platform dialogs.  The
//! `rating-requestor` crate layers the async flow and adapters on top.

/// Dialog text, action labels, and the timing function.
pub mod config;

/// Persisted rating record and reported outcomes.
pub mod state;

/// Mobile OS and store page URLs.
pub mod store;

/// The default prompt cadence.
pub mod timing;
