//! rating-requestor library entry point.
//!
//! Decides when to ask a mobile app's user for a store rating and drives the
//! prompt flow.
//!
//! # How it fits together
//!
//! The host app creates one [`RatingRequestor`] at startup with its store
//! identifier, display name, a storage adapter, and a platform adapter.  It
//! then calls [`RatingRequestor::handle_positive_event`] whenever the user
//! does something that suggests they are happy with the app:
//!
//! 1. The stored record is checked.  Once the user has rated or declined,
//!    nothing else happens, ever.
//! 2. The stored event counter is incremented.
//! 3. The timing function looks at the new count.  At a prompt point the
//!    platform alert is shown with "Rate", "Maybe Later", and "No, Thanks".
//! 4. The user's choice is recorded and reported back.
//!
//! ```ignore
//! let requestor = RatingRequestor::new(
//!     "1234567890",
//!     "Puzzles",
//!     None,
//!     Arc::new(TomlRatingStore::open_default()?),
//!     Arc::new(MyPlatform::new()),
//! )?;
//!
//! let outcome = requestor.handle_positive_event(None).await?;
//! ```

/// Application layer: the rating flow and its ports.
pub mod application;

/// Infrastructure layer: storage and platform adapters.
pub mod infrastructure;

pub use application::request_rating::{
    PlatformError, RatingCallback, RatingError, RatingPlatform, RatingRequestor, RatingStore,
    StorageError,
};
pub use infrastructure::platform::MockRatingPlatform;
pub use infrastructure::storage::{MemoryRatingStore, TomlRatingStore};
pub use rating_core::{
    store_url, ConfigOverrides, MobileOs, PromptOutcome, RatingConfig, RatingResult,
};
