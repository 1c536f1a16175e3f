//! Application layer use cases for the rating requestor.
//!
//! - **`request_rating`** – The positive-event handler, the three-option
//!   dialog, the store review flow, and the debug reset.  Storage and the
//!   platform UI are reached only through the [`RatingStore`] and
//!   [`RatingPlatform`] traits, which are injected at construction time.
//!
//! [`RatingStore`]: request_rating::RatingStore
//! [`RatingPlatform`]: request_rating::RatingPlatform

pub mod request_rating;
