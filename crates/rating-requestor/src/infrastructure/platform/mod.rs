//! Platform adapters for the review flow and rating dialog.
//!
//! Real hosts implement [`RatingPlatform`] over their own UI toolkit: an
//! alert primitive, a URL opener, and (on iOS 10.3+) the native review
//! sheet.  [`MockRatingPlatform`] is always compiled so tests on any machine
//! can drive the full flow without a device.
//!
//! [`RatingPlatform`]: crate::application::request_rating::RatingPlatform

pub mod mock;

pub use mock::{AlertRecord, MockRatingPlatform};
