//! Infrastructure layer for the rating requestor.
//!
//! Contains adapters behind the application-layer ports.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `rating_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`storage`** – [`RatingStore`] implementations: an in-memory record for
//!   tests and short-lived hosts, and a TOML file in the platform data
//!   directory for durable use.
//!
//! - **`platform`** – A recording [`RatingPlatform`] double with scripted
//!   dialog answers.  Real hosts implement the trait over their own UI
//!   toolkit.
//!
//! [`RatingStore`]: crate::application::request_rating::RatingStore
//! [`RatingPlatform`]: crate::application::request_rating::RatingPlatform

pub mod platform;
pub mod storage;
