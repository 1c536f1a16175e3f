//! App store destinations.
//!
//! The review flow needs to know which mobile OS it is running on: iOS may
//! offer a native in-app review sheet, and each OS has its own store URL
//! scheme for the fallback.

use serde::{Deserialize, Serialize};

/// The mobile OS the host app is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobileOs {
    Ios,
    Android,
}

/// Builds the store page URL where the user can leave a review.
///
/// ```
/// use rating_core::{store_url, MobileOs};
///
/// assert_eq!(store_url(MobileOs::Android, "com.example.puzzles"), "market://details?id=com.example.puzzles");
/// ```
pub fn store_url(os: MobileOs, app_store_id: &str) -> String {
    match os {
        MobileOs::Ios => format!(
            "https://itunes.apple.com/WebObjects/MZStore.woa/wa/viewContentsUserReviews?id={app_store_id}&pageNumber=0&sortOrdering=2&type=Purple+Software&mt=8"
        ),
        MobileOs::Android => format!("market://details?id={app_store_id}"),
    }
}
