//! Mock platform for tests and headless hosts.
//!
//! # Why a mock platform?
//!
//! The real capabilities (modal alerts, the native review sheet, opening the
//! store app) need a device and a user.  `MockRatingPlatform` replaces each
//! with in-memory recording, and answers alerts from a script of button
//! indices queued ahead of time.
//!
//! # Usage in tests
//!
//! ```ignore
//! let platform = Arc::new(MockRatingPlatform::new(MobileOs::Android));
//! platform.queue_choice(Some(2)); // press "No, Thanks"
//!
//! requestor.show_initial_dialog(None).await?;
//!
//! assert_eq!(platform.alerts.lock().unwrap().len(), 1);
//! ```
//!
//! An empty script answers `None`, i.e. the alert was dismissed.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use rating_core::MobileOs;

use crate::application::request_rating::{PlatformError, RatingPlatform};

/// One alert presented through the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRecord {
    pub title: String,
    pub message: String,
    pub buttons: Vec<String>,
}

/// A platform that records every call without touching a device.
#[derive(Debug)]
pub struct MockRatingPlatform {
    pub os: MobileOs,
    pub native_review_available: bool,
    /// Every alert presented, in order.
    pub alerts: Mutex<Vec<AlertRecord>>,
    /// Every URL passed to `open_url`.
    pub opened_urls: Mutex<Vec<String>>,
    /// Number of native review sheet requests.
    pub native_review_requests: Mutex<u32>,
    /// When `true`, `open_url` and `request_native_review` return an error
    /// after recording the call.
    pub should_fail: bool,
    choices: Mutex<VecDeque<Option<usize>>>,
}

impl MockRatingPlatform {
    /// Creates a mock for `os` with no native review sheet and an empty script.
    pub fn new(os: MobileOs) -> Self {
        Self {
            os,
            native_review_available: false,
            alerts: Mutex::new(Vec::new()),
            opened_urls: Mutex::new(Vec::new()),
            native_review_requests: Mutex::new(0),
            should_fail: false,
            choices: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_native_review(mut self) -> Self {
        self.native_review_available = true;
        self
    }

    pub fn failing(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Queues the answer for the next alert.
    pub fn queue_choice(&self, index: Option<usize>) {
        self.choices.lock().unwrap().push_back(index);
    }
}

#[async_trait]
impl RatingPlatform for MockRatingPlatform {
    fn os(&self) -> MobileOs {
        self.os
    }

    fn native_review_available(&self) -> bool {
        self.native_review_available
    }

    async fn request_native_review(&self) -> Result<(), PlatformError> {
        *self.native_review_requests.lock().unwrap() += 1;
        if self.should_fail {
            return Err(PlatformError::NativeReview("mock failure".into()));
        }
        Ok(())
    }

    async fn open_url(&self, url: &str) -> Result<(), PlatformError> {
        self.opened_urls.lock().unwrap().push(url.to_string());
        if self.should_fail {
            return Err(PlatformError::OpenUrl {
                url: url.to_string(),
                reason: "mock failure".into(),
            });
        }
        Ok(())
    }

    async fn alert(&self, title: &str, message: &str, buttons: &[String]) -> Option<usize> {
        self.alerts.lock().unwrap().push(AlertRecord {
            title: title.to_string(),
            message: message.to_string(),
            buttons: buttons.to_vec(),
        });
        self.choices.lock().unwrap().pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_alert_answers_from_script_then_dismisses() {
        // Arrange
        let platform = MockRatingPlatform::new(MobileOs::Ios);
        platform.queue_choice(Some(1));
        let buttons = vec!["a".to_string(), "b".to_string()];

        // Act
        let first = platform.alert("t", "m", &buttons).await;
        let second = platform.alert("t", "m", &buttons).await;

        // Assert
        assert_eq!(first, Some(1));
        assert_eq!(second, None);
        assert_eq!(platform.alerts.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_mock_records_url_then_errors() {
        let platform = MockRatingPlatform::new(MobileOs::Android).failing();

        let result = platform.open_url("market://details?id=x").await;

        assert!(result.is_err());
        assert_eq!(*platform.opened_urls.lock().unwrap(), vec!["market://details?id=x"]);
    }
}
