//! Core notification provider trait and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::NotifyResult;

/// Remote status image attached to notifications when a backend supports
/// one and the caller asked for it.
pub const NOTIFY_IMAGE_URL: &str =
    "https://raw.githubusercontent.com/notify-rs/notify-rs/main/assets/notify-72x72.png";

/// Notification content routed to every resolved target of one dispatch.
///
/// Supplied once by the caller and read-only through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    /// Attach a status image where the backend supports it
    pub include_image: bool,
}

impl NotificationPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>, include_image: bool) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            include_image,
        }
    }
}

/// Result of a single delivery attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Whether the backend accepted the notification
    pub success: bool,
    /// HTTP status code where the backend answered at all
    pub status_code: Option<u16>,
    /// Response body or transport error message
    pub response: Option<String>,
    /// Time taken for the attempt in milliseconds
    pub duration_ms: u64,
}

impl NotificationResult {
    /// Captures a transport-level failure as an unsuccessful result so the
    /// dispatcher can record it without aborting the run
    pub fn transport_failure(error: impl std::fmt::Display, duration_ms: u64) -> Self {
        Self {
            success: false,
            status_code: None,
            response: Some(error.to_string()),
            duration_ms,
        }
    }
}

/// Trait for push-notification backends.
///
/// One instance is constructed per address, used for a single delivery and
/// discarded. All providers must be Send + Sync so deliveries can run on a
/// bounded worker pool.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Performs one delivery attempt.
    ///
    /// Transport failures are reported through the returned
    /// [`NotificationResult`] rather than an `Err`, so a slow or
    /// unreachable backend never poisons the surrounding dispatch.
    async fn send(&self, payload: &NotificationPayload) -> NotifyResult<NotificationResult>;

    /// Returns the provider name for logging
    fn name(&self) -> &'static str;
}
