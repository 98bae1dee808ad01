//! Send command handler
//!
//! Delivers one notification to the addressed push services.

use std::time::Duration;

use tracing::info;

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::services::notifications::{
    DispatchReport, Dispatcher, NotificationPayload, split_server_list,
};

/// Handler for the send command
pub struct SendCommandHandler {
    config: Settings,
}

impl SendCommandHandler {
    /// Create a new send command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Send one notification to every addressed target.
    ///
    /// `servers` falls back to the configured server list when not given on
    /// the command line. Per-target failures are logged and reported but do
    /// not fail the command; only having nothing to deliver to does.
    pub async fn execute(&self, title: &str, body: &str) -> AppResult<DispatchReport> {
        let servers = &self.config.notify.servers;
        if split_server_list(servers).is_empty() {
            return Err(AppError::BadRequest {
                message: "No servers were specified; use --servers or configure notify.servers"
                    .to_string(),
            });
        }

        let payload =
            NotificationPayload::new(title, body, self.config.notify.include_image);
        let report = self.dispatcher().dispatch(servers, &payload).await;

        info!(
            delivered = report.delivered(),
            failed = report.failed(),
            skipped = report.skipped(),
            "notification dispatched"
        );

        Ok(report)
    }

    fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(
            self.config.notify.concurrency,
            Duration::from_secs(self.config.notify.delivery_timeout_seconds),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_servers_is_an_error() {
        let handler = SendCommandHandler::new(Settings::default());
        let result = handler.execute("title", "body").await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_unparseable_servers_still_complete() {
        let mut config = Settings::default();
        config.notify.servers = "://nohost, bogus://x".to_string();

        let handler = SendCommandHandler::new(config);
        let report = handler.execute("title", "body").await.unwrap();
        assert_eq!(report.attempted(), 2);
        assert_eq!(report.skipped(), 2);
    }
}
