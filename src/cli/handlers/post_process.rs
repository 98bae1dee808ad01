//! Post-process command handler
//!
//! Job status detection for a download client. The client supplies the job
//! outcome through NZBPP_* environment variables; this handler composes the
//! notification payload from them and hands off to the dispatcher.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::services::notifications::{
    DispatchReport, Dispatcher, NotificationPayload, split_server_list,
};

/// Overall job status variable, `SUCCESS` when the download completed
pub const TOTAL_STATUS_ENV: &str = "NZBPP_TOTALSTATUS";
/// Job name variable
pub const NZB_NAME_ENV: &str = "NZBPP_NZBNAME";
/// Fallback job file name variable
pub const NZB_FILENAME_ENV: &str = "NZBPP_NZBFILENAME";

const SUCCESS_TITLE: &str = "Download Successful";
const FAILURE_TITLE: &str = "Download Failed";

fn is_success(total_status: &str) -> bool {
    total_status.eq_ignore_ascii_case("SUCCESS")
}

fn title_for(success: bool) -> &'static str {
    if success { SUCCESS_TITLE } else { FAILURE_TITLE }
}

/// Handler for the post-process command
pub struct PostProcessCommandHandler {
    config: Settings,
}

impl PostProcessCommandHandler {
    /// Create a new post-process command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Detect the job status from the environment and notify the configured
    /// server list.
    ///
    /// Returns the dispatch report, or `None` when the notification was
    /// suppressed by the on_success/on_failure gates or no servers are
    /// configured. Per-target failures never fail the surrounding job.
    pub async fn execute(&self) -> AppResult<Option<DispatchReport>> {
        let total_status = std::env::var(TOTAL_STATUS_ENV).map_err(|_| AppError::BadRequest {
            message: format!(
                "{TOTAL_STATUS_ENV} is not set; post-process mode must run inside a \
                 download client post-processing step"
            ),
        })?;

        let success = is_success(&total_status);
        if success && !self.config.notify.on_success {
            debug!("Success notifications suppressed");
            return Ok(None);
        }
        if !success && !self.config.notify.on_failure {
            debug!("Failure notifications suppressed");
            return Ok(None);
        }

        let servers = &self.config.notify.servers;
        if split_server_list(servers).is_empty() {
            warn!("No servers configured; nothing to notify");
            return Ok(None);
        }

        let body = std::env::var(NZB_NAME_ENV)
            .or_else(|_| std::env::var(NZB_FILENAME_ENV))
            .unwrap_or_default();

        let payload = NotificationPayload::new(
            title_for(success),
            body,
            self.config.notify.include_image,
        );

        let dispatcher = Dispatcher::new(
            self.config.notify.concurrency,
            Duration::from_secs(self.config.notify.delivery_timeout_seconds),
        );
        let report = dispatcher.dispatch(servers, &payload).await;

        info!(
            success,
            delivered = report.delivered(),
            failed = report.failed(),
            skipped = report.skipped(),
            "post-process notification dispatched"
        );

        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_detection() {
        assert!(is_success("SUCCESS"));
        assert!(is_success("success"));
        assert!(!is_success("FAILURE"));
        assert!(!is_success("WARNING"));
        assert!(!is_success(""));
    }

    #[test]
    fn test_titles_follow_status() {
        assert_eq!(title_for(true), SUCCESS_TITLE);
        assert_eq!(title_for(false), FAILURE_TITLE);
    }
}
