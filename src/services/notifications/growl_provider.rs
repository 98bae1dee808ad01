//! Growl notification provider implementation.
//!
//! Notifies a Growl server addressed as `growl://[password@]host[:port]`.
//! Growl requires registered application identity, so every notification
//! carries fixed application constants naming this tool as the source.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::json;

use super::descriptor::AddressDescriptor;
use super::error::{NotifyError, NotifyResult};
use super::provider::{
    NOTIFY_IMAGE_URL, NotificationPayload, NotificationProvider, NotificationResult,
};
use crate::external::client::HTTP_CLIENT;

/// Application identity registered with the Growl server
pub const GROWL_APPLICATION_ID: &str = "notify-rs";
/// Notification class shown in Growl's preference pane
pub const GROWL_NOTIFICATION_TITLE: &str = "Download Notification";

const DEFAULT_GROWL_PORT: u16 = 23053;

/// Growl server configuration
#[derive(Debug, Clone)]
pub struct GrowlConfig {
    pub host: String,
    pub port: u16,
    /// Registration password, when the server requires one
    pub password: Option<String>,
    pub application_id: String,
    pub notification_title: String,
    pub include_image: bool,
}

impl GrowlConfig {
    /// Builds the config from a parsed address.
    ///
    /// The host is required. A lone credential token acts as the Growl
    /// password (`growl://mypass@localhost`).
    pub fn from_descriptor(
        descriptor: &AddressDescriptor,
        include_image: bool,
    ) -> NotifyResult<Self> {
        let host = descriptor
            .host
            .clone()
            .ok_or_else(|| NotifyError::missing_field("growl", "host"))?;

        Ok(Self {
            host,
            port: descriptor.port.unwrap_or(DEFAULT_GROWL_PORT),
            password: descriptor
                .password
                .clone()
                .or_else(|| descriptor.user.clone()),
            application_id: GROWL_APPLICATION_ID.to_string(),
            notification_title: GROWL_NOTIFICATION_TITLE.to_string(),
            include_image,
        })
    }
}

/// Growl notification provider
pub struct GrowlProvider {
    config: GrowlConfig,
}

impl GrowlProvider {
    pub fn new(config: GrowlConfig) -> Self {
        Self { config }
    }

    fn build_api_url(&self) -> String {
        format!("http://{}:{}/notify", self.config.host, self.config.port)
    }

    fn build_request_body(&self, payload: &NotificationPayload) -> serde_json::Value {
        let mut body = json!({
            "application": self.config.application_id,
            "notification": self.config.notification_title,
            "title": payload.title,
            "text": payload.body,
        });

        if let Some(password) = &self.config.password {
            body["password"] = json!(password);
        }

        if self.config.include_image {
            body["icon"] = json!(NOTIFY_IMAGE_URL);
        }

        body
    }
}

#[async_trait]
impl NotificationProvider for GrowlProvider {
    async fn send(&self, payload: &NotificationPayload) -> NotifyResult<NotificationResult> {
        let start = Instant::now();

        let response = HTTP_CLIENT
            .post(self.build_api_url())
            .json(&self.build_request_body(payload))
            .send()
            .await;

        let duration_ms = start.elapsed().as_millis() as u64;

        match response {
            Ok(resp) => {
                let status_code = resp.status().as_u16();
                let success = resp.status().is_success();
                let response_text = resp.text().await.ok();

                Ok(NotificationResult {
                    success,
                    status_code: Some(status_code),
                    response: response_text,
                    duration_ms,
                })
            }
            Err(e) => Ok(NotificationResult::transport_failure(e, duration_ms)),
        }
    }

    fn name(&self) -> &'static str {
        "growl"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::descriptor::parse_address;

    #[test]
    fn test_from_descriptor_defaults_port() {
        let d = parse_address("growl://localhost", "unknown").unwrap();
        let config = GrowlConfig::from_descriptor(&d, false).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, DEFAULT_GROWL_PORT);
        assert_eq!(config.password, None);
    }

    #[test]
    fn test_from_descriptor_lone_credential_is_password() {
        let d = parse_address("growl://mypass@localhost:23054", "unknown").unwrap();
        let config = GrowlConfig::from_descriptor(&d, false).unwrap();
        assert_eq!(config.password.as_deref(), Some("mypass"));
        assert_eq!(config.port, 23054);
    }

    #[test]
    fn test_from_descriptor_requires_host() {
        let d = parse_address("growl://", "unknown").unwrap();
        assert!(GrowlConfig::from_descriptor(&d, false).is_err());
    }

    #[test]
    fn test_build_request_body_carries_application_identity() {
        let d = parse_address("growl://localhost", "unknown").unwrap();
        let provider = GrowlProvider::new(GrowlConfig::from_descriptor(&d, true).unwrap());

        let payload = NotificationPayload::new("Download Successful", "file.nzb", true);
        let body = provider.build_request_body(&payload);

        assert_eq!(body["application"], GROWL_APPLICATION_ID);
        assert_eq!(body["notification"], GROWL_NOTIFICATION_TITLE);
        assert_eq!(body["title"], "Download Successful");
        assert_eq!(body["icon"], NOTIFY_IMAGE_URL);
    }
}
