//! Pushover notification provider implementation.
//!
//! Addressed as `pover://userkey@apptoken[/device/...]`. Both the user key
//! and the application token are required; devices are optional and an
//! empty list notifies every device on the account.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::json;

use super::descriptor::{AddressDescriptor, split_path_list};
use super::error::{NotifyError, NotifyResult};
use super::provider::{NotificationPayload, NotificationProvider, NotificationResult};
use crate::external::client::HTTP_CLIENT;

const PUSHOVER_API_URL: &str = "https://api.pushover.net/1/messages.json";

/// Pushover configuration
#[derive(Debug, Clone)]
pub struct PushoverConfig {
    /// Application token, from the host position
    pub token: String,
    /// User key, from the credential position
    pub user: String,
    /// Raw device list string off the address path; split at send time
    pub devices: String,
    pub include_image: bool,
}

impl PushoverConfig {
    pub fn from_descriptor(
        descriptor: &AddressDescriptor,
        include_image: bool,
    ) -> NotifyResult<Self> {
        let token = descriptor
            .host
            .clone()
            .ok_or_else(|| NotifyError::missing_field("pover", "token"))?;

        let user = descriptor
            .user
            .clone()
            .ok_or_else(|| NotifyError::missing_field("pover", "user"))?;

        Ok(Self {
            token,
            user,
            devices: descriptor.path_remainder(),
            include_image,
        })
    }
}

/// Pushover notification provider
pub struct PushoverProvider {
    config: PushoverConfig,
}

impl PushoverProvider {
    pub fn new(config: PushoverConfig) -> Self {
        Self { config }
    }

    fn build_request_body(&self, payload: &NotificationPayload) -> serde_json::Value {
        let mut body = json!({
            "token": self.config.token,
            "user": self.config.user,
            "title": payload.title,
            "message": payload.body,
        });

        let devices = split_path_list(&self.config.devices);
        if !devices.is_empty() {
            body["device"] = json!(devices.join(","));
        }

        body
    }
}

#[async_trait]
impl NotificationProvider for PushoverProvider {
    async fn send(&self, payload: &NotificationPayload) -> NotifyResult<NotificationResult> {
        let start = Instant::now();

        let response = HTTP_CLIENT
            .post(PUSHOVER_API_URL)
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
        "pushover"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::descriptor::parse_address;

    #[test]
    fn test_token_and_user_mapping() {
        let d = parse_address("pover://user@TOKEN/deviceA/deviceB", "unknown").unwrap();
        let config = PushoverConfig::from_descriptor(&d, false).unwrap();
        assert_eq!(config.token, "TOKEN");
        assert_eq!(config.user, "user");
        assert_eq!(config.devices, "deviceA/deviceB");
        assert!(!config.include_image);
    }

    #[test]
    fn test_user_required() {
        let d = parse_address("pover://TOKEN", "unknown").unwrap();
        assert!(PushoverConfig::from_descriptor(&d, false).is_err());
    }

    #[test]
    fn test_devices_joined_for_request() {
        let d = parse_address("pover://user@TOKEN/deviceA/deviceB", "unknown").unwrap();
        let provider = PushoverProvider::new(PushoverConfig::from_descriptor(&d, false).unwrap());

        let payload = NotificationPayload::new("Download Successful", "file.nzb", false);
        let body = provider.build_request_body(&payload);

        assert_eq!(body["device"], "deviceA,deviceB");
        assert_eq!(body["message"], "file.nzb");
    }

    #[test]
    fn test_no_devices_targets_all() {
        let d = parse_address("pover://user@TOKEN", "unknown").unwrap();
        let provider = PushoverProvider::new(PushoverConfig::from_descriptor(&d, false).unwrap());

        let payload = NotificationPayload::new("t", "b", false);
        assert!(
            provider
                .build_request_body(&payload)
                .get("device")
                .is_none()
        );
    }
}
