//! Super Toasty notification provider implementation.
//!
//! Addressed as `toasty://[user@]device[/device2/...]`. The host position
//! holds the first device, so at least one device is always required.

use std::time::Instant;

use async_trait::async_trait;

use super::descriptor::{AddressDescriptor, split_path_list};
use super::error::{NotifyError, NotifyResult};
use super::provider::{NotificationPayload, NotificationProvider, NotificationResult};
use crate::external::client::HTTP_CLIENT;

const TOASTY_API_URL: &str = "http://api.supertoasty.com/notify";

/// Super Toasty configuration
#[derive(Debug, Clone)]
pub struct ToastyConfig {
    /// Raw device list string: host concatenated with the decoded path;
    /// split at send time
    pub devices: String,
    /// Sender name shown on the device, from the credential position
    pub sender: Option<String>,
    pub include_image: bool,
}

impl ToastyConfig {
    pub fn from_descriptor(
        descriptor: &AddressDescriptor,
        include_image: bool,
    ) -> NotifyResult<Self> {
        let first_device = descriptor
            .host
            .clone()
            .ok_or_else(|| NotifyError::missing_field("toasty", "devices"))?;

        let remainder = descriptor.path_remainder();
        let devices = if remainder.is_empty() {
            first_device
        } else {
            format!("{first_device}/{remainder}")
        };

        Ok(Self {
            devices,
            sender: descriptor.user.clone(),
            include_image,
        })
    }
}

/// Super Toasty notification provider
pub struct ToastyProvider {
    config: ToastyConfig,
}

impl ToastyProvider {
    pub fn new(config: ToastyConfig) -> Self {
        Self { config }
    }

    fn build_device_url(&self, device: &str) -> String {
        format!("{TOASTY_API_URL}/{device}")
    }

    fn build_form(&self, payload: &NotificationPayload) -> Vec<(&'static str, String)> {
        vec![
            (
                "sender",
                self.config
                    .sender
                    .clone()
                    .unwrap_or_else(|| "notify-rs".to_string()),
            ),
            ("title", payload.title.clone()),
            ("text", payload.body.clone()),
        ]
    }
}

#[async_trait]
impl NotificationProvider for ToastyProvider {
    /// Notifies each device in turn; the attempt counts as successful only
    /// when every device accepted it.
    async fn send(&self, payload: &NotificationPayload) -> NotifyResult<NotificationResult> {
        let start = Instant::now();
        let form = self.build_form(payload);

        let mut success = true;
        let mut last_status = None;
        let mut last_response = None;

        for device in split_path_list(&self.config.devices) {
            let response = HTTP_CLIENT
                .post(self.build_device_url(&device))
                .form(&form)
                .send()
                .await;

            match response {
                Ok(resp) => {
                    success &= resp.status().is_success();
                    last_status = Some(resp.status().as_u16());
                    last_response = resp.text().await.ok();
                }
                Err(e) => {
                    success = false;
                    last_status = None;
                    last_response = Some(e.to_string());
                }
            }
        }

        Ok(NotificationResult {
            success,
            status_code: last_status,
            response: last_response,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "toasty"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::descriptor::parse_address;

    #[test]
    fn test_host_is_first_device() {
        let d = parse_address("toasty://user@device1/device2/device3", "unknown").unwrap();
        let config = ToastyConfig::from_descriptor(&d, false).unwrap();
        assert_eq!(config.devices, "device1/device2/device3");
        assert_eq!(config.sender.as_deref(), Some("user"));
    }

    #[test]
    fn test_single_device() {
        let d = parse_address("toasty://device1", "unknown").unwrap();
        let config = ToastyConfig::from_descriptor(&d, false).unwrap();
        assert_eq!(config.devices, "device1");
        assert_eq!(config.sender, None);
    }

    #[test]
    fn test_at_least_one_device_required() {
        let d = parse_address("toasty://", "unknown").unwrap();
        assert!(ToastyConfig::from_descriptor(&d, false).is_err());
    }

    #[test]
    fn test_device_url() {
        let d = parse_address("toasty://device1", "unknown").unwrap();
        let provider = ToastyProvider::new(ToastyConfig::from_descriptor(&d, false).unwrap());
        assert_eq!(
            provider.build_device_url("device1"),
            "http://api.supertoasty.com/notify/device1"
        );
    }
}
