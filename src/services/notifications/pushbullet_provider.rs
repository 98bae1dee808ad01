//! PushBullet notification provider implementation.
//!
//! Addressed as `pbul://accesstoken[/recipient/...]`. Recipients may be
//! device names, `#channel` tags, or email addresses, mixed freely; an
//! empty recipient list notifies all of the account's devices.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::json;

use super::descriptor::{AddressDescriptor, split_path_list};
use super::error::{NotifyError, NotifyResult};
use super::provider::{NotificationPayload, NotificationProvider, NotificationResult};
use crate::external::client::HTTP_CLIENT;

const PUSHBULLET_API_URL: &str = "https://api.pushbullet.com/v2/pushes";

/// PushBullet configuration
#[derive(Debug, Clone)]
pub struct PushBulletConfig {
    pub accesstoken: String,
    /// Raw recipient list string off the address path; split at send time
    pub recipients: String,
    pub include_image: bool,
}

impl PushBulletConfig {
    pub fn from_descriptor(
        descriptor: &AddressDescriptor,
        include_image: bool,
    ) -> NotifyResult<Self> {
        let accesstoken = descriptor
            .host
            .clone()
            .ok_or_else(|| NotifyError::missing_field("pbul", "accesstoken"))?;

        Ok(Self {
            accesstoken,
            recipients: descriptor.path_remainder(),
            include_image,
        })
    }
}

/// PushBullet notification provider
pub struct PushBulletProvider {
    config: PushBulletConfig,
}

impl PushBulletProvider {
    pub fn new(config: PushBulletConfig) -> Self {
        Self { config }
    }

    /// One request body per recipient. A `#` prefix targets a channel, an
    /// embedded `@` targets an email, anything else a device; no recipient
    /// targets every device on the account.
    fn build_request_bodies(&self, payload: &NotificationPayload) -> Vec<serde_json::Value> {
        let base = json!({
            "type": "note",
            "title": payload.title,
            "body": payload.body,
        });

        let recipients = split_path_list(&self.config.recipients);
        if recipients.is_empty() {
            return vec![base];
        }

        recipients
            .into_iter()
            .map(|recipient| {
                let mut body = base.clone();
                if let Some(channel) = recipient.strip_prefix('#') {
                    body["channel_tag"] = json!(channel);
                } else if recipient.contains('@') {
                    body["email"] = json!(recipient);
                } else {
                    body["device_iden"] = json!(recipient);
                }
                body
            })
            .collect()
    }
}

#[async_trait]
impl NotificationProvider for PushBulletProvider {
    /// Pushes once per recipient; the attempt counts as successful only
    /// when every recipient accepted it.
    async fn send(&self, payload: &NotificationPayload) -> NotifyResult<NotificationResult> {
        let start = Instant::now();

        let mut success = true;
        let mut last_status = None;
        let mut last_response = None;

        for body in self.build_request_bodies(payload) {
            let response = HTTP_CLIENT
                .post(PUSHBULLET_API_URL)
                .header("Access-Token", &self.config.accesstoken)
                .json(&body)
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
        "pushbullet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::descriptor::parse_address;

    #[test]
    fn test_empty_recipients_notifies_all_devices() {
        let d = parse_address("pbul://ACCESSTOKEN", "unknown").unwrap();
        let provider =
            PushBulletProvider::new(PushBulletConfig::from_descriptor(&d, false).unwrap());

        let payload = NotificationPayload::new("t", "b", false);
        let bodies = provider.build_request_bodies(&payload);
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].get("device_iden").is_none());
        assert!(bodies[0].get("channel_tag").is_none());
        assert!(bodies[0].get("email").is_none());
    }

    #[test]
    fn test_mixed_recipients() {
        let d = parse_address(
            "pbul://ACCESSTOKEN/%23channel/device/email@domain.net",
            "unknown",
        )
        .unwrap();
        let config = PushBulletConfig::from_descriptor(&d, false).unwrap();
        assert_eq!(config.recipients, "#channel/device/email@domain.net");

        let provider = PushBulletProvider::new(config);
        let payload = NotificationPayload::new("t", "b", false);
        let bodies = provider.build_request_bodies(&payload);

        assert_eq!(bodies.len(), 3);
        assert_eq!(bodies[0]["channel_tag"], "channel");
        assert_eq!(bodies[1]["device_iden"], "device");
        assert_eq!(bodies[2]["email"], "email@domain.net");
    }

    #[test]
    fn test_access_token_required() {
        let d = parse_address("pbul://", "unknown").unwrap();
        assert!(PushBulletConfig::from_descriptor(&d, false).is_err());
    }
}
