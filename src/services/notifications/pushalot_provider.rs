//! Pushalot notification provider implementation.
//!
//! Addressed as `palot://authorizationtoken`; the token rides in the host
//! position.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::json;

use super::descriptor::AddressDescriptor;
use super::error::{NotifyError, NotifyResult};
use super::provider::{
    NOTIFY_IMAGE_URL, NotificationPayload, NotificationProvider, NotificationResult,
};
use crate::external::client::HTTP_CLIENT;

const PUSHALOT_API_URL: &str = "https://pushalot.com/api/sendmessage";

/// Pushalot configuration
#[derive(Debug, Clone)]
pub struct PushalotConfig {
    pub authtoken: String,
    pub include_image: bool,
}

impl PushalotConfig {
    pub fn from_descriptor(
        descriptor: &AddressDescriptor,
        include_image: bool,
    ) -> NotifyResult<Self> {
        let authtoken = descriptor
            .host
            .clone()
            .ok_or_else(|| NotifyError::missing_field("palot", "authtoken"))?;

        Ok(Self {
            authtoken,
            include_image,
        })
    }
}

/// Pushalot notification provider
pub struct PushalotProvider {
    config: PushalotConfig,
}

impl PushalotProvider {
    pub fn new(config: PushalotConfig) -> Self {
        Self { config }
    }

    fn build_request_body(&self, payload: &NotificationPayload) -> serde_json::Value {
        let mut body = json!({
            "AuthorizationToken": self.config.authtoken,
            "Title": payload.title,
            "Body": payload.body,
        });

        if self.config.include_image {
            body["Image"] = json!(NOTIFY_IMAGE_URL);
        }

        body
    }
}

#[async_trait]
impl NotificationProvider for PushalotProvider {
    async fn send(&self, payload: &NotificationPayload) -> NotifyResult<NotificationResult> {
        let start = Instant::now();

        let response = HTTP_CLIENT
            .post(PUSHALOT_API_URL)
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
        "pushalot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::descriptor::parse_address;

    #[test]
    fn test_token_from_host_position() {
        let d = parse_address("palot://AUTHTOKEN", "unknown").unwrap();
        let config = PushalotConfig::from_descriptor(&d, false).unwrap();
        assert_eq!(config.authtoken, "AUTHTOKEN");
    }

    #[test]
    fn test_token_required() {
        let d = parse_address("palot://", "unknown").unwrap();
        assert!(PushalotConfig::from_descriptor(&d, false).is_err());
    }

    #[test]
    fn test_build_request_body() {
        let d = parse_address("palot://AUTHTOKEN", "unknown").unwrap();
        let provider = PushalotProvider::new(PushalotConfig::from_descriptor(&d, true).unwrap());

        let payload = NotificationPayload::new("Download Failed", "file.nzb", true);
        let body = provider.build_request_body(&payload);

        assert_eq!(body["AuthorizationToken"], "AUTHTOKEN");
        assert_eq!(body["Title"], "Download Failed");
        assert_eq!(body["Body"], "file.nzb");
        assert_eq!(body["Image"], NOTIFY_IMAGE_URL);
    }
}
