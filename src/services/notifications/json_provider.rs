//! Generic JSON notification provider implementation.
//!
//! Addressed as `json://host[:port][/path]` or `jsons://` for the
//! encrypted variant; `secure` alone selects the transport. Posts a small
//! fixed JSON document to whatever endpoint the address names, for
//! self-hosted receivers.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::json;

use super::descriptor::AddressDescriptor;
use super::error::{NotifyError, NotifyResult};
use super::provider::{
    NOTIFY_IMAGE_URL, NotificationPayload, NotificationProvider, NotificationResult,
};
use crate::external::client::HTTP_CLIENT;

/// Generic JSON endpoint configuration
#[derive(Debug, Clone)]
pub struct JsonConfig {
    pub host: String,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Endpoint path, still percent-encoded as it appeared in the address
    pub fullpath: Option<String>,
    pub secure: bool,
    pub include_image: bool,
}

impl JsonConfig {
    pub fn from_descriptor(
        descriptor: &AddressDescriptor,
        include_image: bool,
    ) -> NotifyResult<Self> {
        let host = descriptor
            .host
            .clone()
            .ok_or_else(|| NotifyError::missing_field("json", "host"))?;

        Ok(Self {
            host,
            port: descriptor.port,
            user: descriptor.user.clone(),
            password: descriptor.password.clone(),
            fullpath: descriptor.fullpath.clone(),
            secure: descriptor.secure(),
            include_image,
        })
    }
}

/// Generic JSON notification provider
pub struct JsonProvider {
    config: JsonConfig,
}

impl JsonProvider {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    fn build_api_url(&self) -> String {
        let scheme = if self.config.secure { "https" } else { "http" };
        let mut url = format!("{scheme}://{}", self.config.host);
        if let Some(port) = self.config.port {
            url.push_str(&format!(":{port}"));
        }
        url.push_str(self.config.fullpath.as_deref().unwrap_or("/"));
        url
    }

    fn build_request_body(&self, payload: &NotificationPayload) -> serde_json::Value {
        let mut body = json!({
            "version": "1.0",
            "title": payload.title,
            "message": payload.body,
        });

        if self.config.include_image {
            body["image"] = json!(NOTIFY_IMAGE_URL);
        }

        body
    }
}

#[async_trait]
impl NotificationProvider for JsonProvider {
    async fn send(&self, payload: &NotificationPayload) -> NotifyResult<NotificationResult> {
        let start = Instant::now();

        let mut request = HTTP_CLIENT
            .post(self.build_api_url())
            .json(&self.build_request_body(payload));

        if let Some(user) = &self.config.user {
            request = request.basic_auth(user, self.config.password.as_deref());
        }

        let response = request.send().await;
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
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::descriptor::parse_address;

    #[test]
    fn test_url_with_port_and_path() {
        let d = parse_address("json://myhost:8080/hooks/notify", "unknown").unwrap();
        let provider = JsonProvider::new(JsonConfig::from_descriptor(&d, false).unwrap());
        assert_eq!(provider.build_api_url(), "http://myhost:8080/hooks/notify");
    }

    #[test]
    fn test_secure_variant_uses_https() {
        let d = parse_address("jsons://myhost", "unknown").unwrap();
        let config = JsonConfig::from_descriptor(&d, false).unwrap();
        assert!(config.secure);

        let provider = JsonProvider::new(config);
        assert_eq!(provider.build_api_url(), "https://myhost/");
    }

    #[test]
    fn test_host_required() {
        let d = parse_address("json://", "unknown").unwrap();
        assert!(JsonConfig::from_descriptor(&d, false).is_err());
    }

    #[test]
    fn test_request_body_shape() {
        let d = parse_address("json://myhost:8080", "unknown").unwrap();
        let provider = JsonProvider::new(JsonConfig::from_descriptor(&d, true).unwrap());

        let payload = NotificationPayload::new("Download Successful", "file.nzb", true);
        let body = provider.build_request_body(&payload);

        assert_eq!(body["version"], "1.0");
        assert_eq!(body["title"], "Download Successful");
        assert_eq!(body["message"], "file.nzb");
        assert_eq!(body["image"], NOTIFY_IMAGE_URL);
    }
}
