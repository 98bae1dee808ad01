//! Prowl notification provider implementation.
//!
//! Addressed as `prowl://apikey[/providerkey]`. The API key rides in the
//! host position; an optional provider key may follow as the first path
//! segment.

use std::time::Instant;

use async_trait::async_trait;

use super::descriptor::{AddressDescriptor, split_path_list};
use super::error::{NotifyError, NotifyResult};
use super::provider::{NotificationPayload, NotificationProvider, NotificationResult};
use crate::external::client::HTTP_CLIENT;

const PROWL_API_URL: &str = "https://api.prowlapp.com/publicapi/add";

/// Prowl configuration
#[derive(Debug, Clone)]
pub struct ProwlConfig {
    pub apikey: String,
    pub providerkey: Option<String>,
    pub include_image: bool,
}

impl ProwlConfig {
    /// Builds the config from a parsed address. The API key (host position)
    /// is required; the provider key is the first non-empty segment of the
    /// decoded path and its absence is not a failure.
    pub fn from_descriptor(
        descriptor: &AddressDescriptor,
        include_image: bool,
    ) -> NotifyResult<Self> {
        let apikey = descriptor
            .host
            .clone()
            .ok_or_else(|| NotifyError::missing_field("prowl", "apikey"))?;

        let providerkey = descriptor
            .decoded_fullpath()
            .and_then(|path| split_path_list(&path).into_iter().next());

        Ok(Self {
            apikey,
            providerkey,
            include_image,
        })
    }
}

/// Prowl notification provider
pub struct ProwlProvider {
    config: ProwlConfig,
}

impl ProwlProvider {
    pub fn new(config: ProwlConfig) -> Self {
        Self { config }
    }

    fn build_form(&self, payload: &NotificationPayload) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("apikey", self.config.apikey.clone()),
            ("application", "notify-rs".to_string()),
            ("event", payload.title.clone()),
            ("description", payload.body.clone()),
        ];

        if let Some(providerkey) = &self.config.providerkey {
            form.push(("providerkey", providerkey.clone()));
        }

        form
    }
}

#[async_trait]
impl NotificationProvider for ProwlProvider {
    async fn send(&self, payload: &NotificationPayload) -> NotifyResult<NotificationResult> {
        let start = Instant::now();

        let response = HTTP_CLIENT
            .post(PROWL_API_URL)
            .form(&self.build_form(payload))
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
        "prowl"
    }
}
