//! Best-effort dispatch across all addressed targets.
//!
//! Resolution (parse, registry check, construction) runs sequentially in
//! list order; delivery runs on a bounded worker pool with a per-delivery
//! timeout so one unreachable backend cannot stall the rest. One target's
//! failure never prevents attempts on the others.

use std::time::Duration;

use futures::StreamExt;
use jiff::Timestamp;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::builder::build_provider;
use super::descriptor::{parse_address, split_server_list};
use super::provider::{NotificationPayload, NotificationProvider};
use super::schema::Schema;

/// Sentinel schema assumed for addresses without a `://` marker. Not in
/// the registry, so such addresses surface as unsupported rather than
/// misrouted.
pub const DEFAULT_SCHEMA: &str = "unknown";

const DEFAULT_CONCURRENCY: usize = 4;
const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Final state of one addressed target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetStatus {
    ParseFailed { reason: String },
    UnsupportedSchema,
    ConstructionFailed { reason: String },
    Delivered { status_code: Option<u16>, duration_ms: u64 },
    DeliveryFailed { reason: String },
    TimedOut,
    Cancelled,
}

impl TargetStatus {
    /// True for states that never reached a delivery attempt
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            TargetStatus::ParseFailed { .. }
                | TargetStatus::UnsupportedSchema
                | TargetStatus::ConstructionFailed { .. }
        )
    }
}

/// Outcome of one addressed target, attributable to its source address
#[derive(Debug, Clone, Serialize)]
pub struct TargetOutcome {
    pub address: String,
    /// Schema token once parsing got that far
    pub schema: Option<String>,
    pub status: TargetStatus,
}

/// Per-target outcomes of one dispatch, in input order.
///
/// Existence of the report already answers the reference contract's
/// "pipeline ran" question: dispatch always attempts every address and
/// always returns. The per-target breakdown is the additional signal the
/// caller gets instead of a bare boolean.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    pub outcomes: Vec<TargetOutcome>,
}

impl DispatchReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn delivered(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, TargetStatus::Delivered { .. }))
            .count()
    }

    /// Targets that reached delivery but did not succeed
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o.status,
                    TargetStatus::DeliveryFailed { .. }
                        | TargetStatus::TimedOut
                        | TargetStatus::Cancelled
                )
            })
            .count()
    }

    /// Targets skipped before delivery (parse, schema, construction)
    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_skip()).count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} attempted, {} delivered, {} failed, {} skipped",
            self.attempted(),
            self.delivered(),
            self.failed(),
            self.skipped()
        )
    }
}

enum Resolution {
    Ready {
        schema: Schema,
        provider: Box<dyn NotificationProvider>,
    },
    Skip {
        schema: Option<String>,
        status: TargetStatus,
    },
}

/// Routes one notification payload to every addressed target
pub struct Dispatcher {
    concurrency: usize,
    delivery_timeout: Duration,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
        }
    }
}

impl Dispatcher {
    pub fn new(concurrency: usize, delivery_timeout: Duration) -> Self {
        Self {
            concurrency: concurrency.max(1),
            delivery_timeout,
        }
    }

    /// Dispatches to a free-form server string (see the list splitter for
    /// the accepted delimiters)
    pub async fn dispatch(&self, spec: &str, payload: &NotificationPayload) -> DispatchReport {
        let addresses = split_server_list(spec);
        self.dispatch_all(&addresses, payload).await
    }

    /// Dispatches to an already-discrete address list
    pub async fn dispatch_all(
        &self,
        addresses: &[String],
        payload: &NotificationPayload,
    ) -> DispatchReport {
        self.dispatch_with_cancel(addresses, payload, &CancellationToken::new())
            .await
    }

    /// Dispatches with caller-controlled cancellation. Cancelling resolves
    /// in-flight deliveries to a `Cancelled` outcome without disturbing
    /// targets that already completed.
    pub async fn dispatch_with_cancel(
        &self,
        addresses: &[String],
        payload: &NotificationPayload,
        cancel: &CancellationToken,
    ) -> DispatchReport {
        let started_at = Timestamp::now();

        let mut outcomes: Vec<Option<TargetOutcome>> = vec![None; addresses.len()];
        let mut ready = Vec::new();

        for (index, address) in addresses.iter().enumerate() {
            match self.resolve(address, payload.include_image) {
                Resolution::Ready { schema, provider } => {
                    ready.push((index, address.clone(), schema, provider));
                }
                Resolution::Skip { schema, status } => {
                    outcomes[index] = Some(TargetOutcome {
                        address: address.clone(),
                        schema,
                        status,
                    });
                }
            }
        }

        let delivery_timeout = self.delivery_timeout;
        let delivered = futures::stream::iter(ready.into_iter().map(
            |(index, address, schema, provider)| {
                let cancel = cancel.clone();
                async move {
                    let status = tokio::select! {
                        _ = cancel.cancelled() => TargetStatus::Cancelled,
                        attempt = tokio::time::timeout(delivery_timeout, provider.send(payload)) => {
                            match attempt {
                                Err(_) => TargetStatus::TimedOut,
                                Ok(Ok(result)) if result.success => TargetStatus::Delivered {
                                    status_code: result.status_code,
                                    duration_ms: result.duration_ms,
                                },
                                Ok(Ok(result)) => TargetStatus::DeliveryFailed {
                                    reason: result
                                        .response
                                        .unwrap_or_else(|| "delivery rejected".to_string()),
                                },
                                Ok(Err(e)) => TargetStatus::DeliveryFailed {
                                    reason: e.to_string(),
                                },
                            }
                        }
                    };
                    (index, address, schema, status)
                }
            },
        ))
        .buffer_unordered(self.concurrency)
        .collect::<Vec<_>>()
        .await;

        for (index, address, schema, status) in delivered {
            match &status {
                TargetStatus::Delivered { duration_ms, .. } => {
                    info!(address = %address, schema = %schema, duration_ms, "notification delivered");
                }
                TargetStatus::TimedOut => {
                    warn!(address = %address, schema = %schema, "delivery timed out");
                }
                TargetStatus::Cancelled => {
                    warn!(address = %address, schema = %schema, "delivery cancelled");
                }
                _ => {
                    warn!(address = %address, schema = %schema, ?status, "delivery failed");
                }
            }
            outcomes[index] = Some(TargetOutcome {
                address,
                schema: Some(schema.token().to_string()),
                status,
            });
        }

        let report = DispatchReport {
            started_at,
            finished_at: Timestamp::now(),
            outcomes: outcomes.into_iter().flatten().collect(),
        };
        info!(summary = %report.summary(), "dispatch complete");
        report
    }

    /// Parse, registry check and construction for one address. Every
    /// failure is recovered locally into a skip outcome.
    fn resolve(&self, address: &str, include_image: bool) -> Resolution {
        let descriptor = match parse_address(address, DEFAULT_SCHEMA) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                error!(address, error = %e, "could not parse address");
                return Resolution::Skip {
                    schema: None,
                    status: TargetStatus::ParseFailed {
                        reason: e.to_string(),
                    },
                };
            }
        };
        debug!(address, ?descriptor, "address parsed");

        let Some(schema) = Schema::from_token(&descriptor.schema) else {
            error!(address, schema = %descriptor.schema, "unsupported service type");
            return Resolution::Skip {
                schema: Some(descriptor.schema.clone()),
                status: TargetStatus::UnsupportedSchema,
            };
        };

        match build_provider(schema, &descriptor, include_image) {
            Ok(provider) => Resolution::Ready { schema, provider },
            Err(e) => {
                warn!(address, schema = %schema, error = %e, "could not build target");
                Resolution::Skip {
                    schema: Some(schema.token().to_string()),
                    status: TargetStatus::ConstructionFailed {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> NotificationPayload {
        NotificationPayload::new("Download Successful", "file.nzb", false)
    }

    #[tokio::test]
    async fn test_empty_spec_reports_nothing() {
        let report = Dispatcher::default().dispatch("", &payload()).await;
        assert_eq!(report.attempted(), 0);
        assert_eq!(report.delivered(), 0);
    }

    #[tokio::test]
    async fn test_skips_are_recorded_in_input_order() {
        let addresses = vec![
            "://nohost".to_string(),
            "bogus://x".to_string(),
            "pover://TOKEN".to_string(),
        ];
        let report = Dispatcher::default()
            .dispatch_all(&addresses, &payload())
            .await;

        assert_eq!(report.attempted(), 3);
        assert_eq!(report.skipped(), 3);
        assert!(matches!(
            report.outcomes[0].status,
            TargetStatus::ParseFailed { .. }
        ));
        assert_eq!(report.outcomes[1].status, TargetStatus::UnsupportedSchema);
        assert_eq!(report.outcomes[1].schema.as_deref(), Some("bogus"));
        assert!(matches!(
            report.outcomes[2].status,
            TargetStatus::ConstructionFailed { .. }
        ));
    }

    #[tokio::test]
    async fn test_bad_address_does_not_block_neighbors() {
        // Unroutable loopback port: the valid neighbors fail fast at the
        // transport level but still reach a delivery attempt.
        let addresses = vec![
            "json://127.0.0.1:9".to_string(),
            "bogus://x".to_string(),
            "xbmc://127.0.0.1:9".to_string(),
        ];
        let report = Dispatcher::default()
            .dispatch_all(&addresses, &payload())
            .await;

        assert_eq!(report.attempted(), 3);
        assert_eq!(report.outcomes[1].status, TargetStatus::UnsupportedSchema);
        assert!(matches!(
            report.outcomes[0].status,
            TargetStatus::DeliveryFailed { .. }
        ));
        assert!(matches!(
            report.outcomes[2].status,
            TargetStatus::DeliveryFailed { .. }
        ));
    }

    #[tokio::test]
    async fn test_cancelled_before_delivery() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let addresses = vec!["json://127.0.0.1:9".to_string()];
        let report = Dispatcher::default()
            .dispatch_with_cancel(&addresses, &payload(), &cancel)
            .await;

        assert_eq!(report.outcomes[0].status, TargetStatus::Cancelled);
    }
}
