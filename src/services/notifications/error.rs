//! Error taxonomy for the notification pipeline.

use thiserror::Error;

/// Errors raised while turning an address into a delivered notification.
///
/// All variants are recovered locally by the dispatcher: the offending
/// address is logged and skipped, and the remaining addresses are still
/// attempted.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The address string could not be decomposed into a descriptor
    #[error("could not parse address '{address}': {reason}")]
    Parse { address: String, reason: String },

    /// The address parsed, but its schema token is not in the registry
    #[error("{schema} is not a supported service type")]
    UnsupportedSchema { schema: String },

    /// A required backend field is missing or invalid
    #[error("cannot build {schema} target: {field} - {reason}")]
    Construction {
        schema: &'static str,
        field: &'static str,
        reason: String,
    },

    /// The backend reported a transport or authentication failure
    #[error("delivery via {schema} failed: {reason}")]
    Delivery { schema: &'static str, reason: String },
}

impl NotifyError {
    /// Shorthand for a missing required field during construction
    pub fn missing_field(schema: &'static str, field: &'static str) -> Self {
        NotifyError::Construction {
            schema,
            field,
            reason: "required field is missing".to_string(),
        }
    }
}

pub type NotifyResult<T> = Result<T, NotifyError>;
