//! Service layer.
//!
//! Notification routing is the only service this tool carries; it owns the
//! descriptor grammar, the backend registry, and the dispatcher.

pub mod notifications;

pub use notifications::{DispatchReport, Dispatcher, NotificationPayload};
