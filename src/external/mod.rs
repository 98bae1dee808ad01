//! Outbound HTTP plumbing shared by the notification backends.

pub mod client;
