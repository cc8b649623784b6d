//! Port contracts for job reporting.
//!
//! Ports define transport-agnostic interfaces used by the status handler.

pub mod publisher;

pub use publisher::{JobPublisher, PublishError, PublishResult};
