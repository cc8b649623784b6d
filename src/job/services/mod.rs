//! Application services for job reporting.

mod config;
mod handler;

pub use config::{DEFAULT_ROUTE_PREFIX, HandlerConfig};
pub use handler::{
    HandleOutcome, HandlerError, HandlerResult, StatusHandler, StatusNotification,
};
