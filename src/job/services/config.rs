//! Status handler configuration.

use serde::{Deserialize, Serialize};

use crate::job::domain::{
    DEFAULT_LOG_URL_TEMPLATE, DEFAULT_QUEUE_ROOT_URL, LogReferenceError, LogReferenceResolver,
};

/// Default routing-key prefix selecting reportable routes.
pub const DEFAULT_ROUTE_PREFIX: &str = "tc-treeherder";

/// Configuration for [`StatusHandler`](super::StatusHandler).
///
/// Every field has a default, so a partial document deserializes.
///
/// # Examples
///
/// ```
/// use treeherder_bridge::job::services::HandlerConfig;
///
/// let config = HandlerConfig::default();
/// assert_eq!(config.route_prefix, "tc-treeherder");
///
/// let staging = HandlerConfig::default().with_route_prefix("tc-treeherder-staging");
/// assert_eq!(staging.route_prefix, "tc-treeherder-staging");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HandlerConfig {
    /// Routes whose first `.`-separated token equals this prefix exactly are
    /// reportable.
    pub route_prefix: String,
    /// Queue root substituted into log URLs.
    pub queue_root_url: String,
    /// `minijinja` template producing the live-log URL from `queue_root_url`,
    /// `task_id` and `run_id`.
    pub log_url_template: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            route_prefix: DEFAULT_ROUTE_PREFIX.to_owned(),
            queue_root_url: DEFAULT_QUEUE_ROOT_URL.to_owned(),
            log_url_template: DEFAULT_LOG_URL_TEMPLATE.to_owned(),
        }
    }
}

impl HandlerConfig {
    /// Sets the routing-key prefix.
    #[must_use]
    pub fn with_route_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.route_prefix = prefix.into();
        self
    }

    /// Sets the queue root URL.
    #[must_use]
    pub fn with_queue_root_url(mut self, url: impl Into<String>) -> Self {
        self.queue_root_url = url.into();
        self
    }

    /// Sets the log URL template.
    #[must_use]
    pub fn with_log_url_template(mut self, template: impl Into<String>) -> Self {
        self.log_url_template = template.into();
        self
    }

    /// Returns `true` when `route` is addressed to the configured prefix.
    #[must_use]
    pub fn accepts_route(&self, route: &str) -> bool {
        if self.route_prefix.is_empty() {
            return true;
        }
        route.split('.').next() == Some(self.route_prefix.as_str())
    }

    /// Builds the log resolver described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LogReferenceError`] when the template does not render.
    pub fn log_resolver(&self) -> Result<LogReferenceResolver, LogReferenceError> {
        LogReferenceResolver::new(self.queue_root_url.clone(), self.log_url_template.clone())
    }
}
