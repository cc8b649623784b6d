//! Deterministic log references for a task run.

use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};

use super::{LogReferenceError, RunId, TaskId};

/// Name of the canonical live log.
pub const LIVE_LOG_NAME: &str = "builds-4h";

/// Default queue root used in log URLs.
pub const DEFAULT_QUEUE_ROOT_URL: &str = "https://queue.taskcluster.net";

/// Default live-log URL template.
pub const DEFAULT_LOG_URL_TEMPLATE: &str = "{{ queue_root_url }}/v1/task/{{ task_id }}/runs/{{ run_id }}/artifacts/public/logs/live_backing.log";

/// Named reference to a log artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogReference {
    /// Log name.
    pub name: String,
    /// Log URL.
    pub url: String,
}

/// Builds log references from a URL template without touching storage.
///
/// Referenced artifacts are not guaranteed to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogReferenceResolver {
    queue_root_url: String,
    template: String,
}

impl LogReferenceResolver {
    /// Creates a resolver, trial-rendering the template once.
    ///
    /// # Errors
    ///
    /// Returns [`LogReferenceError`] when the template does not render.
    pub fn new(
        queue_root_url: impl Into<String>,
        template: impl Into<String>,
    ) -> Result<Self, LogReferenceError> {
        let resolver = Self::from_parts(queue_root_url.into(), template.into());
        resolver.render("trial", 0)?;
        Ok(resolver)
    }

    fn from_parts(queue_root_url: String, template: String) -> Self {
        Self {
            queue_root_url: queue_root_url.trim_end_matches('/').to_owned(),
            template,
        }
    }

    /// Creates a resolver using [`DEFAULT_LOG_URL_TEMPLATE`].
    ///
    /// # Errors
    ///
    /// Returns [`LogReferenceError`] when the template does not render.
    pub fn with_queue_root(queue_root_url: impl Into<String>) -> Result<Self, LogReferenceError> {
        Self::new(queue_root_url, DEFAULT_LOG_URL_TEMPLATE)
    }

    /// Returns the log references for a run, currently the live log only.
    ///
    /// # Errors
    ///
    /// Returns [`LogReferenceError`] when the template does not render.
    pub fn resolve_logs(
        &self,
        task_id: &TaskId,
        run_id: RunId,
    ) -> Result<Vec<LogReference>, LogReferenceError> {
        let url = self.render(task_id.as_str(), run_id.value())?;
        Ok(vec![LogReference {
            name: LIVE_LOG_NAME.to_owned(),
            url,
        }])
    }

    fn render(&self, task_id: &str, run_id: u32) -> Result<String, LogReferenceError> {
        let environment = Environment::new();
        environment
            .render_str(
                &self.template,
                context! {
                    queue_root_url => &self.queue_root_url,
                    task_id => task_id,
                    run_id => run_id,
                },
            )
            .map_err(|error| LogReferenceError {
                reason: error.to_string(),
            })
    }
}

impl Default for LogReferenceResolver {
    fn default() -> Self {
        Self::from_parts(
            DEFAULT_QUEUE_ROOT_URL.to_owned(),
            DEFAULT_LOG_URL_TEMPLATE.to_owned(),
        )
    }
}
