//! Shared world state for exception-run reporting BDD scenarios.

use std::sync::Arc;

use chrono::{Duration, SecondsFormat, Utc};
use rstest::fixture;
use treeherder_bridge::job::{
    adapters::memory::RecordingJobPublisher,
    domain::{TaskDefinition, Timestamp},
    services::{HandleOutcome, HandlerError, StatusHandler, StatusNotification},
};

const TASK_FIXTURE: &str = include_str!("../fixtures/task.json");
const STATUS_FIXTURE: &str = include_str!("../fixtures/task_status.json");

/// Scenario world for exception-run reporting behaviour tests.
pub struct JobExceptionWorld {
    pub publisher: Arc<RecordingJobPublisher>,
    pub handler: StatusHandler<RecordingJobPublisher>,
    pub task: Option<TaskDefinition>,
    pub notification: StatusNotification,
    pub scheduled: Timestamp,
    pub started: Timestamp,
    pub resolved: Timestamp,
    pub last_result: Option<Result<HandleOutcome, HandlerError>>,
}

impl JobExceptionWorld {
    /// Creates a world holding the decoded status fixture and fresh
    /// timestamps five and ten minutes after scheduling.
    ///
    /// # Panics
    ///
    /// Panics when a bundled fixture fails to decode.
    #[must_use]
    pub fn new() -> Self {
        let publisher = Arc::new(RecordingJobPublisher::new());
        let handler = StatusHandler::with_defaults(Arc::clone(&publisher));
        let notification: StatusNotification =
            serde_json::from_str(STATUS_FIXTURE).expect("status fixture decodes");

        let now = Utc::now();
        let stamp = |offset: Duration| {
            Timestamp::parse((now + offset).to_rfc3339_opts(SecondsFormat::Millis, true))
                .expect("generated timestamp is RFC 3339")
        };

        Self {
            publisher,
            handler,
            task: None,
            notification,
            scheduled: stamp(Duration::zero()),
            started: stamp(Duration::minutes(5)),
            resolved: stamp(Duration::minutes(10)),
            last_result: None,
        }
    }

    /// Decodes the bundled task definition.
    ///
    /// # Errors
    ///
    /// Returns the decode error when the fixture is invalid.
    pub fn load_task_fixture() -> Result<TaskDefinition, serde_json::Error> {
        serde_json::from_str(TASK_FIXTURE)
    }
}

impl Default for JobExceptionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> JobExceptionWorld {
    JobExceptionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
