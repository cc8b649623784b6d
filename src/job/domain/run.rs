//! Run attempts, their raw state vocabulary, and task status snapshots.

use super::{RunId, TaskDomainError, TaskId};
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw run state reported by the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunState {
    /// Run is waiting for a worker to claim it.
    Pending,
    /// Run has been claimed and is executing.
    Running,
    /// Run finished successfully.
    Completed,
    /// Run finished unsuccessfully.
    Failed,
    /// Run was resolved because of an exception (infrastructure, cancel, ...).
    Exception,
}

impl RunState {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Exception => "exception",
        }
    }
}

impl TryFrom<&str> for RunState {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "pending" => Ok(Self::Pending),
            "running" => Ok(Self::Running),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "exception" => Ok(Self::Exception),
            _ => Err(TaskDomainError::UnknownRunState(value.to_owned())),
        }
    }
}

/// Why the queue created a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonCreated {
    /// First run of a newly scheduled task.
    Scheduled,
    /// Automatic retry after an infrastructure exception.
    Retry,
    /// Retry requested by the task itself.
    TaskRetry,
    /// Manual rerun of a resolved task.
    Rerun,
    /// Created as a consequence of an exception on the task.
    Exception,
}

impl ReasonCreated {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Retry => "retry",
            Self::TaskRetry => "task-retry",
            Self::Rerun => "rerun",
            Self::Exception => "exception",
        }
    }
}

impl TryFrom<&str> for ReasonCreated {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "scheduled" => Ok(Self::Scheduled),
            "retry" => Ok(Self::Retry),
            "task-retry" => Ok(Self::TaskRetry),
            "rerun" => Ok(Self::Rerun),
            "exception" => Ok(Self::Exception),
            _ => Err(TaskDomainError::UnknownReasonCreated(value.to_owned())),
        }
    }
}

/// Why the queue resolved a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonResolved {
    /// The worker reported success.
    Completed,
    /// The worker reported failure.
    Failed,
    /// The task deadline passed before resolution.
    DeadlineExceeded,
    /// The task was canceled.
    Canceled,
    /// Another task made this one redundant.
    Superseded,
    /// The worker stopped reclaiming the run.
    ClaimExpired,
    /// The worker shut down mid-run.
    WorkerShutdown,
    /// The worker rejected the task payload.
    MalformedPayload,
    /// A resource required by the task was unavailable.
    ResourceUnavailable,
    /// The worker hit an internal error.
    InternalError,
    /// The task reported an intermittent failure and asked for a retry.
    IntermittentTask,
}

impl ReasonResolved {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::DeadlineExceeded => "deadline-exceeded",
            Self::Canceled => "canceled",
            Self::Superseded => "superseded",
            Self::ClaimExpired => "claim-expired",
            Self::WorkerShutdown => "worker-shutdown",
            Self::MalformedPayload => "malformed-payload",
            Self::ResourceUnavailable => "resource-unavailable",
            Self::InternalError => "internal-error",
            Self::IntermittentTask => "intermittent-task",
        }
    }
}

impl TryFrom<&str> for ReasonResolved {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "deadline-exceeded" => Ok(Self::DeadlineExceeded),
            "canceled" => Ok(Self::Canceled),
            "superseded" => Ok(Self::Superseded),
            "claim-expired" => Ok(Self::ClaimExpired),
            "worker-shutdown" => Ok(Self::WorkerShutdown),
            "malformed-payload" => Ok(Self::MalformedPayload),
            "resource-unavailable" => Ok(Self::ResourceUnavailable),
            "internal-error" => Ok(Self::InternalError),
            "intermittent-task" => Ok(Self::IntermittentTask),
            _ => Err(TaskDomainError::UnknownReasonResolved(value.to_owned())),
        }
    }
}

/// RFC 3339 instant kept in its original textual form.
///
/// The text is validated on construction but never reformatted, so a
/// timestamp read from a status payload is republished byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(String);

impl Timestamp {
    /// Creates a validated timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTimestamp`] when the value does not
    /// parse as an RFC 3339 instant.
    pub fn parse(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if DateTime::parse_from_rfc3339(&raw).is_err() {
            return Err(TaskDomainError::InvalidTimestamp(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the original text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One execution attempt of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    run_id: RunId,
    state: RunState,
    reason_created: ReasonCreated,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason_resolved: Option<ReasonResolved>,
    scheduled: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    started: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolved: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    worker_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    worker_id: Option<String>,
}

impl Run {
    /// Creates a run with the required fields.
    #[must_use]
    pub const fn new(
        run_id: RunId,
        state: RunState,
        reason_created: ReasonCreated,
        scheduled: Timestamp,
    ) -> Self {
        Self {
            run_id,
            state,
            reason_created,
            reason_resolved: None,
            scheduled,
            started: None,
            resolved: None,
            worker_group: None,
            worker_id: None,
        }
    }

    /// Sets the resolution reason.
    #[must_use]
    pub const fn with_reason_resolved(mut self, reason: ReasonResolved) -> Self {
        self.reason_resolved = Some(reason);
        self
    }

    /// Sets the start timestamp.
    #[must_use]
    pub fn with_started(mut self, started: Timestamp) -> Self {
        self.started = Some(started);
        self
    }

    /// Sets the resolution timestamp.
    #[must_use]
    pub fn with_resolved(mut self, resolved: Timestamp) -> Self {
        self.resolved = Some(resolved);
        self
    }

    /// Sets the claiming worker.
    #[must_use]
    pub fn with_worker(mut self, group: impl Into<String>, id: impl Into<String>) -> Self {
        self.worker_group = Some(group.into());
        self.worker_id = Some(id.into());
        self
    }

    /// Returns the run index.
    #[must_use]
    pub const fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Returns the raw run state.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Returns the creation reason.
    #[must_use]
    pub const fn reason_created(&self) -> ReasonCreated {
        self.reason_created
    }

    /// Returns the resolution reason, present only once terminal.
    #[must_use]
    pub const fn reason_resolved(&self) -> Option<ReasonResolved> {
        self.reason_resolved
    }

    /// Returns the scheduling timestamp.
    #[must_use]
    pub const fn scheduled(&self) -> &Timestamp {
        &self.scheduled
    }

    /// Returns the start timestamp, if the run has started.
    #[must_use]
    pub const fn started(&self) -> Option<&Timestamp> {
        self.started.as_ref()
    }

    /// Returns the resolution timestamp, if the run has resolved.
    #[must_use]
    pub const fn resolved(&self) -> Option<&Timestamp> {
        self.resolved.as_ref()
    }

    /// Returns the worker group that claimed the run.
    #[must_use]
    pub fn worker_group(&self) -> Option<&str> {
        self.worker_group.as_deref()
    }

    /// Returns the worker that claimed the run.
    #[must_use]
    pub fn worker_id(&self) -> Option<&str> {
        self.worker_id.as_deref()
    }
}

/// Snapshot of a task's runs as carried by a status notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    task_id: TaskId,
    #[serde(default)]
    runs: Vec<Run>,
}

impl TaskStatus {
    /// Creates a status snapshot.
    #[must_use]
    pub const fn new(task_id: TaskId, runs: Vec<Run>) -> Self {
        Self { task_id, runs }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns all runs in creation order.
    #[must_use]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Returns mutable access to the runs, for replacing a run in place.
    pub const fn runs_mut(&mut self) -> &mut Vec<Run> {
        &mut self.runs
    }

    /// Looks up the run carrying `run_id`.
    ///
    /// Runs are matched on their own identifier, not their position.
    #[must_use]
    pub fn run(&self, run_id: RunId) -> Option<&Run> {
        self.runs.iter().find(|run| run.run_id() == run_id)
    }

    /// Returns `true` when a later run exists after `run_id`.
    #[must_use]
    pub fn is_retried(&self, run_id: RunId) -> bool {
        self.runs.iter().any(|run| run.run_id() > run_id)
    }
}
