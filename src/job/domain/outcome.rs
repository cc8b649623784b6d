//! Mapping from raw run state and reason codes to normalized job outcomes.

use serde::{Deserialize, Serialize};

use super::{ReasonCreated, ReasonResolved, Run, RunOutcomeError, RunState};

/// Normalized job state understood by the reporting backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Job is waiting to run.
    Pending,
    /// Job is executing.
    Running,
    /// Job has finished; a [`JobResult`] accompanies this state.
    Completed,
}

impl JobState {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
        }
    }
}

/// Normalized result of a completed job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobResult {
    /// Job succeeded.
    Success,
    /// Job failed.
    Fail,
    /// Job hit an infrastructure exception.
    Exception,
    /// Job was canceled.
    Canceled,
    /// Job was merged with another run upstream.
    Coalesced,
    /// Job will be retried in a later run.
    Retry,
}

impl JobResult {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Fail => "fail",
            Self::Exception => "exception",
            Self::Canceled => "canceled",
            Self::Coalesced => "coalesced",
            Self::Retry => "retry",
        }
    }
}

/// Normalized `(state, result)` pair.
///
/// A result is present iff the state is [`JobState::Completed`]; the
/// constructors are the only way to build one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobStatus {
    state: JobState,
    result: Option<JobResult>,
}

impl JobStatus {
    /// Status of a job that has not finished yet.
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            state: JobState::Pending,
            result: None,
        }
    }

    /// Status of a job that is executing.
    #[must_use]
    pub const fn running() -> Self {
        Self {
            state: JobState::Running,
            result: None,
        }
    }

    /// Status of a finished job.
    #[must_use]
    pub const fn completed(result: JobResult) -> Self {
        Self {
            state: JobState::Completed,
            result: Some(result),
        }
    }

    /// Returns the job state.
    #[must_use]
    pub const fn state(self) -> JobState {
        self.state
    }

    /// Returns the job result, present only for completed jobs.
    #[must_use]
    pub const fn result(self) -> Option<JobResult> {
        self.result
    }
}

/// Decision for a single run notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// No job message must be emitted.
    Suppressed,
    /// A job message with this status must be emitted.
    Normalized(JobStatus),
}

/// Resolves a run into a job outcome.
///
/// The table is matched exhaustively over [`RunState`] and
/// [`ReasonResolved`], so adding a variant to either enum fails to compile
/// until its row is written.
///
/// # Errors
///
/// Returns [`RunOutcomeError`] when the combination has no defined outcome,
/// for example a pending run carrying a resolution reason or a completed run
/// resolved as `failed`.
///
/// Every exception run not created by an exception reports `exception`,
/// except a superseded one, which reports `coalesced`.
pub fn resolve_outcome(run: &Run) -> Result<Outcome, RunOutcomeError> {
    resolve_codes(run.state(), run.reason_created(), run.reason_resolved())
}

/// Resolves raw codes into a job outcome. See [`resolve_outcome`].
///
/// # Errors
///
/// Returns [`RunOutcomeError`] for combinations outside the mapping table.
pub fn resolve_codes(
    state: RunState,
    reason_created: ReasonCreated,
    reason_resolved: Option<ReasonResolved>,
) -> Result<Outcome, RunOutcomeError> {
    use ReasonResolved as R;

    let malformed = RunOutcomeError {
        state,
        reason_created,
        reason_resolved,
    };

    let status = match (state, reason_resolved) {
        (RunState::Pending, None) => JobStatus::pending(),
        (RunState::Running, None) => JobStatus::running(),
        (RunState::Pending | RunState::Running, Some(_)) => return Err(malformed),

        // Runs spawned by an exception are retry artefacts; the run they
        // replace is reported instead.
        (RunState::Exception, _) if reason_created == ReasonCreated::Exception => {
            return Ok(Outcome::Suppressed);
        }

        (RunState::Exception, Some(R::Superseded)) => JobStatus::completed(JobResult::Coalesced),
        (
            RunState::Exception,
            None
            | Some(
                R::Completed
                | R::Failed
                | R::DeadlineExceeded
                | R::Canceled
                | R::ClaimExpired
                | R::WorkerShutdown
                | R::MalformedPayload
                | R::ResourceUnavailable
                | R::InternalError
                | R::IntermittentTask,
            ),
        ) => JobStatus::completed(JobResult::Exception),

        (RunState::Completed | RunState::Failed, Some(R::Canceled)) => {
            JobStatus::completed(JobResult::Canceled)
        }
        (
            RunState::Completed | RunState::Failed,
            Some(R::ClaimExpired | R::WorkerShutdown | R::IntermittentTask),
        ) => JobStatus::completed(JobResult::Retry),
        (RunState::Completed, None | Some(R::Completed)) => JobStatus::completed(JobResult::Success),
        (RunState::Failed, None | Some(R::Failed)) => JobStatus::completed(JobResult::Fail),
        (
            RunState::Completed,
            Some(
                R::Failed
                | R::DeadlineExceeded
                | R::Superseded
                | R::MalformedPayload
                | R::ResourceUnavailable
                | R::InternalError,
            ),
        )
        | (
            RunState::Failed,
            Some(
                R::Completed
                | R::DeadlineExceeded
                | R::Superseded
                | R::MalformedPayload
                | R::ResourceUnavailable
                | R::InternalError,
            ),
        ) => return Err(malformed),
    };

    Ok(Outcome::Normalized(status))
}
