//! Domain model for job reporting.
//!
//! Everything here is pure: routing keys, run outcomes, log references and
//! job messages are computed from their inputs without I/O, so each piece is
//! testable in isolation from the queue and the publish transport.

mod error;
mod ids;
mod logs;
mod message;
mod outcome;
mod route;
mod run;
mod task;

pub use error::{LogReferenceError, RouteError, RunOutcomeError, TaskDomainError};
pub use ids::{RunId, TaskId};
pub use logs::{
    DEFAULT_LOG_URL_TEMPLATE, DEFAULT_QUEUE_ROOT_URL, LIVE_LOG_NAME, LogReference,
    LogReferenceResolver,
};
pub use message::{
    BUILD_SYSTEM, BuildMachine, JOB_MESSAGE_VERSION, JobDisplay, JobInfo, JobMessage,
    JobMessageBuilder, JobOrigin,
};
pub use outcome::{JobResult, JobState, JobStatus, Outcome, resolve_codes, resolve_outcome};
pub use route::{PushIdentity, PushOrigin};
pub use run::{ReasonCreated, ReasonResolved, Run, RunState, TaskStatus, Timestamp};
pub use task::{MachinePlatform, TaskDefinition, TaskExtra, TaskMetadata, TreeherderExtra};
