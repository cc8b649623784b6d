//! Error types for job-report domain validation and parsing.

use thiserror::Error;

use super::{ReasonCreated, ReasonResolved, RunState};

/// Errors returned while constructing task and run domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is empty or contains characters outside the
    /// URL-safe slug alphabet.
    #[error("invalid task identifier '{0}'")]
    InvalidTaskId(String),

    /// The timestamp is not an RFC 3339 instant.
    #[error("invalid timestamp '{0}', expected an RFC 3339 instant")]
    InvalidTimestamp(String),

    /// The run state string is not part of the queue vocabulary.
    #[error("unknown run state: {0}")]
    UnknownRunState(String),

    /// The creation reason string is not part of the queue vocabulary.
    #[error("unknown reason created: {0}")]
    UnknownReasonCreated(String),

    /// The resolution reason string is not part of the queue vocabulary.
    #[error("unknown reason resolved: {0}")]
    UnknownReasonResolved(String),
}

/// Errors returned while parsing a routing key into a push identity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    /// The routing key was empty.
    #[error("routing key must not be empty")]
    Empty,

    /// The routing key does not have the expected number of tokens.
    #[error("routing key '{route}' has {found} tokens, expected 4 or 5")]
    TokenCount {
        /// The offending routing key.
        route: String,
        /// Number of `.`-separated tokens found.
        found: usize,
    },

    /// The version token is not supported.
    #[error("routing key '{route}' uses unsupported version '{version}'")]
    UnsupportedVersion {
        /// The offending routing key.
        route: String,
        /// The version token found.
        version: String,
    },

    /// A required token is empty.
    #[error("routing key '{route}' has an empty {field} token")]
    EmptyToken {
        /// The offending routing key.
        route: String,
        /// Name of the empty field.
        field: &'static str,
    },

    /// The project token has more than one `/` separator.
    #[error("routing key '{route}' has invalid project '{project}', expected repo or owner/repo")]
    InvalidProject {
        /// The offending routing key.
        route: String,
        /// The project token found.
        project: String,
    },

    /// The push log identifier is not a decimal integer.
    #[error("routing key '{route}' has non-numeric push id '{push_id}'")]
    InvalidPushId {
        /// The offending routing key.
        route: String,
        /// The push id token found.
        push_id: String,
    },
}

/// Error returned when a run's state and reason codes fall outside the
/// outcome mapping table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "malformed run: state '{}' with reason created '{}' cannot be resolved as '{}'",
    .state.as_str(),
    .reason_created.as_str(),
    .reason_resolved.map_or("<absent>", ReasonResolved::as_str)
)]
pub struct RunOutcomeError {
    /// Raw run state.
    pub state: RunState,
    /// Raw creation reason.
    pub reason_created: ReasonCreated,
    /// Raw resolution reason, if any.
    pub reason_resolved: Option<ReasonResolved>,
}

/// Error returned when a log reference cannot be rendered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render log url template: {reason}")]
pub struct LogReferenceError {
    /// Renderer failure description.
    pub reason: String,
}
