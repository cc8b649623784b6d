//! Normalized job-report messages and their assembly.

use serde::{Deserialize, Serialize};

use super::{
    JobResult, JobState, LogReference, LogReferenceError, LogReferenceResolver, Outcome,
    PushIdentity, PushOrigin, Run, RunId, TaskDefinition, TaskId, TaskStatus, Timestamp,
};

/// Build system label stamped on every job.
pub const BUILD_SYSTEM: &str = "taskcluster";

/// Job message schema version.
pub const JOB_MESSAGE_VERSION: u32 = 1;

/// Repository and revision a job is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum JobOrigin {
    /// Push recorded in a Mercurial push log.
    #[serde(rename = "hg.mozilla.org")]
    Mercurial {
        /// Repository name.
        project: String,
        /// Pushed revision.
        revision: String,
        /// Push log identifier.
        #[serde(rename = "pushLogID", skip_serializing_if = "Option::is_none")]
        push_log_id: Option<u64>,
    },
    /// Push to a GitHub repository.
    #[serde(rename = "github.com")]
    GitHub {
        /// Repository owner.
        owner: String,
        /// Repository name.
        project: String,
        /// Pushed revision.
        revision: String,
        /// Push identifier.
        #[serde(rename = "pushLogID", skip_serializing_if = "Option::is_none")]
        push_log_id: Option<u64>,
    },
}

impl From<&PushIdentity> for JobOrigin {
    fn from(push: &PushIdentity) -> Self {
        match (push.origin(), push.owner()) {
            (PushOrigin::GitHub, Some(owner)) => Self::GitHub {
                owner: owner.to_owned(),
                project: push.project().to_owned(),
                revision: push.revision().to_owned(),
                push_log_id: push.push_id(),
            },
            (PushOrigin::GitHub | PushOrigin::Mercurial, _) => Self::Mercurial {
                project: push.project().to_owned(),
                revision: push.revision().to_owned(),
                push_log_id: push.push_id(),
            },
        }
    }
}

/// How the job is labelled in the reporting UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDisplay {
    /// Job symbol.
    pub job_symbol: String,
    /// Group symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_symbol: Option<String>,
    /// Group name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Job name.
    pub job_name: String,
}

/// Machine a job ran on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMachine {
    /// Worker identifier.
    pub name: String,
    /// Platform name.
    pub platform: String,
    /// Operating system.
    pub os: String,
    /// CPU architecture.
    pub architecture: String,
}

/// Free-form job details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    /// Task description.
    pub summary: String,
}

/// Normalized job report for one run of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMessage {
    /// Originating task.
    pub task_id: TaskId,
    /// Run index within the task.
    pub retry_id: RunId,
    /// Whether a later run of the same task exists.
    pub is_retried: bool,
    /// Build system label.
    pub build_system: String,
    /// Push the job is attributed to.
    pub origin: JobOrigin,
    /// Display labels.
    pub display: JobDisplay,
    /// Normalized state.
    pub state: JobState,
    /// Normalized result, present iff `state` is completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<JobResult>,
    /// Job kind.
    pub job_kind: String,
    /// Visibility tier.
    pub tier: u8,
    /// Task owner.
    pub owner: String,
    /// Why the run was created.
    pub reason: String,
    /// Product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Machine the run was claimed by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_machine: Option<BuildMachine>,
    /// Enabled build collections.
    pub labels: Vec<String>,
    /// Free-form details.
    pub job_info: JobInfo,
    /// When the run was scheduled.
    pub time_scheduled: Timestamp,
    /// When the run started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_started: Option<Timestamp>,
    /// When the run resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_completed: Option<Timestamp>,
    /// Log references.
    pub logs: Vec<LogReference>,
    /// Schema version.
    pub version: u32,
}

/// Assembles [`JobMessage`] values from a task, one of its runs, and the
/// resolved outcome.
#[derive(Debug, Clone, Default)]
pub struct JobMessageBuilder {
    logs: LogReferenceResolver,
}

impl JobMessageBuilder {
    /// Creates a builder using the given log resolver.
    #[must_use]
    pub const fn new(logs: LogReferenceResolver) -> Self {
        Self { logs }
    }

    /// Builds the job message, or `None` when the outcome is suppressed.
    ///
    /// Timestamps are copied verbatim; an absent start or resolution time
    /// stays absent.
    ///
    /// # Errors
    ///
    /// Returns [`LogReferenceError`] when the log URL cannot be rendered.
    pub fn build(
        &self,
        push: &PushIdentity,
        task: &TaskDefinition,
        status: &TaskStatus,
        run: &Run,
        outcome: Outcome,
    ) -> Result<Option<JobMessage>, LogReferenceError> {
        let Outcome::Normalized(job_status) = outcome else {
            return Ok(None);
        };

        let task_id = status.task_id();
        let run_id = run.run_id();
        let treeherder = task.treeherder();
        let labels = treeherder.labels();
        let build_machine = treeherder.machine.map(|machine| BuildMachine {
            name: run.worker_id().unwrap_or("unknown").to_owned(),
            platform: machine.platform,
            os: machine.os,
            architecture: machine.architecture,
        });

        Ok(Some(JobMessage {
            task_id: task_id.clone(),
            retry_id: run_id,
            is_retried: status.is_retried(run_id),
            build_system: BUILD_SYSTEM.to_owned(),
            origin: JobOrigin::from(push),
            display: JobDisplay {
                job_symbol: treeherder.symbol,
                group_symbol: treeherder.group_symbol,
                group_name: treeherder.group_name,
                job_name: task.metadata.name.clone(),
            },
            state: job_status.state(),
            result: job_status.result(),
            job_kind: treeherder.job_kind,
            tier: treeherder.tier,
            owner: task.metadata.owner.clone(),
            reason: run.reason_created().as_str().to_owned(),
            product_name: treeherder.product_name,
            build_machine,
            labels,
            job_info: JobInfo {
                summary: task.metadata.description.clone(),
            },
            time_scheduled: run.scheduled().clone(),
            time_started: run.started().cloned(),
            time_completed: run.resolved().cloned(),
            logs: self.logs.resolve_logs(task_id, run_id)?,
            version: JOB_MESSAGE_VERSION,
        }))
    }
}

impl JobMessage {
    /// Returns the log named `name`, if present.
    #[must_use]
    pub fn log(&self, name: &str) -> Option<&LogReference> {
        self.logs.iter().find(|log| log.name == name)
    }
}
