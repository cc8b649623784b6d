//! Job message assembly tests.

use super::fixtures::{
    RESOLVED, ROUTE, SCHEDULED, STARTED, TASK_ID, task, task_id, terminal_run, timestamp,
};
use crate::job::domain::{
    JobMessageBuilder, JobOrigin, JobResult, JobState, JobStatus, LIVE_LOG_NAME, Outcome,
    PushIdentity, ReasonCreated, ReasonResolved, Run, RunId, RunState, TaskStatus,
};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn push() -> PushIdentity {
    PushIdentity::parse(ROUTE).expect("valid route")
}

#[rstest]
fn build_copies_task_and_run_fields(push: PushIdentity) {
    let run = terminal_run(RunState::Exception, ReasonCreated::Scheduled, None);
    let status = TaskStatus::new(task_id(), vec![run.clone()]);

    let job = JobMessageBuilder::default()
        .build(
            &push,
            &task(),
            &status,
            &run,
            Outcome::Normalized(JobStatus::completed(JobResult::Exception)),
        )
        .expect("logs render")
        .expect("not suppressed");

    assert_eq!(job.task_id.as_str(), TASK_ID);
    assert_eq!(job.retry_id, RunId::new(0));
    assert!(!job.is_retried);
    assert_eq!(job.state, JobState::Completed);
    assert_eq!(job.result, Some(JobResult::Exception));
    assert_eq!(job.display.job_symbol, "M1");
    assert_eq!(job.display.job_name, "[TC] Linux64 mochitest-1");
    assert_eq!(job.owner, "tester@example.com");
    assert_eq!(job.reason, "scheduled");
    assert_eq!(job.tier, 2);
    assert_eq!(job.labels, vec!["opt".to_owned()]);
    assert_eq!(
        job.build_machine.as_ref().map(|machine| machine.name.as_str()),
        Some("i-0abc123")
    );
    assert_eq!(job.time_scheduled.as_str(), SCHEDULED);
    assert_eq!(job.time_started.as_ref().map(|t| t.as_str()), Some(STARTED));
    assert_eq!(job.time_completed.as_ref().map(|t| t.as_str()), Some(RESOLVED));
    assert!(job.log(LIVE_LOG_NAME).is_some());
    assert_eq!(
        job.origin,
        JobOrigin::Mercurial {
            project: "mozilla-inbound".to_owned(),
            revision: "e8a4a8a9ba2b4bc1b1d3b5fa23d0c2b51c2c1e44".to_owned(),
            push_log_id: Some(184),
        }
    );
}

#[rstest]
fn build_propagates_suppression(push: PushIdentity) {
    let run = terminal_run(RunState::Exception, ReasonCreated::Exception, None);
    let status = TaskStatus::new(task_id(), vec![run.clone()]);

    let job = JobMessageBuilder::default()
        .build(&push, &task(), &status, &run, Outcome::Suppressed)
        .expect("no rendering needed");

    assert_eq!(job, None);
}

#[rstest]
fn build_preserves_absent_timestamps(push: PushIdentity) {
    let run = Run::new(
        RunId::new(0),
        RunState::Pending,
        ReasonCreated::Scheduled,
        timestamp(SCHEDULED),
    );
    let status = TaskStatus::new(task_id(), vec![run.clone()]);

    let job = JobMessageBuilder::default()
        .build(
            &push,
            &task(),
            &status,
            &run,
            Outcome::Normalized(JobStatus::pending()),
        )
        .expect("logs render")
        .expect("not suppressed");

    assert_eq!(job.time_started, None);
    assert_eq!(job.time_completed, None);
    assert_eq!(job.result, None);
    assert_eq!(job.build_machine.map(|machine| machine.name), Some("unknown".to_owned()));
}

#[rstest]
fn earlier_runs_are_marked_retried(push: PushIdentity) {
    let first = terminal_run(
        RunState::Exception,
        ReasonCreated::Scheduled,
        Some(ReasonResolved::ClaimExpired),
    );
    let second = Run::new(
        RunId::new(1),
        RunState::Pending,
        ReasonCreated::Retry,
        timestamp(RESOLVED),
    );
    let status = TaskStatus::new(task_id(), vec![first.clone(), second]);

    let job = JobMessageBuilder::default()
        .build(
            &push,
            &task(),
            &status,
            &first,
            Outcome::Normalized(JobStatus::completed(JobResult::Retry)),
        )
        .expect("logs render")
        .expect("not suppressed");

    assert!(job.is_retried);
}

#[rstest]
fn serialized_message_uses_wire_field_names(push: PushIdentity) {
    let run = terminal_run(
        RunState::Exception,
        ReasonCreated::Scheduled,
        Some(ReasonResolved::Superseded),
    );
    let status = TaskStatus::new(task_id(), vec![run.clone()]);
    let job = JobMessageBuilder::default()
        .build(
            &push,
            &task(),
            &status,
            &run,
            Outcome::Normalized(JobStatus::completed(JobResult::Coalesced)),
        )
        .expect("logs render")
        .expect("not suppressed");

    let value = serde_json::to_value(&job).expect("serializable");

    assert_eq!(value["taskId"], json!(TASK_ID));
    assert_eq!(value["retryId"], json!(0));
    assert_eq!(value["buildSystem"], json!("taskcluster"));
    assert_eq!(value["state"], json!("completed"));
    assert_eq!(value["result"], json!("coalesced"));
    assert_eq!(value["timeStarted"], json!(STARTED));
    assert_eq!(value["timeCompleted"], json!(RESOLVED));
    assert_eq!(value["origin"]["kind"], json!("hg.mozilla.org"));
    assert_eq!(value["origin"]["pushLogID"], json!(184));
    assert_eq!(value["display"]["groupSymbol"], json!("M"));
    assert_eq!(value["logs"][0]["name"], json!("builds-4h"));
}
