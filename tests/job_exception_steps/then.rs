//! Then steps for exception-run reporting BDD scenarios.

use super::world::JobExceptionWorld;
use rstest_bdd_macros::then;
use treeherder_bridge::job::{
    adapters::memory::PublishedJob,
    services::HandleOutcome,
};

fn last_published(world: &JobExceptionWorld) -> Result<PublishedJob, eyre::Report> {
    match world.last_result.as_ref() {
        Some(Ok(HandleOutcome::Published { .. })) => {}
        other => return Err(eyre::eyre!("expected a published job, got {other:?}")),
    }
    if world.publisher.len() != 1 {
        return Err(eyre::eyre!(
            "expected exactly one published job, found {}",
            world.publisher.len()
        ));
    }
    world
        .publisher
        .last()
        .ok_or_else(|| eyre::eyre!("publisher recorded nothing"))
}

#[then(r#"a job is published with state "{state}" and result "{result}""#)]
fn job_published_with(
    world: &JobExceptionWorld,
    state: String,
    result: String,
) -> Result<(), eyre::Report> {
    let published = last_published(world)?;
    let actual_state = published.job.state.as_str();
    let actual_result = published.job.result.map(|value| value.as_str());

    if actual_state != state || actual_result != Some(result.as_str()) {
        return Err(eyre::eyre!(
            "expected {state}/{result}, found {actual_state}/{actual_result:?}"
        ));
    }
    Ok(())
}

#[then("the job times match the run's start and resolution")]
fn job_times_match(world: &JobExceptionWorld) -> Result<(), eyre::Report> {
    let published = last_published(world)?;

    if published.job.time_started.as_ref() != Some(&world.started) {
        return Err(eyre::eyre!(
            "expected timeStarted {}, found {:?}",
            world.started,
            published.job.time_started
        ));
    }
    if published.job.time_completed.as_ref() != Some(&world.resolved) {
        return Err(eyre::eyre!(
            "expected timeCompleted {}, found {:?}",
            world.resolved,
            published.job.time_completed
        ));
    }
    Ok(())
}

#[then(r#"the job links the "{name}" log for run {run_id:u32}"#)]
fn job_links_log(world: &JobExceptionWorld, name: String, run_id: u32) -> Result<(), eyre::Report> {
    let published = last_published(world)?;
    let task_id = world.notification.task_id();
    let expected_url = format!(
        "https://queue.taskcluster.net/v1/task/{task_id}/runs/{run_id}/artifacts/public/logs/live_backing.log"
    );

    match published.job.logs.as_slice() {
        [log] if log.name == name && log.url == expected_url => Ok(()),
        logs => Err(eyre::eyre!(
            "expected a single {name} log at {expected_url}, found {logs:?}"
        )),
    }
}

#[then("no job is published")]
fn no_job_published(world: &JobExceptionWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Ok(HandleOutcome::Suppressed)) if world.publisher.is_empty() => Ok(()),
        other => Err(eyre::eyre!(
            "expected suppression with nothing published, got {other:?} and {} jobs",
            world.publisher.len()
        )),
    }
}
