//! Given steps for exception-run reporting BDD scenarios.

use super::world::JobExceptionWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use treeherder_bridge::job::domain::{ReasonCreated, ReasonResolved, Run, RunId, RunState};

#[given("the reporting task fixture")]
fn reporting_task_fixture(world: &mut JobExceptionWorld) -> Result<(), eyre::Report> {
    let task = JobExceptionWorld::load_task_fixture().wrap_err("decode task fixture")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"run {run_id:u32} is an exception run created as "{reason}""#)]
fn exception_run(
    world: &mut JobExceptionWorld,
    run_id: u32,
    reason: String,
) -> Result<(), eyre::Report> {
    let reason_created = ReasonCreated::try_from(reason.as_str())
        .map_err(|err| eyre::eyre!("invalid reason in scenario: {err}"))?;
    let run = Run::new(
        RunId::new(run_id),
        RunState::Exception,
        reason_created,
        world.scheduled.clone(),
    )
    .with_started(world.started.clone())
    .with_resolved(world.resolved.clone());

    let slot = world
        .notification
        .status
        .runs_mut()
        .get_mut(RunId::new(run_id).as_index())
        .ok_or_else(|| eyre::eyre!("status fixture has no run {run_id}"))?;
    *slot = run;
    Ok(())
}

#[given(r#"the run was resolved as "{reason}""#)]
fn run_resolved_as(world: &mut JobExceptionWorld, reason: String) -> Result<(), eyre::Report> {
    let reason_resolved = ReasonResolved::try_from(reason.as_str())
        .map_err(|err| eyre::eyre!("invalid reason in scenario: {err}"))?;
    let run_id = world.notification.run_id;
    let slot = world
        .notification
        .status
        .runs_mut()
        .get_mut(run_id.as_index())
        .ok_or_else(|| eyre::eyre!("status fixture has no run {run_id}"))?;
    *slot = slot.clone().with_reason_resolved(reason_resolved);
    Ok(())
}
