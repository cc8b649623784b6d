//! When steps for exception-run reporting BDD scenarios.

use super::world::{JobExceptionWorld, run_async};
use rstest_bdd_macros::when;
use treeherder_bridge::job::domain::RunId;

#[when("the status notification for run {run_id:u32} is handled")]
fn notification_handled(world: &mut JobExceptionWorld, run_id: u32) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    world.notification.run_id = RunId::new(run_id);

    let result = run_async(world.handler.handle(task, &world.notification));
    world.last_result = Some(result);
    Ok(())
}
