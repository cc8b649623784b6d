//! Job reporting for task-queue run notifications.
//!
//! Each status notification names one run of a task. The run's raw state
//! and reason codes resolve to a normalized job state and result (or to
//! suppression), the task's routing key identifies the push the job belongs
//! to, and the assembled job message is handed to a publisher. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
