//! Treeherder bridge: task-queue status notifications to CI job reports.
//!
//! This crate translates run status notifications from a distributed task
//! queue into normalized job messages and hands them to a publisher that
//! delivers them to the CI reporting backend, one destination per push.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure mapping logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`job`]: Routing-key parsing, run outcome resolution, log references,
//!   job message assembly and the status handler
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use treeherder_bridge::job::{
//!     adapters::memory::RecordingJobPublisher,
//!     domain::{
//!         ReasonCreated, Run, RunId, RunState, TaskDefinition, TaskId, TaskMetadata,
//!         TaskStatus, Timestamp,
//!     },
//!     services::{HandleOutcome, StatusHandler, StatusNotification},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let task = TaskDefinition::new(TaskMetadata::new("build", "dev@example.com"))
//!     .with_route("tc-treeherder.v2.try.abcdef0123.42");
//! let run = Run::new(
//!     RunId::new(0),
//!     RunState::Exception,
//!     ReasonCreated::Exception,
//!     Timestamp::parse("2016-04-12T16:00:00.000Z")?,
//! );
//! let notification =
//!     StatusNotification::new(TaskStatus::new(TaskId::new("abc")?, vec![run]), RunId::new(0));
//!
//! let publisher = Arc::new(RecordingJobPublisher::new());
//! let handler = StatusHandler::with_defaults(Arc::clone(&publisher));
//! let runtime = tokio::runtime::Runtime::new()?;
//! let outcome = runtime.block_on(handler.handle(&task, &notification))?;
//!
//! assert_eq!(outcome, HandleOutcome::Suppressed);
//! assert!(publisher.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod job;
