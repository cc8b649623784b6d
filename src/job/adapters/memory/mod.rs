//! In-memory adapters for tests and embedding applications.

mod publisher;

pub use publisher::{PublishedJob, RecordingJobPublisher};
