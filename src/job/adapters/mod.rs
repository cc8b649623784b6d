//! Adapter implementations of job-reporting ports.

pub mod memory;
