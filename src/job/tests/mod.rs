//! Unit tests for the job reporting module.
//!
//! Tests are organised by component: routing keys, run outcomes, log
//! references, message assembly, and the status handler.

mod message_tests;
