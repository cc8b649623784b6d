//! Step definitions for exception-run reporting scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
