//! Step definitions for task deadline BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
