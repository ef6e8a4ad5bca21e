//! Unit and service tests for the task engine.

mod scheduler_tests;
mod support;
