//! Adapter implementations of the task engine's ports.

pub mod memory;
