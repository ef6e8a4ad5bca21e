//! Task lifecycle and deadline scheduling for Remit.
//!
//! This module implements the task lifecycle state machine, the deadline
//! scheduler that arms named warning and final triggers against an external
//! trigger registry, the handlers those triggers invoke, and the expiry
//! processor that hands expired tasks to a downstream workflow. The module
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
