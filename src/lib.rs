//! Remit: task assignment and deadline escalation engine.
//!
//! This crate tracks work items that are assigned to a responsible party,
//! carry an optional deadline, and must raise time-based warnings and
//! escalations without manual polling.
//!
//! # Architecture
//!
//! Remit follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (stores, registries, etc.)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, deadline scheduling, and expiry handling
//! - [`notify`]: Notification rendering and best-effort dispatch

pub mod notify;
pub mod task;
