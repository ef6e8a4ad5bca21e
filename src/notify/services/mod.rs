//! Orchestration services for notification delivery.

mod coordinator;

pub use coordinator::{NotificationCoordinator, render};
