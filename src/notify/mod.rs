//! Notification rendering and dispatch for Remit.
//!
//! Maps lifecycle and scheduler events to per-kind channels, renders
//! human-readable message bodies, and publishes them best-effort: delivery
//! failures are logged and suppressed, never failing the state change that
//! raised the event.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The coordinator service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
