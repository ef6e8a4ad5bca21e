//! Port contracts for notification delivery.

mod dispatcher;

pub use dispatcher::{DispatchError, DispatchResult, NotificationDispatcher};
