//! Dispatcher port over the external pub/sub substrate.

use crate::notify::domain::Notification;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Contract over the external pub/sub notification dispatcher.
///
/// Each notification targets one logical channel; subscribers filter on
/// the structured attributes (recipient identity in particular).
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Publishes a rendered notification to its channel.
    async fn publish(&self, notification: &Notification) -> DispatchResult<()>;
}

/// Errors returned by dispatcher implementations.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// Backend pub/sub failure.
    #[error("notification dispatch error: {0}")]
    Dispatch(Arc<dyn std::error::Error + Send + Sync>),
}

impl DispatchError {
    /// Wraps a backend error.
    pub fn dispatch(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Dispatch(Arc::new(err))
    }
}
