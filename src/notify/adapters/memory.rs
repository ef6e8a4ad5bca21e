//! In-memory notification dispatcher adapter.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::notify::{
    domain::Notification,
    ports::{DispatchError, DispatchResult, NotificationDispatcher},
};

/// Thread-safe in-memory dispatcher recording every published message.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDispatcher {
    published: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryDispatcher {
    /// Creates a dispatcher with no published messages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every published notification in order.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Dispatch`] when the lock is poisoned.
    pub fn published(&self) -> DispatchResult<Vec<Notification>> {
        self.published
            .read()
            .map(|published| published.clone())
            .map_err(|err| DispatchError::dispatch(std::io::Error::other(err.to_string())))
    }

    /// Returns the published notifications on a channel, in order.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Dispatch`] when the lock is poisoned.
    pub fn published_on(&self, channel: &str) -> DispatchResult<Vec<Notification>> {
        Ok(self
            .published()?
            .into_iter()
            .filter(|notification| notification.channel == channel)
            .collect())
    }
}

#[async_trait]
impl NotificationDispatcher for InMemoryDispatcher {
    async fn publish(&self, notification: &Notification) -> DispatchResult<()> {
        self.published
            .write()
            .map_err(|err| DispatchError::dispatch(std::io::Error::other(err.to_string())))?
            .push(notification.clone());
        Ok(())
    }
}
