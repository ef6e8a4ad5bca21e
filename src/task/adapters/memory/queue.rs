//! In-memory expiry queue adapter.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::ports::{ExpiryQueue, ExpiryQueueError, ExpiryQueueResult, ExpiryRecord};

/// Thread-safe in-memory expiry queue.
///
/// Tests drain the queue and feed records to the expiry processor by hand,
/// standing in for the external substrate's delivery loop.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExpiryQueue {
    records: Arc<RwLock<Vec<ExpiryRecord>>>,
}

impl InMemoryExpiryQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the queued records without consuming them.
    ///
    /// # Errors
    ///
    /// Returns [`ExpiryQueueError::Queue`] when the lock is poisoned.
    pub fn records(&self) -> ExpiryQueueResult<Vec<ExpiryRecord>> {
        Ok(self.read()?.clone())
    }

    /// Removes and returns every queued record.
    ///
    /// # Errors
    ///
    /// Returns [`ExpiryQueueError::Queue`] when the lock is poisoned.
    pub fn drain(&self) -> ExpiryQueueResult<Vec<ExpiryRecord>> {
        let mut records = self
            .records
            .write()
            .map_err(|err| ExpiryQueueError::queue(std::io::Error::other(err.to_string())))?;
        Ok(records.drain(..).collect())
    }

    fn read(&self) -> ExpiryQueueResult<std::sync::RwLockReadGuard<'_, Vec<ExpiryRecord>>> {
        self.records
            .read()
            .map_err(|err| ExpiryQueueError::queue(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl ExpiryQueue for InMemoryExpiryQueue {
    async fn enqueue(&self, record: &ExpiryRecord) -> ExpiryQueueResult<()> {
        self.records
            .write()
            .map_err(|err| ExpiryQueueError::queue(std::io::Error::other(err.to_string())))?
            .push(record.clone());
        Ok(())
    }
}
