//! In-memory task store adapter.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::task::{
    domain::{Task, TaskId},
    ports::{ScanPage, ScanQuery, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Records are kept in id order; a scan cursor is the id of the last
/// record the previous page visited. Matching the store contract, the
/// requested sort is applied to each page after it is fetched, so ordering
/// holds within a page but not across pages.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<BTreeMap<Uuid, Task>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Backend`] when the lock is poisoned.
    pub fn len(&self) -> TaskStoreResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns true when no records are stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Backend`] when the lock is poisoned.
    pub fn is_empty(&self) -> TaskStoreResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> TaskStoreResult<std::sync::RwLockReadGuard<'_, BTreeMap<Uuid, Task>>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::backend(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskStoreResult<std::sync::RwLockWriteGuard<'_, BTreeMap<Uuid, Task>>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::backend(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn get(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        Ok(self.read()?.get(id.as_ref()).cloned())
    }

    async fn put(&self, task: &Task) -> TaskStoreResult<()> {
        self.write()?
            .insert(task.id().into_inner(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        self.write()?.remove(id.as_ref());
        Ok(())
    }

    async fn scan(&self, query: &ScanQuery) -> TaskStoreResult<ScanPage> {
        let resume_after = query
            .cursor()
            .map(|cursor| {
                Uuid::parse_str(cursor)
                    .map_err(|_| TaskStoreError::InvalidCursor(cursor.to_owned()))
            })
            .transpose()?;

        let state = self.read()?;
        let mut items = Vec::new();
        let mut last_visited = None;
        let mut exhausted = true;

        for (key, task) in state.iter() {
            if resume_after.is_some_and(|after| *key <= after) {
                continue;
            }
            if !query.filter().matches(task) {
                continue;
            }
            if items.len() == query.limit() {
                exhausted = false;
                break;
            }
            last_visited = Some(*key);
            items.push(task.clone());
        }

        items.sort_by(|a, b| query.sort().compare(a, b));

        let next_cursor = if exhausted {
            None
        } else {
            last_visited.map(|key| key.to_string())
        };
        Ok(ScanPage { items, next_cursor })
    }
}
