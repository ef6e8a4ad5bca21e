//! In-memory trigger registry adapter with call recording.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::ports::{
    TriggerHandler, TriggerPayload, TriggerRegistry, TriggerRegistryError, TriggerRegistryResult,
};

/// A live registration held by the in-memory registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmedTrigger {
    /// Registration name.
    pub name: String,
    /// Instant the trigger fires.
    pub fire_at: DateTime<Utc>,
    /// Payload delivered on firing.
    pub payload: TriggerPayload,
    /// Handler the firing is routed to.
    pub handler: TriggerHandler,
}

/// One registry call, recorded for invariant assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerCall {
    /// An `arm` call.
    Arm {
        /// Registration name.
        name: String,
        /// Requested fire instant.
        fire_at: DateTime<Utc>,
    },
    /// A `cancel` call.
    Cancel {
        /// Registration name.
        name: String,
        /// Whether a live registration was removed.
        removed: bool,
    },
}

#[derive(Debug, Default)]
struct RegistryState {
    armed: BTreeMap<String, ArmedTrigger>,
    calls: Vec<TriggerCall>,
}

/// Thread-safe in-memory trigger registry.
///
/// Arming a name that is already registered is a conflict, mirroring the
/// external registry; cancelling an unknown name succeeds. Every call is
/// recorded so tests can check the at-most-one-trigger invariants.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTriggerRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl InMemoryTriggerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently armed registrations in name order.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerRegistryError::Registry`] when the lock is poisoned.
    pub fn armed(&self) -> TriggerRegistryResult<Vec<ArmedTrigger>> {
        Ok(self.read()?.armed.values().cloned().collect())
    }

    /// Returns the live registration under a name, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerRegistryError::Registry`] when the lock is poisoned.
    pub fn armed_trigger(&self, name: &str) -> TriggerRegistryResult<Option<ArmedTrigger>> {
        Ok(self.read()?.armed.get(name).cloned())
    }

    /// Returns every call made against the registry, in order.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerRegistryError::Registry`] when the lock is poisoned.
    pub fn calls(&self) -> TriggerRegistryResult<Vec<TriggerCall>> {
        Ok(self.read()?.calls.clone())
    }

    /// Counts `arm` calls issued for a name.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerRegistryError::Registry`] when the lock is poisoned.
    pub fn arm_count(&self, name: &str) -> TriggerRegistryResult<usize> {
        Ok(self
            .read()?
            .calls
            .iter()
            .filter(|call| matches!(call, TriggerCall::Arm { name: n, .. } if n == name))
            .count())
    }

    fn read(&self) -> TriggerRegistryResult<std::sync::RwLockReadGuard<'_, RegistryState>> {
        self.state
            .read()
            .map_err(|err| TriggerRegistryError::registry(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TriggerRegistryResult<std::sync::RwLockWriteGuard<'_, RegistryState>> {
        self.state
            .write()
            .map_err(|err| TriggerRegistryError::registry(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl TriggerRegistry for InMemoryTriggerRegistry {
    async fn arm(
        &self,
        name: &str,
        fire_at: DateTime<Utc>,
        payload: TriggerPayload,
        handler: TriggerHandler,
    ) -> TriggerRegistryResult<()> {
        let mut state = self.write()?;
        state.calls.push(TriggerCall::Arm {
            name: name.to_owned(),
            fire_at,
        });
        if state.armed.contains_key(name) {
            return Err(TriggerRegistryError::AlreadyArmed(name.to_owned()));
        }
        state.armed.insert(
            name.to_owned(),
            ArmedTrigger {
                name: name.to_owned(),
                fire_at,
                payload,
                handler,
            },
        );
        Ok(())
    }

    async fn cancel(&self, name: &str) -> TriggerRegistryResult<()> {
        let mut state = self.write()?;
        let removed = state.armed.remove(name).is_some();
        state.calls.push(TriggerCall::Cancel {
            name: name.to_owned(),
            removed,
        });
        Ok(())
    }
}
