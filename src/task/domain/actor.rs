//! Caller identity resolved from external auth-provider claims.

use super::{Task, TaskDomainError};
use serde::{Deserialize, Serialize};

/// Group name whose members hold the privileged role.
const ADMIN_GROUP: &str = "admin";

/// Opaque claims supplied by the external identity provider.
///
/// The engine never inspects tokens; it receives verified claims per
/// request and resolves them into an [`Actor`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Verified caller identity, absent when authentication failed upstream.
    pub identity: Option<String>,
    /// Group memberships attached to the identity.
    pub groups: Vec<String>,
}

impl Claims {
    /// Creates claims for a verified identity.
    #[must_use]
    pub fn verified(identity: impl Into<String>) -> Self {
        Self {
            identity: Some(identity.into()),
            groups: Vec::new(),
        }
    }

    /// Adds a group membership.
    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Resolves the claims into an acting identity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingIdentity`] when no verified
    /// identity is present.
    pub fn resolve(self) -> Result<Actor, TaskDomainError> {
        let identity = self.identity.ok_or(TaskDomainError::MissingIdentity)?;
        let privileged = self.groups.iter().any(|group| group == ADMIN_GROUP);
        Ok(Actor {
            identity,
            privileged,
        })
    }
}

/// Verified caller acting on a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    identity: String,
    privileged: bool,
}

impl Actor {
    /// Creates an unprivileged actor.
    #[must_use]
    pub fn member(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            privileged: false,
        }
    }

    /// Creates a privileged actor.
    #[must_use]
    pub fn admin(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            privileged: true,
        }
    }

    /// Returns the caller identity.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Returns true when the caller holds the privileged role.
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        self.privileged
    }

    /// Returns true when the caller may act on the task at all.
    ///
    /// Privileged callers act on any task; everyone else only on tasks
    /// whose responsibility matches their identity.
    #[must_use]
    pub fn may_act_on(&self, task: &Task) -> bool {
        self.privileged || task.responsibility() == self.identity
    }
}
