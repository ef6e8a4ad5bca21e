//! Deterministic trigger naming for deadline scheduling.

use super::TaskId;
use std::fmt;

/// The pair of registry names a task's deadline triggers are armed under.
///
/// Names are a pure function of the task id, so a fresh registration for
/// the same task always collides with any prior one and must cancel it
/// first. The registry is never assumed to be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerNames {
    warning: String,
    final_deadline: String,
}

impl TriggerNames {
    /// Derives the trigger names for a task.
    #[must_use]
    pub fn for_task(task_id: TaskId) -> Self {
        Self {
            warning: format!("warn-{task_id}"),
            final_deadline: format!("final-{task_id}"),
        }
    }

    /// Returns the warning trigger name.
    #[must_use]
    pub fn warning(&self) -> &str {
        &self.warning
    }

    /// Returns the final deadline trigger name.
    #[must_use]
    pub fn final_deadline(&self) -> &str {
        &self.final_deadline
    }
}

impl fmt::Display for TriggerNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.warning, self.final_deadline)
    }
}
