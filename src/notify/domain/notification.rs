//! Notification kinds, event contexts, and rendered messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute key carrying the recipient identity for subscriber filtering.
pub const RECIPIENT_ATTRIBUTE: &str = "recipient";

/// Attribute key carrying the task id.
pub const TASK_ID_ATTRIBUTE: &str = "task_id";

/// Attribute key carrying the notification kind.
pub const KIND_ATTRIBUTE: &str = "kind";

/// Attribute key carrying the acting identity, when one exists.
pub const ACTOR_ATTRIBUTE: &str = "actor";

/// The event kinds the coordinator publishes, one channel each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A task was created and assigned.
    Assignment,
    /// An open task moved to a new assignee.
    Reassignment,
    /// A completed or expired task was reopened.
    Reopened,
    /// A task was marked completed.
    Completed,
    /// A task's deadline is approaching.
    Warning,
    /// A task's final deadline passed while it was still open.
    Expired,
}

impl NotificationKind {
    /// Returns the logical channel the kind publishes to.
    #[must_use]
    pub const fn channel(self) -> &'static str {
        match self {
            Self::Assignment => "assignment",
            Self::Reassignment => "reassignment",
            Self::Reopened => "reopened",
            Self::Completed => "completed",
            Self::Warning => "warning",
            Self::Expired => "expired",
        }
    }

    /// Returns the message subject line for the kind.
    #[must_use]
    pub const fn subject(self) -> &'static str {
        match self {
            Self::Assignment => "New task assigned to you",
            Self::Reassignment => "Task reassigned to you",
            Self::Reopened => "Task reopened",
            Self::Completed => "Task completed",
            Self::Warning => "Task deadline approaching",
            Self::Expired => "Task deadline reached",
        }
    }

    /// Returns the headline the message body opens with.
    #[must_use]
    pub const fn headline(self) -> &'static str {
        match self {
            Self::Assignment => "A task has been assigned to you.",
            Self::Reassignment => "A task has been reassigned to you.",
            Self::Reopened => "A task you are responsible for has been reopened.",
            Self::Completed => "A task has been marked completed.",
            Self::Warning => "Your task is approaching its deadline.",
            Self::Expired => "Your task has passed its deadline without completion.",
        }
    }
}

/// The facts an event supplies for rendering.
///
/// Carried as plain strings so the notify context stays independent of the
/// task domain types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContext {
    kind: NotificationKind,
    task_id: String,
    title: String,
    description: String,
    deadline: Option<DateTime<Utc>>,
    recipient: String,
    actor: Option<String>,
}

impl NotificationContext {
    /// Creates a context for an event on a task.
    #[must_use]
    pub fn new(
        kind: NotificationKind,
        task_id: impl Into<String>,
        title: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            task_id: task_id.into(),
            title: title.into(),
            description: String::new(),
            deadline: None,
            recipient: recipient.into(),
            actor: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the task deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the acting identity (assigner, reassigner, or completer).
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the task id in display form.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the recipient identity.
    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Returns the acting identity, if any.
    #[must_use]
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}

/// A rendered message ready for publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Logical channel (one per event kind).
    pub channel: String,
    /// Subject line.
    pub subject: String,
    /// Rendered human-readable body.
    pub body: String,
    /// Structured attributes, including the recipient identity.
    pub attributes: BTreeMap<String, String>,
}
