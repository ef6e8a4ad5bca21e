//! Store port wrapping the external key-value task record store.

use crate::task::domain::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Default page size when a scan does not request one.
pub const DEFAULT_SCAN_LIMIT: usize = 100;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Typed contract over the external key-value store.
///
/// The store offers no transactions and no optimistic-concurrency tokens:
/// `put` is a full-record upsert and the last writer wins. Callers must
/// read-modify-write; there is no partial patch at this layer.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Fetches a task by id.
    ///
    /// Returns `None` when the record does not exist.
    async fn get(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Upserts the full task record.
    async fn put(&self, task: &Task) -> TaskStoreResult<()>;

    /// Removes a task record unconditionally.
    ///
    /// Deleting an absent record succeeds.
    async fn delete(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Scans task records with filtering and page-local sorting.
    ///
    /// The sort is applied client-side after the store returns its page, so
    /// ordering is only correct within a single page and pagination tokens
    /// do not yield a globally sorted sequence. This is a documented
    /// boundary behaviour of the store contract, not an adapter defect.
    async fn scan(&self, query: &ScanQuery) -> TaskStoreResult<ScanPage>;
}

/// Equality and substring filters applied during a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanFilter {
    status: Option<TaskStatus>,
    responsibility: Option<String>,
    description: Option<String>,
    title_contains: Option<String>,
}

impl ScanFilter {
    /// Creates an empty filter matching every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters on exact status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filters on exact assignee identity.
    #[must_use]
    pub fn with_responsibility(mut self, responsibility: impl Into<String>) -> Self {
        self.responsibility = Some(responsibility.into());
        self
    }

    /// Filters on exact description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Filters on titles containing the given fragment.
    #[must_use]
    pub fn with_title_contains(mut self, fragment: impl Into<String>) -> Self {
        self.title_contains = Some(fragment.into());
        self
    }

    /// Returns true when the task satisfies every set predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self
                .responsibility
                .as_deref()
                .is_none_or(|r| task.responsibility() == r)
            && self
                .description
                .as_deref()
                .is_none_or(|d| task.description() == d)
            && self
                .title_contains
                .as_deref()
                .is_none_or(|fragment| task.title().contains(fragment))
    }
}

/// Sort keys the scan contract accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Sort by completion timestamp.
    CompletedAt,
    /// Sort by deadline (the fallback key).
    #[default]
    Deadline,
    /// Sort by title.
    Title,
    /// Sort by status.
    Status,
    /// Sort by assignee identity.
    Responsibility,
    /// Sort by description.
    Description,
}

impl SortKey {
    /// Parses a requested sort key, falling back to [`SortKey::Deadline`]
    /// when the value is not in the allowed set.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "completed_at" => Self::CompletedAt,
            "title" => Self::Title,
            "status" => Self::Status,
            "responsibility" => Self::Responsibility,
            "description" => Self::Description,
            _ => Self::Deadline,
        }
    }

    /// Orders two tasks under this key.
    #[must_use]
    pub fn compare(self, a: &Task, b: &Task) -> std::cmp::Ordering {
        match self {
            Self::CompletedAt => a.completed_at().cmp(&b.completed_at()),
            Self::Deadline => a.deadline().cmp(&b.deadline()),
            Self::Title => a.title().cmp(b.title()),
            Self::Status => a.status().as_str().cmp(b.status().as_str()),
            Self::Responsibility => a.responsibility().cmp(b.responsibility()),
            Self::Description => a.description().cmp(b.description()),
        }
    }
}

/// Scan request: filters, sort key, page size, and resume cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanQuery {
    filter: ScanFilter,
    sort: SortKey,
    limit: Option<usize>,
    cursor: Option<String>,
}

impl ScanQuery {
    /// Creates a scan over every record with default sorting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: ScanFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the sort key.
    #[must_use]
    pub const fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Resumes from a cursor returned by a previous page.
    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Returns the filter.
    #[must_use]
    pub const fn filter(&self) -> &ScanFilter {
        &self.filter
    }

    /// Returns the sort key.
    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    /// Returns the effective page size.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_SCAN_LIMIT)
    }

    /// Returns the resume cursor, if any.
    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }
}

/// One page of scan results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    /// Matching tasks, sorted within this page only.
    pub items: Vec<Task>,
    /// Cursor resuming the scan, absent on the last page.
    pub next_cursor: Option<String>,
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The resume cursor could not be interpreted.
    #[error("invalid scan cursor: {0}")]
    InvalidCursor(String),

    /// Backend storage failure.
    #[error("store backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
