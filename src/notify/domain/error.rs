//! Error types for notification rendering.

use thiserror::Error;

/// Error returned when a message body fails to render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {channel} notification: {reason}")]
pub struct RenderError {
    /// Channel whose template failed.
    pub channel: String,
    /// Underlying template engine message.
    pub reason: String,
}
