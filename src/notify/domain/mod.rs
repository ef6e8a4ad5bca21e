//! Domain model for outbound notifications.

mod error;
mod notification;

pub use error::RenderError;
pub use notification::{
    ACTOR_ATTRIBUTE, KIND_ATTRIBUTE, Notification, NotificationContext, NotificationKind,
    RECIPIENT_ATTRIBUTE, TASK_ID_ATTRIBUTE,
};
