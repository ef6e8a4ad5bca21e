//! Notification coordinator: render per-kind messages and publish them
//! best-effort.

use minijinja::Environment;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::notify::{
    domain::{
        ACTOR_ATTRIBUTE, KIND_ATTRIBUTE, Notification, NotificationContext, NotificationKind,
        RECIPIENT_ATTRIBUTE, RenderError, TASK_ID_ATTRIBUTE,
    },
    ports::NotificationDispatcher,
};

/// Body template shared by every notification kind.
const BODY_TEMPLATE: &str = "\
{{ headline }}

Task Details:
- Title: {{ title }}
- Description: {{ description }}
- Due Date: {{ deadline }}
- Task ID: {{ task_id }}
{%- if actor %}
- Requested by: {{ actor }}
{%- endif %}
{%- if footer %}

{{ footer }}
{%- endif %}
";

/// Closing line appended to deadline warnings.
const WARNING_FOOTER: &str = "Please ensure you complete this task before the deadline.";

/// Placeholder rendered when a task has no description.
const NO_DESCRIPTION: &str = "No description";

/// Placeholder rendered when a task has no deadline.
const NO_DEADLINE: &str = "No deadline";

/// Renders the message for an event context.
///
/// # Errors
///
/// Returns [`RenderError`] when the template engine rejects the context.
pub fn render(context: &NotificationContext) -> Result<Notification, RenderError> {
    let environment = Environment::new();
    let body = environment
        .render_str(BODY_TEMPLATE, build_template_context(context))
        .map_err(|error| RenderError {
            channel: context.kind().channel().to_owned(),
            reason: error.to_string(),
        })?;

    let mut attributes = BTreeMap::new();
    attributes.insert(
        RECIPIENT_ATTRIBUTE.to_owned(),
        context.recipient().to_owned(),
    );
    attributes.insert(TASK_ID_ATTRIBUTE.to_owned(), context.task_id().to_owned());
    attributes.insert(
        KIND_ATTRIBUTE.to_owned(),
        context.kind().channel().to_owned(),
    );
    if let Some(actor) = context.actor() {
        attributes.insert(ACTOR_ATTRIBUTE.to_owned(), actor.to_owned());
    }

    Ok(Notification {
        channel: context.kind().channel().to_owned(),
        subject: context.kind().subject().to_owned(),
        body,
        attributes,
    })
}

fn build_template_context(context: &NotificationContext) -> Map<String, Value> {
    let description = if context.description().is_empty() {
        NO_DESCRIPTION.to_owned()
    } else {
        context.description().to_owned()
    };
    let deadline = context
        .deadline()
        .map_or_else(|| NO_DEADLINE.to_owned(), |deadline| deadline.to_rfc3339());

    let mut template_context = Map::new();
    template_context.insert(
        "headline".to_owned(),
        Value::String(context.kind().headline().to_owned()),
    );
    template_context.insert("title".to_owned(), Value::String(context.title().to_owned()));
    template_context.insert("description".to_owned(), Value::String(description));
    template_context.insert("deadline".to_owned(), Value::String(deadline));
    template_context.insert(
        "task_id".to_owned(),
        Value::String(context.task_id().to_owned()),
    );
    template_context.insert(
        "actor".to_owned(),
        context
            .actor()
            .map_or(Value::Null, |actor| Value::String(actor.to_owned())),
    );
    template_context.insert(
        "footer".to_owned(),
        if context.kind() == NotificationKind::Warning {
            Value::String(WARNING_FOOTER.to_owned())
        } else {
            Value::Null
        },
    );
    template_context
}

/// Maps events to channels and publishes rendered messages.
///
/// Delivery is fire-and-forget relative to the state change that raised
/// the event: render and publish failures are logged and suppressed so
/// task-state correctness never depends on notification success.
#[derive(Clone)]
pub struct NotificationCoordinator<D>
where
    D: NotificationDispatcher,
{
    dispatcher: Arc<D>,
}

impl<D> NotificationCoordinator<D>
where
    D: NotificationDispatcher,
{
    /// Creates a coordinator publishing through the given dispatcher.
    #[must_use]
    pub const fn new(dispatcher: Arc<D>) -> Self {
        Self { dispatcher }
    }

    /// Renders and publishes the notification for an event, best-effort.
    pub async fn notify(&self, context: NotificationContext) {
        let notification = match render(&context) {
            Ok(notification) => notification,
            Err(error) => {
                tracing::warn!(
                    channel = context.kind().channel(),
                    task_id = context.task_id(),
                    %error,
                    "notification render failed; event not published"
                );
                return;
            }
        };

        if let Err(error) = self.dispatcher.publish(&notification).await {
            tracing::warn!(
                channel = notification.channel.as_str(),
                task_id = context.task_id(),
                %error,
                "notification delivery failed; state change unaffected"
            );
        }
    }
}
