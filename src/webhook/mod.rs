//! Notifier: delivers change notifications to a webhook.
//!
//! This module provides:
//! - The notification value type ([`Notification`], [`NotificationField`])
//! - Formatting of change events ([`change_notification`], [`startup_notification`])
//! - The delivery abstraction ([`Notifier`]) with an HTTP implementation
//!   ([`HttpNotifier`]) and a logging one for dry runs ([`LogNotifier`])
//!
//! Delivery is fire-and-forget: each notification is sent once and failures
//! are reported to the caller, never retried.

mod error;
mod notification;
mod sender;

pub use error::WebhookError;
pub use notification::{
    ABOUT_COLOR, FIELD_VALUE_LIMIT, FOOTER, Notification, NotificationField, PLACE_URL_BASE,
    PRESENCE_COLOR, STARTUP_COLOR, about_notification, change_notification,
    presence_notification, startup_notification,
};
pub use sender::{HttpNotifier, LogNotifier, Notifier, render_template};
