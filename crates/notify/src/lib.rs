//! # Outbound Dispatch
//!
//! Best-effort side channels for the scheduling flows: a guardian/teacher
//! message dispatcher and a calendar sync client. Both post JSON to a webhook
//! when one is configured and fall back to a logged simulation when not, so a
//! development deployment behaves like production minus the network hop.
//!
//! Dispatch runs after the authoritative lesson write has committed. A failed
//! or slow dispatch is logged and dropped; it never rolls back or blocks the
//! lesson itself.

pub mod message;

use chrono::{DateTime, Utc};
use eyre::Result;
use serde::{Deserialize, Serialize};
use std::env;
use uuid::Uuid;

/// Category tag carried on every outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    Created,
    Updated,
    Cancelled,
}

/// Delivery acknowledgment from the notification channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub message_id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
struct NotificationPayload<'a> {
    to: &'a str,
    message: &'a str,
    #[serde(rename = "type")]
    category: MessageCategory,
}

/// Client for the guardian/teacher notification channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    http: reqwest::Client,
    webhook_url: Option<String>,
}

impl Notifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            webhook_url,
        }
    }

    /// Reads `NOTIFY_WEBHOOK_URL`; unset means simulated delivery.
    pub fn from_env() -> Self {
        Self::new(env::var("NOTIFY_WEBHOOK_URL").ok())
    }

    /// Dispatches one message to `to`. Callers treat the result as advisory:
    /// log the error, keep the lesson.
    pub async fn send(
        &self,
        to: &str,
        message: &str,
        category: MessageCategory,
    ) -> Result<DeliveryReceipt> {
        let payload = NotificationPayload { to, message, category };

        let Some(url) = self.webhook_url.as_deref() else {
            tracing::info!(to, ?category, text = message, "simulated notification delivery");
            return Ok(DeliveryReceipt {
                message_id: format!("sim_{}", Uuid::new_v4()),
                status: "delivered".to_string(),
            });
        };

        let receipt = self
            .http
            .post(url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json::<DeliveryReceipt>()
            .await?;

        Ok(receipt)
    }
}

/// What to do with a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarAction {
    Create,
    Update,
    Delete,
}

/// Event description sent to the calendar channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub attendees: Vec<String>,
}

/// Handle returned by the calendar channel, kept so a later update or delete
/// can address the same event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventHandle {
    pub event_id: String,
    pub status: String,
    #[serde(default)]
    pub html_link: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct CalendarPayload<'a> {
    #[serde(flatten)]
    event: &'a CalendarEvent,
    action: CalendarAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_id: Option<&'a str>,
}

/// Client for the calendar sync channel. Same best-effort contract as
/// [`Notifier`].
#[derive(Debug, Clone)]
pub struct Calendar {
    http: reqwest::Client,
    webhook_url: Option<String>,
}

impl Calendar {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            webhook_url,
        }
    }

    /// Reads `CALENDAR_WEBHOOK_URL`; unset means simulated delivery.
    pub fn from_env() -> Self {
        Self::new(env::var("CALENDAR_WEBHOOK_URL").ok())
    }

    pub async fn sync_event(
        &self,
        event: &CalendarEvent,
        action: CalendarAction,
        event_id: Option<&str>,
    ) -> Result<EventHandle> {
        let payload = CalendarPayload { event, action, event_id };

        let Some(url) = self.webhook_url.as_deref() else {
            tracing::info!(
                ?action,
                summary = event.summary,
                start = %event.start,
                "simulated calendar sync"
            );
            return Ok(EventHandle {
                event_id: event_id
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("sim_event_{}", Uuid::new_v4())),
                status: "confirmed".to_string(),
                html_link: None,
            });
        };

        let handle = self
            .http
            .post(url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json::<EventHandle>()
            .await?;

        Ok(handle)
    }
}
