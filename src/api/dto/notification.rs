//! Notification DTOs for API responses.

use crate::models::{Notification, NotificationKind, NotificationStatus};
use serde::Serialize;
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

/// Response body for notification data.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: Option<JsonValue>,
    pub status: NotificationStatus,
    pub read_at: Option<String>,
    pub created_at: String,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind,
            title: notification.title,
            message: notification.message,
            data: notification.data,
            status: notification.status,
            read_at: notification
                .read_at
                .map(|t| t.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
            created_at: notification
                .created_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
        }
    }
}
