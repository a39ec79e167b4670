//! In-app notification domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Notification domain entity.
///
/// Every inbox operation is scoped by `(id, user_id)` so one user can
/// never read or delete another user's notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    /// Recipient
    pub user_id: Uuid,
    pub work_order_id: Uuid,
    pub repair_id: Uuid,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert data handed to the notification repository
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub work_order_id: Uuid,
    pub repair_id: Uuid,
    pub message: String,
}

/// Canonical message for a note-added notification
pub fn note_added_message(author_name: &str, form_code: &str) -> String {
    format!("{} added a note to ticket #{}", author_name, form_code)
}

/// Notification response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub work_order_id: Uuid,
    pub repair_id: Uuid,
    #[schema(example = "John Doe added a note to ticket #K7Q2Z")]
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            work_order_id: n.work_order_id,
            repair_id: n.repair_id,
            message: n.message,
            read: n.read,
            created_at: n.created_at,
        }
    }
}
