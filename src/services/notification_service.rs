//! Notification service - Routing and inbox access.
//!
//! Routing picks recipients with the pure rules in `domain::routing`;
//! this service resolves the role rosters, renders the message and
//! writes one inbox row per recipient. Delivery is best effort: a
//! failed row is logged and skipped, never bubbled up to the caller
//! that produced the event.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    note_added_message, note_recipients, NewNotification, Notification, User, UserRole, WorkOrder,
};
use crate::errors::AppResult;
use crate::infra::{NotificationRepository, UserRepository};

/// Notification service trait for dependency injection
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Fan a note-added event out to its recipients; returns how many
    /// inbox rows were written
    async fn note_added(
        &self,
        order: &WorkOrder,
        repair_id: Uuid,
        author: &User,
        assigned_technician_id: Option<Uuid>,
    ) -> AppResult<usize>;

    /// Most recent notifications for a user
    async fn inbox(&self, user_id: Uuid) -> AppResult<Vec<Notification>>;

    /// Mark one of the user's notifications as read
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<()>;

    /// Delete one of the user's notifications
    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of NotificationService
pub struct Notifier {
    notifications: Arc<dyn NotificationRepository>,
    users: Arc<dyn UserRepository>,
}

impl Notifier {
    /// Create new notification service instance
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            notifications,
            users,
        }
    }
}

#[async_trait]
impl NotificationService for Notifier {
    async fn note_added(
        &self,
        order: &WorkOrder,
        repair_id: Uuid,
        author: &User,
        assigned_technician_id: Option<Uuid>,
    ) -> AppResult<usize> {
        let (technicians, admins) = tokio::try_join!(
            self.users.list_by_role(UserRole::Technician),
            self.users.list_by_role(UserRole::Admin),
        )?;

        let technician_ids: Vec<Uuid> = technicians.iter().map(|u| u.id).collect();
        let admin_ids: Vec<Uuid> = admins.iter().map(|u| u.id).collect();

        let recipients = note_recipients(
            author.id,
            author.role,
            assigned_technician_id,
            &technician_ids,
            &admin_ids,
        );
        if recipients.is_empty() {
            return Ok(0);
        }

        let message = note_added_message(&author.name, &order.form_code);

        let deliveries = recipients.iter().map(|&recipient| {
            self.notifications.create(NewNotification {
                user_id: recipient,
                work_order_id: order.id,
                repair_id,
                message: message.clone(),
            })
        });
        let results = futures::future::join_all(deliveries).await;

        // One bad row must not starve the rest of the batch
        let mut delivered = 0;
        for (recipient, result) in recipients.iter().zip(results) {
            match result {
                Ok(_) => delivered += 1,
                Err(e) => tracing::warn!(
                    recipient = %recipient,
                    order_id = %order.id,
                    error = %e,
                    "failed to deliver notification"
                ),
            }
        }

        Ok(delivered)
    }

    async fn inbox(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        self.notifications.list_for_user(user_id).await
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        // Idempotent: a foreign or missing id looks exactly like an
        // already-read one
        let _ = self.notifications.mark_read(id, user_id).await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        let _ = self.notifications.delete(id, user_id).await?;
        Ok(())
    }
}
