//! Repair service - Workshop-side state of a work order.
//!
//! The repair record is created lazily the first time anyone opens the
//! workshop view of an order. Saving it is permission gated; appending
//! a note additionally reconciles a stale assignment snapshot and
//! triggers the notification fan-out.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{can_edit_ticket, Actor, RepairDetail, RepairNote, SaveRepair};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{RepairRepository, UserRepository, WorkOrderRepository};
use crate::services::NotificationService;

/// Repair service trait for dependency injection
#[async_trait]
pub trait RepairService: Send + Sync {
    /// Fetch the order's repair record, creating it on first access
    async fn repair_for_order(&self, order_id: Uuid) -> AppResult<RepairDetail>;

    /// Persist diagnosis, status and the full item list
    async fn save_repair(
        &self,
        repair_id: Uuid,
        actor: &Actor,
        data: SaveRepair,
    ) -> AppResult<RepairDetail>;

    /// Append a note to the thread and notify the other side
    async fn append_note(
        &self,
        repair_id: Uuid,
        author_id: Uuid,
        message: &str,
    ) -> AppResult<RepairNote>;

    /// The note thread, oldest first
    async fn notes_for_repair(&self, repair_id: Uuid) -> AppResult<Vec<RepairNote>>;
}

/// Concrete implementation of RepairService
pub struct RepairManager {
    repairs: Arc<dyn RepairRepository>,
    orders: Arc<dyn WorkOrderRepository>,
    users: Arc<dyn UserRepository>,
    notifier: Arc<dyn NotificationService>,
}

impl RepairManager {
    /// Create new repair service instance
    pub fn new(
        repairs: Arc<dyn RepairRepository>,
        orders: Arc<dyn WorkOrderRepository>,
        users: Arc<dyn UserRepository>,
        notifier: Arc<dyn NotificationService>,
    ) -> Self {
        Self {
            repairs,
            orders,
            users,
            notifier,
        }
    }

    async fn detail(&self, repair_id: Uuid) -> AppResult<RepairDetail> {
        let record = self.repairs.find_by_id(repair_id).await?.ok_or_not_found()?;
        let items = self.repairs.items_for(repair_id).await?;
        let notes = self.repairs.notes_for(repair_id).await?;
        Ok(RepairDetail {
            record,
            items,
            notes,
        })
    }
}

#[async_trait]
impl RepairService for RepairManager {
    async fn repair_for_order(&self, order_id: Uuid) -> AppResult<RepairDetail> {
        let order = self.orders.find_by_id(order_id).await?.ok_or_not_found()?;

        let record = match self.repairs.latest_for_order(order_id).await? {
            Some(record) => record,
            // First workshop access creates the record, inheriting the
            // order's current assignment
            None => {
                self.repairs
                    .create_for_order(order_id, order.assigned_user_id)
                    .await?
            }
        };

        self.detail(record.id).await
    }

    async fn save_repair(
        &self,
        repair_id: Uuid,
        actor: &Actor,
        data: SaveRepair,
    ) -> AppResult<RepairDetail> {
        let record = self.repairs.find_by_id(repair_id).await?.ok_or_not_found()?;
        let order = self
            .orders
            .find_by_id(record.work_order_id)
            .await?
            .ok_or_not_found()?;

        if !can_edit_ticket(actor.role, actor.id, order.assigned_user_id) {
            return Err(AppError::Forbidden);
        }

        self.repairs.save(repair_id, data).await?;
        self.detail(repair_id).await
    }

    async fn append_note(
        &self,
        repair_id: Uuid,
        author_id: Uuid,
        message: &str,
    ) -> AppResult<RepairNote> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(AppError::EmptyMessage);
        }

        let repair = self.repairs.find_by_id(repair_id).await?.ok_or_not_found()?;
        let order = self
            .orders
            .find_by_id(repair.work_order_id)
            .await?
            .ok_or_not_found()?;
        let author = self.users.find_by_id(author_id).await?.ok_or_not_found()?;

        // Repairs created before the order was claimed still carry no
        // technician; adopt the order's assignment before routing
        let assigned_technician = match (repair.assigned_technician_id, order.assigned_user_id) {
            (None, Some(owner)) => {
                self.repairs
                    .set_assigned_technician(repair.id, owner)
                    .await?;
                Some(owner)
            }
            (current, _) => current,
        };

        let mut note = self.repairs.add_note(repair.id, author.id, trimmed).await?;
        note.author_name = Some(author.name.clone());

        // Fan-out is best effort; a delivery problem must not lose the
        // note that was already written
        if let Err(e) = self
            .notifier
            .note_added(&order, repair.id, &author, assigned_technician)
            .await
        {
            tracing::warn!(
                repair_id = %repair.id,
                error = %e,
                "note notification fan-out failed"
            );
        }

        Ok(note)
    }

    async fn notes_for_repair(&self, repair_id: Uuid) -> AppResult<Vec<RepairNote>> {
        self.repairs.find_by_id(repair_id).await?.ok_or_not_found()?;
        self.repairs.notes_for(repair_id).await
    }
}
