//! Repair repository implementation.
//!
//! A repair save replaces the whole item list, so the record update
//! and the item rewrite share one transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::repair::{self, Entity as RepairEntity};
use super::entities::{repair_item, repair_note, user};
use crate::domain::{OrderStatus, RepairItem, RepairNote, RepairRecord, SaveRepair};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Repair repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RepairRepository: Send + Sync {
    /// Find repair record by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RepairRecord>>;

    /// Find the most recent repair record for a work order
    async fn latest_for_order(&self, order_id: Uuid) -> AppResult<Option<RepairRecord>>;

    /// Create a fresh repair record for a work order
    async fn create_for_order(
        &self,
        order_id: Uuid,
        assigned_technician_id: Option<Uuid>,
    ) -> AppResult<RepairRecord>;

    /// Save status, diagnosis, working notes and the full item list
    async fn save(&self, id: Uuid, data: SaveRepair) -> AppResult<RepairRecord>;

    /// Point the repair at a technician (assignment reconciliation)
    async fn set_assigned_technician(&self, id: Uuid, technician_id: Uuid) -> AppResult<()>;

    /// List the repair's billable items
    async fn items_for(&self, repair_id: Uuid) -> AppResult<Vec<RepairItem>>;

    /// Append a note to the repair's thread
    async fn add_note(&self, repair_id: Uuid, author_id: Uuid, message: &str)
        -> AppResult<RepairNote>;

    /// List the repair's note thread, oldest first, with author names
    async fn notes_for(&self, repair_id: Uuid) -> AppResult<Vec<RepairNote>>;
}

/// Concrete implementation of RepairRepository
pub struct RepairStore {
    db: DatabaseConnection,
}

impl RepairStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Save body executed inside the transaction
async fn save_within(
    txn: &DatabaseTransaction,
    id: Uuid,
    data: &SaveRepair,
) -> AppResult<RepairRecord> {
    let model = RepairEntity::find_by_id(id)
        .one(txn)
        .await
        .map_err(AppError::from)?
        .ok_or(AppError::NotFound)?;

    let mut active: repair::ActiveModel = model.into();
    active.status = Set(data.status.to_string());
    active.diagnostic = Set(data.diagnostic.clone());
    active.notes = Set(data.notes.clone());
    active.updated_at = Set(chrono::Utc::now());

    let record = active.update(txn).await.map_err(AppError::from)?;

    // Replace the item list wholesale
    repair_item::Entity::delete_many()
        .filter(repair_item::Column::RepairId.eq(id))
        .exec(txn)
        .await
        .map_err(AppError::from)?;

    for item in &data.items {
        let active_item = repair_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            repair_id: Set(id),
            kind: Set(item.kind.to_string()),
            label: Set(item.label.clone()),
            qty: Set(item.qty),
            unit_price: Set(item.unit_price),
        };
        active_item.insert(txn).await.map_err(AppError::from)?;
    }

    Ok(RepairRecord::from(record))
}

#[async_trait]
impl RepairRepository for RepairStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RepairRecord>> {
        let result = RepairEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(RepairRecord::from))
    }

    async fn latest_for_order(&self, order_id: Uuid) -> AppResult<Option<RepairRecord>> {
        let result = RepairEntity::find()
            .filter(repair::Column::WorkOrderId.eq(order_id))
            .order_by_desc(repair::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(RepairRecord::from))
    }

    async fn create_for_order(
        &self,
        order_id: Uuid,
        assigned_technician_id: Option<Uuid>,
    ) -> AppResult<RepairRecord> {
        let now = chrono::Utc::now();
        let active_model = repair::ActiveModel {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(order_id),
            assigned_technician_id: Set(assigned_technician_id),
            status: Set(OrderStatus::InProgress.to_string()),
            diagnostic: Set(String::new()),
            notes: Set(String::new()),
            taken_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(RepairRecord::from(model))
    }

    async fn save(&self, id: Uuid, data: SaveRepair) -> AppResult<RepairRecord> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let result = save_within(&txn, id, &data).await;

        match result {
            Ok(record) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(record)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn set_assigned_technician(&self, id: Uuid, technician_id: Uuid) -> AppResult<()> {
        let model = RepairEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: repair::ActiveModel = model.into();
        active.assigned_technician_id = Set(Some(technician_id));
        active.updated_at = Set(chrono::Utc::now());

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn items_for(&self, repair_id: Uuid) -> AppResult<Vec<RepairItem>> {
        let models = repair_item::Entity::find()
            .filter(repair_item::Column::RepairId.eq(repair_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(RepairItem::from).collect())
    }

    async fn add_note(
        &self,
        repair_id: Uuid,
        author_id: Uuid,
        message: &str,
    ) -> AppResult<RepairNote> {
        let active_model = repair_note::ActiveModel {
            id: Set(Uuid::new_v4()),
            repair_id: Set(repair_id),
            user_id: Set(author_id),
            message: Set(message.to_string()),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(RepairNote::from(model))
    }

    async fn notes_for(&self, repair_id: Uuid) -> AppResult<Vec<RepairNote>> {
        let models = repair_note::Entity::find()
            .filter(repair_note::Column::RepairId.eq(repair_id))
            .order_by_asc(repair_note::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        // Resolve author display names in one query
        let mut author_ids: Vec<Uuid> = models.iter().map(|m| m.user_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<Uuid, String> = if author_ids.is_empty() {
            HashMap::new()
        } else {
            user::Entity::find()
                .filter(user::Column::Id.is_in(author_ids))
                .all(&self.db)
                .await
                .map_err(AppError::from)?
                .into_iter()
                .map(|u| (u.id, u.name))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| {
                let mut note = RepairNote::from(m);
                note.author_name = authors.get(&note.author_id).cloned();
                note
            })
            .collect())
    }
}
