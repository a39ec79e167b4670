//! Work order repository implementation.
//!
//! Claiming and reassignment update two things that must never drift
//! apart: the order's assignment fields and the active repair record.
//! Both run inside a single transaction here.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::repair;
use super::entities::work_order::{self, ActiveModel, Entity as WorkOrderEntity};
use crate::config::MAX_ORDER_LIST_SIZE;
use crate::domain::{NewWorkOrder, OrderStatus, WorkOrder};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Work order repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait WorkOrderRepository: Send + Sync {
    /// Find work order by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WorkOrder>>;

    /// Find work order by its public tracking token
    async fn find_by_public_token(&self, token: &str) -> AppResult<Option<WorkOrder>>;

    /// Check whether a form code is already taken
    async fn form_code_exists(&self, code: &str) -> AppResult<bool>;

    /// Create a new work order (status starts at `Received`)
    async fn create(&self, data: NewWorkOrder) -> AppResult<WorkOrder>;

    /// List work orders, newest first, optionally filtered by status
    async fn list_recent(&self, status: Option<OrderStatus>) -> AppResult<Vec<WorkOrder>>;

    /// Atomically claim an order for a technician.
    ///
    /// Succeeds only while the order is unassigned or already held by
    /// the same technician; a concurrent claim by someone else loses
    /// with a conflict. The active repair record is created or updated
    /// in the same transaction.
    async fn claim(
        &self,
        order_id: Uuid,
        technician_id: Uuid,
        technician_name: &str,
    ) -> AppResult<WorkOrder>;

    /// Reassign an order regardless of its current holder.
    ///
    /// Same repair-record synchronization as `claim`, without the
    /// unclaimed guard.
    async fn reassign(
        &self,
        order_id: Uuid,
        technician_id: Uuid,
        technician_name: &str,
    ) -> AppResult<WorkOrder>;
}

/// Guard applied to the assignment update
enum AssignmentGuard {
    /// Succeed only if unassigned or already held by the same user
    IfUnclaimed,
    /// Overwrite whatever is there
    Overwrite,
}

/// Concrete implementation of WorkOrderRepository
pub struct WorkOrderStore {
    db: DatabaseConnection,
}

impl WorkOrderStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn assign_in_transaction(
        &self,
        order_id: Uuid,
        technician_id: Uuid,
        technician_name: &str,
        guard: AssignmentGuard,
    ) -> AppResult<WorkOrder> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let result = assign_within(&txn, order_id, technician_id, technician_name, guard).await;

        match result {
            Ok(order) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(order)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Assignment body executed inside the transaction
async fn assign_within(
    txn: &DatabaseTransaction,
    order_id: Uuid,
    technician_id: Uuid,
    technician_name: &str,
    guard: AssignmentGuard,
) -> AppResult<WorkOrder> {
    // Existence check first, so a missing order surfaces as NotFound
    // rather than a claim conflict
    WorkOrderEntity::find_by_id(order_id)
        .one(txn)
        .await
        .map_err(AppError::from)?
        .ok_or(AppError::NotFound)?;

    let now = chrono::Utc::now();

    let mut update = WorkOrderEntity::update_many()
        .col_expr(work_order::Column::AssignedUserId, Expr::value(technician_id))
        .col_expr(
            work_order::Column::TechnicianName,
            Expr::value(technician_name.to_string()),
        )
        .col_expr(work_order::Column::UpdatedAt, Expr::value(now))
        .filter(work_order::Column::Id.eq(order_id));

    if let AssignmentGuard::IfUnclaimed = guard {
        // Compare-and-set: the losing side of a claim race matches
        // zero rows instead of silently overwriting the winner
        update = update.filter(
            Condition::any()
                .add(work_order::Column::AssignedUserId.is_null())
                .add(work_order::Column::AssignedUserId.eq(technician_id)),
        );
    }

    let updated = update.exec(txn).await.map_err(AppError::from)?;
    if updated.rows_affected == 0 {
        return Err(AppError::conflict(
            "Work order is already claimed by another technician",
        ));
    }

    // Keep the repair record in step with the order
    let existing_repair = repair::Entity::find()
        .filter(repair::Column::WorkOrderId.eq(order_id))
        .order_by_desc(repair::Column::CreatedAt)
        .one(txn)
        .await
        .map_err(AppError::from)?;

    match existing_repair {
        Some(model) => {
            let mut active: repair::ActiveModel = model.into();
            active.assigned_technician_id = Set(Some(technician_id));
            active.taken_at = Set(Some(now));
            active.updated_at = Set(now);
            active.update(txn).await.map_err(AppError::from)?;
        }
        None => {
            let active = repair::ActiveModel {
                id: Set(Uuid::new_v4()),
                work_order_id: Set(order_id),
                assigned_technician_id: Set(Some(technician_id)),
                status: Set(OrderStatus::InProgress.to_string()),
                diagnostic: Set(String::new()),
                notes: Set(String::new()),
                taken_at: Set(Some(now)),
                created_at: Set(now),
                updated_at: Set(now),
            };
            active.insert(txn).await.map_err(AppError::from)?;
        }
    }

    let model = WorkOrderEntity::find_by_id(order_id)
        .one(txn)
        .await
        .map_err(AppError::from)?
        .ok_or(AppError::NotFound)?;

    Ok(WorkOrder::from(model))
}

#[async_trait]
impl WorkOrderRepository for WorkOrderStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WorkOrder>> {
        let result = WorkOrderEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(WorkOrder::from))
    }

    async fn find_by_public_token(&self, token: &str) -> AppResult<Option<WorkOrder>> {
        let result = WorkOrderEntity::find()
            .filter(work_order::Column::PublicToken.eq(token))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(WorkOrder::from))
    }

    async fn form_code_exists(&self, code: &str) -> AppResult<bool> {
        let count = WorkOrderEntity::find()
            .filter(work_order::Column::FormCode.eq(code))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn create(&self, data: NewWorkOrder) -> AppResult<WorkOrder> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            public_token: Set(data.public_token),
            form_code: Set(data.form_code),
            client_id: Set(data.client_id),
            device_type: Set(data.device_type),
            brand: Set(data.brand),
            model: Set(data.model),
            serial_number: Set(data.serial_number),
            problem: Set(data.problem),
            accessories: Set(data.accessories),
            description: Set(data.description),
            status: Set(OrderStatus::Received.to_string()),
            price: Set(data.price),
            warranty: Set(data.warranty),
            assigned_user_id: Set(None),
            technician_name: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(WorkOrder::from(model))
    }

    async fn list_recent(&self, status: Option<OrderStatus>) -> AppResult<Vec<WorkOrder>> {
        let mut query = WorkOrderEntity::find();

        if let Some(status) = status {
            query = query.filter(work_order::Column::Status.eq(status.to_string()));
        }

        let models = query
            .order_by_desc(work_order::Column::CreatedAt)
            .limit(MAX_ORDER_LIST_SIZE)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(WorkOrder::from).collect())
    }

    async fn claim(
        &self,
        order_id: Uuid,
        technician_id: Uuid,
        technician_name: &str,
    ) -> AppResult<WorkOrder> {
        self.assign_in_transaction(
            order_id,
            technician_id,
            technician_name,
            AssignmentGuard::IfUnclaimed,
        )
        .await
    }

    async fn reassign(
        &self,
        order_id: Uuid,
        technician_id: Uuid,
        technician_name: &str,
    ) -> AppResult<WorkOrder> {
        self.assign_in_transaction(
            order_id,
            technician_id,
            technician_name,
            AssignmentGuard::Overwrite,
        )
        .await
    }
}
