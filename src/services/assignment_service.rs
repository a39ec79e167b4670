//! Assignment service - Who works on which order.
//!
//! Two paths put a technician on an order: a technician claims a free
//! order for themselves, or an admin assigns any technician directly.
//! The claim path is compare-and-set at the store level, so two
//! racing technicians cannot both win.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Actor, WorkOrder};
use crate::errors::{AppError, AppResult};
use crate::infra::{UserRepository, WorkOrderRepository};

/// Assignment service trait for dependency injection
#[async_trait]
pub trait AssignmentService: Send + Sync {
    /// Claim an unassigned order for the acting user
    async fn claim(&self, order_id: Uuid, actor: &Actor) -> AppResult<WorkOrder>;

    /// Assign an order to a technician (admin only, overwrites)
    async fn assign(&self, order_id: Uuid, actor: &Actor, technician_id: Uuid)
        -> AppResult<WorkOrder>;
}

/// Concrete implementation of AssignmentService
pub struct AssignmentManager {
    orders: Arc<dyn WorkOrderRepository>,
    users: Arc<dyn UserRepository>,
}

impl AssignmentManager {
    /// Create new assignment service instance
    pub fn new(orders: Arc<dyn WorkOrderRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { orders, users }
    }
}

#[async_trait]
impl AssignmentService for AssignmentManager {
    async fn claim(&self, order_id: Uuid, actor: &Actor) -> AppResult<WorkOrder> {
        self.orders.claim(order_id, actor.id, &actor.name).await
    }

    async fn assign(
        &self,
        order_id: Uuid,
        actor: &Actor,
        technician_id: Uuid,
    ) -> AppResult<WorkOrder> {
        if !actor.role.is_admin() {
            return Err(AppError::Forbidden);
        }

        let target = self
            .users
            .find_by_id(technician_id)
            .await?
            .ok_or(AppError::InvalidTarget)?;

        self.orders
            .reassign(order_id, target.id, &target.name)
            .await
    }
}
