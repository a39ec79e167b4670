//! Work order service - Intake, listing and public tracking.
//!
//! Intake mints the two public identifiers: a short human-readable
//! form code (retried until unique) and an opaque tracking token.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::work_order::{generate_form_code, generate_public_token};
use crate::domain::{CreateWorkOrder, NewWorkOrder, OrderStatus, WorkOrder};
use crate::errors::{AppResult, OptionExt};
use crate::infra::WorkOrderRepository;

/// Work order service trait for dependency injection
#[async_trait]
pub trait WorkOrderService: Send + Sync {
    /// Register a device drop-off and mint its public identifiers
    async fn intake(&self, data: CreateWorkOrder) -> AppResult<WorkOrder>;

    /// Get work order by ID
    async fn get_order(&self, id: Uuid) -> AppResult<WorkOrder>;

    /// Most recent orders, optionally filtered by status
    async fn list_orders(&self, status: Option<OrderStatus>) -> AppResult<Vec<WorkOrder>>;

    /// Resolve a public tracking token
    async fn track(&self, token: &str) -> AppResult<WorkOrder>;
}

/// Concrete implementation of WorkOrderService
pub struct WorkOrderManager {
    orders: Arc<dyn WorkOrderRepository>,
}

impl WorkOrderManager {
    /// Create new work order service instance
    pub fn new(orders: Arc<dyn WorkOrderRepository>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl WorkOrderService for WorkOrderManager {
    async fn intake(&self, data: CreateWorkOrder) -> AppResult<WorkOrder> {
        // Codes are short enough to collide; retry until free
        let mut form_code = generate_form_code();
        while self.orders.form_code_exists(&form_code).await? {
            form_code = generate_form_code();
        }

        self.orders
            .create(NewWorkOrder {
                public_token: generate_public_token(),
                form_code,
                client_id: data.client_id,
                device_type: data.device_type,
                brand: data.brand,
                model: data.model,
                serial_number: data.serial_number,
                problem: data.problem,
                accessories: data.accessories,
                description: data.description,
                price: data.price,
                warranty: data.warranty,
            })
            .await
    }

    async fn get_order(&self, id: Uuid) -> AppResult<WorkOrder> {
        self.orders.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_orders(&self, status: Option<OrderStatus>) -> AppResult<Vec<WorkOrder>> {
        self.orders.list_recent(status).await
    }

    async fn track(&self, token: &str) -> AppResult<WorkOrder> {
        self.orders
            .find_by_public_token(token)
            .await?
            .ok_or_not_found()
    }
}
