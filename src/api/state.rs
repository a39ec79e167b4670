//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{
    AssignmentService, AuthService, NotificationService, RepairService, ServiceContainer,
    Services, UserService, WorkOrderService,
};

/// Application state containing all services (DI container).
///
/// Use `from_config()` for recommended initialization.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Work order service
    pub order_service: Arc<dyn WorkOrderService>,
    /// Assignment service
    pub assignment_service: Arc<dyn AssignmentService>,
    /// Repair service
    pub repair_service: Arc<dyn RepairService>,
    /// Notification service
    pub notification_service: Arc<dyn NotificationService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    ///
    /// This is the recommended way to create AppState as it uses
    /// the ServiceContainer for centralized service management.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            order_service: container.orders(),
            assignment_service: container.assignments(),
            repair_service: container.repairs(),
            notification_service: container.notifications(),
            database,
        }
    }
}
