//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.

use std::sync::Arc;

use super::{
    AssignmentService, AuthService, NotificationService, RepairService, UserService,
    WorkOrderService,
};
use crate::config::Config;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get work order service
    fn orders(&self) -> Arc<dyn WorkOrderService>;

    /// Get assignment service
    fn assignments(&self) -> Arc<dyn AssignmentService>;

    /// Get repair service
    fn repairs(&self) -> Arc<dyn RepairService>;

    /// Get notification service
    fn notifications(&self) -> Arc<dyn NotificationService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    order_service: Arc<dyn WorkOrderService>,
    assignment_service: Arc<dyn AssignmentService>,
    repair_service: Arc<dyn RepairService>,
    notification_service: Arc<dyn NotificationService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{
            AssignmentManager, Authenticator, Notifier, RepairManager, UserManager,
            WorkOrderManager,
        };
        use crate::infra::{
            NotificationRepository, NotificationStore, RepairRepository, RepairStore, SystemClock,
            UserRepository, UserStore, WorkOrderRepository, WorkOrderStore,
        };

        let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.clone()));
        let orders: Arc<dyn WorkOrderRepository> = Arc::new(WorkOrderStore::new(db.clone()));
        let repairs: Arc<dyn RepairRepository> = Arc::new(RepairStore::new(db.clone()));
        let notifications: Arc<dyn NotificationRepository> = Arc::new(NotificationStore::new(db));

        let clock = Arc::new(SystemClock);

        let notification_service: Arc<dyn NotificationService> =
            Arc::new(Notifier::new(notifications, users.clone()));

        Self {
            auth_service: Arc::new(Authenticator::new(users.clone(), clock, config)),
            user_service: Arc::new(UserManager::new(users.clone())),
            order_service: Arc::new(WorkOrderManager::new(orders.clone())),
            assignment_service: Arc::new(AssignmentManager::new(orders.clone(), users.clone())),
            repair_service: Arc::new(RepairManager::new(
                repairs,
                orders,
                users,
                notification_service.clone(),
            )),
            notification_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn orders(&self) -> Arc<dyn WorkOrderService> {
        self.order_service.clone()
    }

    fn assignments(&self) -> Arc<dyn AssignmentService> {
        self.assignment_service.clone()
    }

    fn repairs(&self) -> Arc<dyn RepairService> {
        self.repair_service.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationService> {
        self.notification_service.clone()
    }
}
