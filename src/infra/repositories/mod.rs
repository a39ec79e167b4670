//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod notification_repository;
mod repair_repository;
mod user_repository;
mod work_order_repository;

pub use notification_repository::{NotificationRepository, NotificationStore};
pub use repair_repository::{RepairRepository, RepairStore};
pub use user_repository::{UserRepository, UserStore};
pub use work_order_repository::{WorkOrderRepository, WorkOrderStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use notification_repository::MockNotificationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use repair_repository::MockRepairRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use work_order_repository::MockWorkOrderRepository;
