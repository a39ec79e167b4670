//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Wall-clock time (injectable for tests)

pub mod clock;
pub mod db;
pub mod repositories;

pub use clock::{Clock, SystemClock};
pub use db::{Database, Migrator};
pub use repositories::{
    NotificationRepository, NotificationStore, RepairRepository, RepairStore, UserRepository,
    UserStore, WorkOrderRepository, WorkOrderStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use clock::MockClock;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockNotificationRepository, MockRepairRepository, MockUserRepository,
    MockWorkOrderRepository,
};
