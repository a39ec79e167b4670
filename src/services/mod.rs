//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod assignment_service;
mod auth_service;
pub mod container;
mod notification_service;
mod repair_service;
mod user_service;
mod work_order_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use assignment_service::{AssignmentManager, AssignmentService};
pub use auth_service::{AuthService, AuthenticatedUser, Authenticator, Claims, TokenResponse};
pub use notification_service::{NotificationService, Notifier};
pub use repair_service::{RepairManager, RepairService};
pub use user_service::{UserManager, UserService};
pub use work_order_service::{WorkOrderManager, WorkOrderService};
