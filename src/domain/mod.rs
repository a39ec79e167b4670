//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! DDD: Domain layer has NO external dependencies (except error types).
//! Contains: Entities, Value Objects, Domain Services.

pub mod notification;
pub mod password;
pub mod permissions;
pub mod repair;
pub mod routing;
pub mod user;
pub mod work_hours;
pub mod work_order;

pub use notification::{note_added_message, NewNotification, Notification, NotificationResponse};
pub use password::Password;
pub use permissions::{can_edit_ticket, can_write_note};
pub use repair::{
    ItemKind, NewRepairItem, NoteResponse, RepairDetail, RepairItem, RepairItemResponse,
    RepairNote, RepairRecord, RepairResponse, SaveRepair,
};
pub use routing::note_recipients;
pub use user::{
    Actor, CreateUser, NewUser, UpdateUser, User, UserChanges, UserResponse, UserRole,
};
pub use work_hours::WorkWindow;
pub use work_order::{
    CreateWorkOrder, NewWorkOrder, OrderStatus, TrackingResponse, WorkOrder, WorkOrderResponse,
};
