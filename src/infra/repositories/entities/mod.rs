//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod notification;
pub mod repair;
pub mod repair_item;
pub mod repair_note;
pub mod user;
pub mod work_order;
