//! HTTP request handlers.

pub mod auth_handler;
pub mod notification_handler;
pub mod repair_handler;
pub mod user_handler;
pub mod work_order_handler;

pub use auth_handler::auth_routes;
pub use notification_handler::notification_routes;
pub use repair_handler::repair_routes;
pub use user_handler::user_routes;
pub use work_order_handler::{order_routes, tracking_routes};
