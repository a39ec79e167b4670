//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, notification_handler, repair_handler, user_handler, work_order_handler,
};
use crate::domain::{
    ItemKind, NewRepairItem, NoteResponse, NotificationResponse, OrderStatus, RepairItemResponse,
    RepairResponse, SaveRepair, TrackingResponse, UserResponse, UserRole, WorkOrderResponse,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the RepairDesk API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "RepairDesk API",
        version = "0.1.0",
        description = "Work order management for a device repair shop: intake, assignment, repair records, note threads and in-app notifications",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        // Public tracking
        work_order_handler::track_order,
        // Work order endpoints
        work_order_handler::intake,
        work_order_handler::list_orders,
        work_order_handler::get_order,
        work_order_handler::claim_order,
        work_order_handler::assign_order,
        // Repair endpoints
        repair_handler::repair_for_order,
        repair_handler::save_repair,
        repair_handler::list_notes,
        repair_handler::append_note,
        // Notification endpoints
        notification_handler::inbox,
        notification_handler::mark_read,
        notification_handler::delete_notification,
        // User endpoints
        user_handler::get_current_user,
        user_handler::list_users,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            OrderStatus,
            WorkOrderResponse,
            TrackingResponse,
            ItemKind,
            NewRepairItem,
            SaveRepair,
            RepairItemResponse,
            NoteResponse,
            RepairResponse,
            NotificationResponse,
            // Auth types
            auth_handler::LoginRequest,
            TokenResponse,
            // Handler request types
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            work_order_handler::IntakeRequest,
            work_order_handler::AssignRequest,
            repair_handler::NoteRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Staff login"),
        (name = "Tracking", description = "Public order status lookup"),
        (name = "Work Orders", description = "Intake, listing and assignment"),
        (name = "Repairs", description = "Repair records and note threads"),
        (name = "Notifications", description = "In-app notification inbox"),
        (name = "Users", description = "Staff account administration")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
