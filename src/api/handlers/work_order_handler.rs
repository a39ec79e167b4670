//! Work order handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateWorkOrder, OrderStatus, TrackingResponse, WorkOrderResponse};
use crate::errors::AppResult;

/// Device intake request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IntakeRequest {
    /// Customer reference
    pub client_id: Uuid,
    /// Device category
    #[validate(length(min = 1, message = "Device type is required"))]
    #[schema(example = "laptop")]
    pub device_type: String,
    #[validate(length(min = 1, message = "Brand is required"))]
    #[schema(example = "Lenovo")]
    pub brand: String,
    #[validate(length(min = 1, message = "Model is required"))]
    #[schema(example = "ThinkPad T14")]
    pub model: String,
    #[serde(default)]
    pub serial_number: String,
    /// Problem reported by the customer
    #[validate(length(min = 1, message = "Problem description is required"))]
    #[schema(example = "does not power on")]
    pub problem: String,
    /// Accessories handed over with the device
    #[serde(default)]
    #[schema(example = "charger, carrying case")]
    pub accessories: String,
    /// Free-form intake notes
    #[serde(default)]
    pub description: String,
    /// Agreed or estimated price
    #[serde(default)]
    pub price: f64,
    /// Warranty terms, if any
    pub warranty: Option<String>,
}

/// Order list filter
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListOrdersQuery {
    /// Only return orders in this state
    pub status: Option<OrderStatus>,
}

/// Admin assignment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignRequest {
    /// Technician receiving the order
    pub technician_id: Uuid,
}

/// Create work order routes (staff only)
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(intake).get(list_orders))
        .route("/:id", get(get_order))
        .route("/:id/claim", post(claim_order))
        .route("/:id/assign", post(assign_order))
        .route("/:id/repair", get(super::repair_handler::repair_for_order))
}

/// Create public tracking routes (no authentication)
pub fn tracking_routes() -> Router<AppState> {
    Router::new().route("/:token", get(track_order))
}

/// Register a device drop-off
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Work Orders",
    security(("bearer_auth" = [])),
    request_body = IntakeRequest,
    responses(
        (status = 201, description = "Work order created", body = WorkOrderResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn intake(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<IntakeRequest>,
) -> AppResult<(StatusCode, Json<WorkOrderResponse>)> {
    let order = state
        .order_service
        .intake(CreateWorkOrder {
            client_id: payload.client_id,
            device_type: payload.device_type,
            brand: payload.brand,
            model: payload.model,
            serial_number: payload.serial_number,
            problem: payload.problem,
            accessories: payload.accessories,
            description: payload.description,
            price: payload.price,
            warranty: payload.warranty,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(WorkOrderResponse::from(order))))
}

/// List recent work orders
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Work Orders",
    security(("bearer_auth" = [])),
    params(ListOrdersQuery),
    responses(
        (status = 200, description = "Recent work orders", body = Vec<WorkOrderResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> AppResult<Json<Vec<WorkOrderResponse>>> {
    let orders = state.order_service.list_orders(query.status).await?;
    Ok(Json(orders.into_iter().map(WorkOrderResponse::from).collect()))
}

/// Get work order by ID
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Work Orders",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Work order ID")
    ),
    responses(
        (status = 200, description = "Work order", body = WorkOrderResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Work order not found")
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<WorkOrderResponse>> {
    let order = state.order_service.get_order(id).await?;
    Ok(Json(WorkOrderResponse::from(order)))
}

/// Claim an unassigned work order for the calling technician.
///
/// First writer wins; a second claim on the same order is rejected.
#[utoipa::path(
    post,
    path = "/orders/{id}/claim",
    tag = "Work Orders",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Work order ID")
    ),
    responses(
        (status = 200, description = "Order claimed", body = WorkOrderResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Work order not found"),
        (status = 409, description = "Already claimed by another technician")
    )
)]
pub async fn claim_order(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<WorkOrderResponse>> {
    let order = state
        .assignment_service
        .claim(id, &current_user.actor())
        .await?;

    Ok(Json(WorkOrderResponse::from(order)))
}

/// Assign a work order to a technician (admin only, overwrites)
#[utoipa::path(
    post,
    path = "/orders/{id}/assign",
    tag = "Work Orders",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Work order ID")
    ),
    request_body = AssignRequest,
    responses(
        (status = 200, description = "Order assigned", body = WorkOrderResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Work order not found"),
        (status = 422, description = "Assignment target is not a valid user")
    )
)]
pub async fn assign_order(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignRequest>,
) -> AppResult<Json<WorkOrderResponse>> {
    let order = state
        .assignment_service
        .assign(id, &current_user.actor(), payload.technician_id)
        .await?;

    Ok(Json(WorkOrderResponse::from(order)))
}

/// Public order status lookup by tracking token.
///
/// Returns no customer or staff identifiers.
#[utoipa::path(
    get,
    path = "/track/{token}",
    tag = "Tracking",
    params(
        ("token" = String, Path, description = "Public tracking token")
    ),
    responses(
        (status = 200, description = "Order status", body = TrackingResponse),
        (status = 404, description = "Unknown tracking token")
    )
)]
pub async fn track_order(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<TrackingResponse>> {
    let order = state.order_service.track(&token).await?;
    Ok(Json(TrackingResponse::from(order)))
}
