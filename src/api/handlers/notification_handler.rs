//! Notification inbox handlers.
//!
//! Every operation is scoped to the authenticated user; acting on a
//! missing or foreign notification succeeds silently.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::NotificationResponse;
use crate::errors::AppResult;

/// Create notification routes (staff only)
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(inbox))
        .route("/:id/read", post(mark_read))
        .route("/:id", delete(delete_notification))
}

/// Most recent notifications for the calling user
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Inbox, newest first", body = Vec<NotificationResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn inbox(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<NotificationResponse>>> {
    let notifications = state.notification_service.inbox(current_user.id).await?;
    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}

/// Mark a notification as read (idempotent)
#[utoipa::path(
    post,
    path = "/notifications/{id}/read",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 204, description = "Marked as read"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn mark_read(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state
        .notification_service
        .mark_read(id, current_user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a notification (idempotent)
#[utoipa::path(
    delete,
    path = "/notifications/{id}",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_notification(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state
        .notification_service
        .delete(id, current_user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
