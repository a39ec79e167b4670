//! Repair record handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{NoteResponse, RepairResponse, SaveRepair};
use crate::errors::AppResult;

/// Note append request.
///
/// Emptiness is judged after trimming, so whitespace-only messages are
/// rejected with the same error as empty ones.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NoteRequest {
    #[schema(example = "Replaced the battery, retesting now")]
    pub message: String,
}

/// Create repair routes (staff only)
pub fn repair_routes() -> Router<AppState> {
    Router::new()
        .route("/:id", put(save_repair))
        .route("/:id/notes", get(list_notes).post(append_note))
}

/// Get the repair record for a work order, creating it on first access
#[utoipa::path(
    get,
    path = "/orders/{id}/repair",
    tag = "Repairs",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Work order ID")
    ),
    responses(
        (status = 200, description = "Repair record", body = RepairResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Work order not found")
    )
)]
pub async fn repair_for_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RepairResponse>> {
    let detail = state.repair_service.repair_for_order(id).await?;
    Ok(Json(RepairResponse::from(detail)))
}

/// Save diagnosis, status and the billable item list.
///
/// Only the assigned technician or an admin may save.
#[utoipa::path(
    put,
    path = "/repairs/{id}",
    tag = "Repairs",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Repair ID")
    ),
    request_body = SaveRepair,
    responses(
        (status = 200, description = "Repair saved", body = RepairResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Not the assigned technician"),
        (status = 404, description = "Repair not found")
    )
)]
pub async fn save_repair(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SaveRepair>,
) -> AppResult<Json<RepairResponse>> {
    let detail = state
        .repair_service
        .save_repair(id, &current_user.actor(), payload)
        .await?;

    Ok(Json(RepairResponse::from(detail)))
}

/// List the repair's note thread, oldest first
#[utoipa::path(
    get,
    path = "/repairs/{id}/notes",
    tag = "Repairs",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Repair ID")
    ),
    responses(
        (status = 200, description = "Note thread", body = Vec<NoteResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Repair not found")
    )
)]
pub async fn list_notes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<NoteResponse>>> {
    let notes = state.repair_service.notes_for_repair(id).await?;
    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

/// Append a note to the repair thread.
///
/// The note is written first; notification fan-out is best effort and
/// never fails the request.
#[utoipa::path(
    post,
    path = "/repairs/{id}/notes",
    tag = "Repairs",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Repair ID")
    ),
    request_body = NoteRequest,
    responses(
        (status = 201, description = "Note added", body = NoteResponse),
        (status = 400, description = "Note message must not be empty"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Repair not found")
    )
)]
pub async fn append_note(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NoteRequest>,
) -> AppResult<(StatusCode, Json<NoteResponse>)> {
    let note = state
        .repair_service
        .append_note(id, current_user.id, &payload.message)
        .await?;

    Ok((StatusCode::CREATED, Json(NoteResponse::from(note))))
}
