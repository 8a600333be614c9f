// src/handlers/assignments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::{error::AppError, retry::with_retry},
    config::AppState,
    db::Store,
    middleware::auth::AuthenticatedUser,
    models::{allocation::Allocation, assignment::Assignment},
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectAssignPayload {
    pub asset_id: Uuid,
    pub employee_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/assignments",
    tag = "Assignments",
    request_body = DirectAssignPayload,
    responses(
        (status = 201, description = "Asset assigned", body = Allocation),
        (status = 402, description = "Employee seat limit reached"),
        (status = 409, description = "Asset out of stock")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn direct_assign<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
    Json(payload): Json<DirectAssignPayload>,
) -> Result<impl IntoResponse, AppError> {
    let allocation = with_retry(&app_state.retry, || {
        app_state
            .coordinator
            .direct_assign(&user.0, payload.asset_id, payload.employee_id)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(allocation)))
}

#[utoipa::path(
    get,
    path = "/api/assignments",
    tag = "Assignments",
    responses(
        (status = 200, description = "Assignments held by the caller, newest first", body = [Assignment])
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn list_my_assignments<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let assignments = app_state.assignments.list_for_employee(&user.0).await?;
    Ok((StatusCode::OK, Json(assignments)))
}

#[utoipa::path(
    get,
    path = "/api/assignments/{id}",
    tag = "Assignments",
    responses(
        (status = 200, description = "Assignment", body = Assignment),
        (status = 404, description = "Assignment not found")
    ),
    params(
        ("id" = Uuid, Path, description = "Assignment ID")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn get_assignment<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
    Path(assignment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let assignment = app_state.assignments.get(&user.0, assignment_id).await?;
    Ok((StatusCode::OK, Json(assignment)))
}

// --- Returns ---

#[utoipa::path(
    patch,
    path = "/api/assignments/{id}/return",
    tag = "Assignments",
    responses(
        (status = 200, description = "Return requested", body = Assignment),
        (status = 403, description = "Not the holder, or the asset is not returnable"),
        (status = 409, description = "Assignment is not outstanding")
    ),
    params(
        ("id" = Uuid, Path, description = "Assignment ID")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn request_return<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
    Path(assignment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let assignment = app_state.coordinator.request_return(&user.0, assignment_id).await?;
    Ok((StatusCode::OK, Json(assignment)))
}

#[utoipa::path(
    patch,
    path = "/api/assignments/{id}/approve-return",
    tag = "Assignments",
    responses(
        (status = 200, description = "Return completed", body = Assignment),
        (status = 409, description = "No pending return")
    ),
    params(
        ("id" = Uuid, Path, description = "Assignment ID")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn approve_return<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
    Path(assignment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let assignment = app_state.coordinator.approve_return(&user.0, assignment_id).await?;
    Ok((StatusCode::OK, Json(assignment)))
}
