// src/handlers/affiliations.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    db::Store,
    middleware::auth::AuthenticatedUser,
    models::{affiliation::Affiliation, allocation::RemovalReport},
};

// Companies the caller is affiliated with
#[utoipa::path(
    get,
    path = "/api/affiliations",
    tag = "Affiliations",
    responses(
        (status = 200, description = "Companies the caller is affiliated with", body = [Affiliation])
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn list_my_affiliations<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let affiliations = app_state.affiliations.list_by_employee(user.0.id).await?;
    Ok((StatusCode::OK, Json(affiliations)))
}

// Employees of the calling HR
#[utoipa::path(
    get,
    path = "/api/affiliations/employees",
    tag = "Affiliations",
    responses(
        (status = 200, description = "Employees of the calling HR", body = [Affiliation]),
        (status = 403, description = "Caller is not HR")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn list_employees<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    user.0.require_hr()?;
    let affiliations = app_state.affiliations.list_by_owner(user.0.id).await?;
    Ok((StatusCode::OK, Json(affiliations)))
}

#[utoipa::path(
    delete,
    path = "/api/affiliations/{employee_id}",
    tag = "Affiliations",
    responses(
        (status = 200, description = "Employee removed; outstanding assets reclaimed", body = RemovalReport),
        (status = 404, description = "Affiliation not found")
    ),
    params(
        ("employee_id" = Uuid, Path, description = "Employee ID")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn remove_employee<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
    Path(employee_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state
        .coordinator
        .remove_affiliation(&user.0, employee_id, user.0.id)
        .await?;
    Ok((StatusCode::OK, Json(report)))
}
