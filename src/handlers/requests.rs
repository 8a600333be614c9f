// src/handlers/requests.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, retry::with_retry},
    config::AppState,
    db::Store,
    middleware::auth::AuthenticatedUser,
    models::{
        allocation::Allocation,
        request::{AssetRequest, Decision},
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestPayload {
    pub asset_id: Uuid,

    #[validate(length(max = 500, message = "Note cannot exceed 500 characters."))]
    pub note: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResponse {
    pub request: AssetRequest,
    /// Present only for approvals.
    pub allocation: Option<Allocation>,
}

#[utoipa::path(
    post,
    path = "/api/requests",
    tag = "Requests",
    request_body = CreateRequestPayload,
    responses(
        (status = 201, description = "Request created", body = AssetRequest),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Asset not found")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn create_request<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let request = app_state
        .requests
        .create(&user.0, payload.asset_id, payload.note)
        .await?;

    Ok((StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    tag = "Requests",
    responses(
        (status = 200, description = "Request", body = AssetRequest),
        (status = 404, description = "Request not found")
    ),
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn get_request<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let request = app_state.requests.get(&user.0, request_id).await?;
    Ok((StatusCode::OK, Json(request)))
}

// ---
// Handler: approve_request
// ---
// A lost affiliation race rolls the whole approval back, so the request is
// still pending and can simply be decided again.
#[utoipa::path(
    patch,
    path = "/api/requests/{id}/approve",
    tag = "Requests",
    responses(
        (status = 200, description = "Request approved and asset assigned", body = DecisionResponse),
        (status = 402, description = "Employee seat limit reached"),
        (status = 409, description = "Out of stock or already processed")
    ),
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn approve_request<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (request, allocation) = with_retry(&app_state.retry, || {
        app_state.requests.decide(&user.0, request_id, Decision::Approve)
    })
    .await?;

    Ok((StatusCode::OK, Json(DecisionResponse { request, allocation })))
}

#[utoipa::path(
    patch,
    path = "/api/requests/{id}/reject",
    tag = "Requests",
    responses(
        (status = 200, description = "Request rejected", body = DecisionResponse),
        (status = 409, description = "Request already processed")
    ),
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn reject_request<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (request, allocation) = app_state
        .requests
        .decide(&user.0, request_id, Decision::Reject)
        .await?;

    Ok((StatusCode::OK, Json(DecisionResponse { request, allocation })))
}
