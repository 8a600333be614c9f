// src/handlers/assets.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::Store,
    middleware::auth::AuthenticatedUser,
    models::asset::{Asset, AssetType},
};

// ---
// Payload: RegisterAsset
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAssetPayload {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters."))]
    pub name: String,

    pub asset_type: AssetType,

    #[validate(range(min = 0, message = "Quantity cannot be negative."))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustQuantityPayload {
    pub delta: i32,
}

#[utoipa::path(
    post,
    path = "/api/assets",
    tag = "Inventory",
    request_body = RegisterAssetPayload,
    responses(
        (status = 201, description = "Asset registered", body = Asset),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller is not HR")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn register_asset<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
    Json(payload): Json<RegisterAssetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let asset = app_state
        .inventory
        .register(&user.0, &payload.name, payload.asset_type, payload.quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(asset)))
}

// Only the caller's own stock
#[utoipa::path(
    get,
    path = "/api/assets",
    tag = "Inventory",
    responses(
        (status = 200, description = "Assets owned by the caller", body = [Asset]),
        (status = 403, description = "Caller is not HR")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn list_assets<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    user.0.require_hr()?;
    let assets = app_state.inventory.list(user.0.id).await?;
    Ok((StatusCode::OK, Json(assets)))
}

#[utoipa::path(
    get,
    path = "/api/assets/{id}",
    tag = "Inventory",
    responses(
        (status = 200, description = "Asset", body = Asset),
        (status = 404, description = "Asset not found")
    ),
    params(
        ("id" = Uuid, Path, description = "Asset ID")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn get_asset<S: Store>(
    State(app_state): State<AppState<S>>,
    _user: AuthenticatedUser,
    Path(asset_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let asset = app_state.inventory.get(asset_id).await?;
    Ok((StatusCode::OK, Json(asset)))
}

#[utoipa::path(
    patch,
    path = "/api/assets/{id}/quantity",
    tag = "Inventory",
    request_body = AdjustQuantityPayload,
    responses(
        (status = 200, description = "Quantity adjusted", body = Asset),
        (status = 403, description = "Asset belongs to another HR account"),
        (status = 409, description = "Units out on loan would go negative")
    ),
    params(
        ("id" = Uuid, Path, description = "Asset ID")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn adjust_quantity<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
    Path(asset_id): Path<Uuid>,
    Json(payload): Json<AdjustQuantityPayload>,
) -> Result<impl IntoResponse, AppError> {
    let asset = app_state
        .inventory
        .adjust_total(&user.0, asset_id, payload.delta)
        .await?;
    Ok((StatusCode::OK, Json(asset)))
}

#[utoipa::path(
    delete,
    path = "/api/assets/{id}",
    tag = "Inventory",
    responses(
        (status = 204, description = "Asset removed"),
        (status = 403, description = "Asset belongs to another HR account"),
        (status = 409, description = "Units are still assigned")
    ),
    params(
        ("id" = Uuid, Path, description = "Asset ID")
    ),
    security(("gateway_user_id" = [], "gateway_user_role" = []))
)]
pub async fn remove_asset<S: Store>(
    State(app_state): State<AppState<S>>,
    user: AuthenticatedUser,
    Path(asset_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory.remove(&user.0, asset_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
