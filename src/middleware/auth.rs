// src/middleware/auth.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Caller, Role},
};

// Set by the upstream gateway after it has authenticated the caller.
pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

// Extractor for the caller identity. Any missing or malformed header is a 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Caller);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header(parts, USER_ID_HEADER)?;
        let id = Uuid::parse_str(id).map_err(|_| AppError::Unauthenticated)?;

        let role: Role = header(parts, USER_ROLE_HEADER)?.parse()?;

        // Email is informational only
        let email = header(parts, USER_EMAIL_HEADER).unwrap_or_default().to_string();

        Ok(AuthenticatedUser(Caller { id, role, email }))
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, AppError> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(AppError::Unauthenticated)
}
