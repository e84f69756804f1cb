use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth;
use crate::error::ApiError;

/// Rejects requests without a usable `Authorization: Bearer <token>` header.
///
/// In presence mode any non-empty token passes; in signed mode the token must
/// verify against the configured secret.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    authorize(&state, request.headers())?;
    Ok(next.run(request).await)
}

/// Applies [`require_bearer`] to non-GET catalog requests when
/// `guard_catalog_writes` is enabled; everything else passes untouched.
pub async fn catalog_write_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let is_read = matches!(*request.method(), Method::GET | Method::HEAD | Method::OPTIONS);
    if is_read || !state.config.catalog.guard_catalog_writes {
        return Ok(next.run(request).await);
    }

    authorize(&state, request.headers())?;
    Ok(next.run(request).await)
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let token = extract_bearer_from_headers(headers).map_err(|msg| {
        tracing::warn!("Rejected request: {}", msg);
        unauthorized()
    })?;

    auth::verify_token(&state.config.auth, &token).map_err(|e| {
        tracing::warn!("Rejected request: {}", e);
        unauthorized()
    })?;
    Ok(())
}

fn unauthorized() -> ApiError {
    ApiError::unauthorized("Unauthorized")
}

/// Extract bearer token from Authorization header
fn extract_bearer_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
