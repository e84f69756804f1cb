// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::app::AppState;
use crate::auth;
use crate::error::ApiError;
use crate::session;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub contrasena: String,
}

/// POST /api/auth/login - Authenticate the admin and receive a bearer token
///
/// Expected Input:
/// ```json
/// { "correo": "admin@snackworld.com", "contrasena": "admin123" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "token": "mock-jwt-token-1718000000000" }
/// ```
///
/// The token is also set as the `auth-token` cookie so browser sessions pass
/// the dashboard gate. Wrong credentials answer 401 `{"error": "Invalid credentials"}`.
pub async fn login_post(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::warn!("Login body rejected: {}", e);
        ApiError::internal_server_error("Login failed")
    })?;

    let auth_config = &state.config.auth;
    if !auth::credentials_match(auth_config, &payload.correo, &payload.contrasena) {
        tracing::warn!("Failed login attempt for '{}'", payload.correo);
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = auth::issue_token(auth_config).map_err(|e| {
        tracing::error!("Token issuance failed: {}", e);
        ApiError::internal_server_error("Login failed")
    })?;

    tracing::info!("Admin '{}' logged in", payload.correo);

    let cookie = session::session_cookie(token.clone(), auth_config.session_max_age_secs);
    Ok((jar.add(cookie), Json(json!({ "token": token }))))
}
