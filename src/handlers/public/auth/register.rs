// handlers/public/auth/register.rs - POST /api/auth/registro handler

use axum::{extract::rejection::JsonRejection, response::Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Default, Deserialize)]
pub struct RegistroRequest {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub contrasena: String,
}

#[derive(Debug, Serialize)]
pub struct RegistroResponse {
    pub mensaje: &'static str,
}

/// POST /api/auth/registro - Customer registration
///
/// Accounts are owned by the remote API; this endpoint only acknowledges the
/// request and never writes to the user directory.
pub async fn registro_post(payload: Result<Json<RegistroRequest>, JsonRejection>) -> ApiResult<RegistroResponse> {
    let Json(payload) = payload.map_err(|e| {
        tracing::warn!("Registration body rejected: {}", e);
        ApiError::internal_server_error("Registration failed")
    })?;

    tracing::info!(
        "Registering user: {} <{}> (password provided: {})",
        payload.nombre,
        payload.correo,
        !payload.contrasena.is_empty()
    );

    Ok(ApiResponse::created(RegistroResponse {
        mensaje: "Usuario registrado con éxito",
    }))
}
