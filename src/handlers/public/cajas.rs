// handlers/public/cajas.rs - Catalog CRUD on /api/cajas
//
// Reads are public. Writes are public too unless `guard_catalog_writes` is
// on, in which case the router wraps them in the bearer guard.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use serde::Serialize;

use crate::app::AppState;
use crate::database::models::{Caja, CajaFields};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

const NOT_FOUND: &str = "Box not found";

#[derive(Debug, Serialize)]
pub struct DeletedMessage {
    pub message: &'static str,
}

/// GET /api/cajas - All catalog entries in insertion order
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Caja>> {
    let cajas = state
        .catalog
        .list()
        .await
        .map_err(|e| ApiError::from_repository(e, NOT_FOUND, "Failed to get boxes"))?;
    Ok(ApiResponse::success(cajas))
}

/// GET /api/cajas/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Caja> {
    let caja = state
        .catalog
        .get(&id)
        .await
        .map_err(|e| ApiError::from_repository(e, NOT_FOUND, "Failed to get box"))?;
    Ok(ApiResponse::success(caja))
}

/// POST /api/cajas - Store a new entry under a generated id
///
/// No field validation happens here; the dashboard client validates before
/// sending. An unreadable body is reported as a 500.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CajaFields>, JsonRejection>,
) -> ApiResult<Caja> {
    const FAILURE: &str = "Failed to create box";

    let Json(fields) = payload.map_err(|e| {
        tracing::warn!("Create body rejected: {}", e);
        ApiError::internal_server_error(FAILURE)
    })?;

    let caja = state
        .catalog
        .create(fields)
        .await
        .map_err(|e| ApiError::from_repository(e, NOT_FOUND, FAILURE))?;

    tracing::info!("Created caja {} ({})", caja.id, caja.nombre);
    Ok(ApiResponse::created(caja))
}

/// PUT /api/cajas/:id - Shallow-merge the supplied fields
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CajaFields>, JsonRejection>,
) -> ApiResult<Caja> {
    const FAILURE: &str = "Failed to update box";

    let Json(fields) = payload.map_err(|e| {
        tracing::warn!("Update body for caja {} rejected: {}", id, e);
        ApiError::internal_server_error(FAILURE)
    })?;

    let caja = state
        .catalog
        .replace(&id, fields)
        .await
        .map_err(|e| ApiError::from_repository(e, NOT_FOUND, FAILURE))?;

    tracing::info!("Updated caja {}", caja.id);
    Ok(ApiResponse::success(caja))
}

/// DELETE /api/cajas/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<DeletedMessage> {
    let removed = state
        .catalog
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_repository(e, NOT_FOUND, "Failed to delete box"))?;

    tracing::info!("Deleted caja {} ({})", removed.id, removed.nombre);
    Ok(ApiResponse::success(DeletedMessage {
        message: "Box deleted successfully",
    }))
}
