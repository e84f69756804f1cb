use axum::extract::{Path, State};
use serde::Serialize;

use crate::app::AppState;
use crate::database::models::DirectoryStats;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedUser {
    pub message: &'static str,
    /// Display name of the removed user.
    pub deleted_user: String,
}

/// GET /api/admin/usuarios - Users plus aggregate subscription stats
///
/// `totalValue` is `totalSubscriptions × stats.unit_value`.
pub async fn list(State(state): State<AppState>) -> ApiResult<DirectoryStats> {
    let stats = state
        .users
        .stats(state.config.stats.unit_value)
        .await
        .map_err(|e| ApiError::from_repository(e, "User not found", "Failed to get admin stats"))?;
    Ok(ApiResponse::success(stats))
}

/// DELETE /api/admin/usuarios/:id
///
/// Users with an active subscription are deleted like any other; only the
/// dashboard client refuses to send that request.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<DeletedUser> {
    let removed = state
        .users
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_repository(e, "User not found", "Failed to delete user"))?;

    if removed.suscripcion_activa {
        tracing::warn!("Deleted user {} while subscription still active", removed.id);
    } else {
        tracing::info!("Deleted user {}", removed.id);
    }

    Ok(ApiResponse::success(DeletedUser {
        message: "User deleted successfully",
        deleted_user: removed.nombre,
    }))
}
