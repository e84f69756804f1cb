// handlers/mod.rs - Handler tiers
//
// Public (no auth) → Protected (bearer token) plus the gated dashboard pages.

pub mod pages;     // Cookie-gated page routes (/, /login, /dashboard/*)
pub mod protected; // Bearer token required (/api/admin/*)
pub mod public;    // No authentication required (/api/auth/*, /api/cajas)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

/// GET /api - service description
pub async fn api_info() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Snack World Admin API",
        "version": version,
        "endpoints": {
            "auth": "/api/auth/login, /api/auth/registro (public)",
            "cajas": "/api/cajas[/:id] (public reads, writes optionally guarded)",
            "admin": "/api/admin/usuarios[/:id] (bearer token)",
            "pages": "/, /login, /dashboard/* (auth-token cookie)",
        }
    }))
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    let now = chrono::Utc::now();

    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "timestamp": now,
        })),
    )
}
