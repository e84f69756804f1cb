// Dashboard page endpoints. Markup lives in the frontend; these answer with a
// small descriptor so the access gate has something to protect.

use axum::{
    extract::Path,
    response::{IntoResponse, Json, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::gate::LOGIN_PATH;
use crate::session;

pub async fn root() -> Redirect {
    // The gate always redirects first; reached only if it is not layered.
    Redirect::temporary(LOGIN_PATH)
}

pub async fn login() -> Json<Value> {
    Json(json!({ "page": "login" }))
}

pub async fn dashboard() -> Json<Value> {
    Json(json!({ "page": "dashboard" }))
}

/// GET /dashboard/*rest - create, edit/:id, profile
pub async fn dashboard_section(Path(rest): Path<String>) -> Json<Value> {
    Json(json!({ "page": "dashboard", "section": rest }))
}

/// GET /logout - expire the session cookie and go back to the login page
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    tracing::info!("Session cookie cleared");
    (jar.add(session::cleared_cookie()), Redirect::temporary(LOGIN_PATH))
}
