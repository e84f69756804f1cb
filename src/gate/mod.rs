use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::session::SessionState;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    Redirect(&'static str),
}

/// Whether `path` is one of the pages the gate watches: the root, the login
/// page and everything under the dashboard.
pub fn is_gated(path: &str) -> bool {
    path == ROOT_PATH || path == LOGIN_PATH || is_dashboard(path)
}

fn is_dashboard(path: &str) -> bool {
    path == DASHBOARD_PATH
        || path
            .strip_prefix(DASHBOARD_PATH)
            .is_some_and(|rest| rest.starts_with('/'))
}

pub fn evaluate(path: &str, state: SessionState) -> GateDecision {
    use SessionState::{Anonymous, Authenticated};

    match (path, state) {
        (LOGIN_PATH, Authenticated) => GateDecision::Redirect(DASHBOARD_PATH),
        (ROOT_PATH, Authenticated) => GateDecision::Redirect(DASHBOARD_PATH),
        (ROOT_PATH, Anonymous) => GateDecision::Redirect(LOGIN_PATH),
        (p, Anonymous) if is_dashboard(p) => GateDecision::Redirect(LOGIN_PATH),
        _ => GateDecision::Pass,
    }
}

/// Redirects page requests according to the `auth-token` cookie.
pub async fn access_gate(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if !is_gated(&path) {
        return next.run(request).await;
    }

    let state = SessionState::from_headers(request.headers());
    match evaluate(&path, state) {
        GateDecision::Pass => next.run(request).await,
        GateDecision::Redirect(to) => {
            debug!("Gate redirect {} -> {} ({:?})", path, to, state);
            Redirect::temporary(to).into_response()
        }
    }
}
