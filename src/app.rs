use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::{CatalogRepository, InMemoryCatalog, InMemoryUsers, UserDirectory};
use crate::gate::access_gate;
use crate::handlers::{self, pages, protected, public};
use crate::middleware::{catalog_write_guard, require_bearer};

/// Shared dependencies handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub users: Arc<dyn UserDirectory>,
}

impl AppState {
    /// State backed by the seeded in-memory stores.
    pub fn new(config: AppConfig) -> Self {
        Self::with_stores(
            config,
            Arc::new(InMemoryCatalog::seeded()),
            Arc::new(InMemoryUsers::seeded()),
        )
    }

    pub fn with_stores(
        config: AppConfig,
        catalog: Arc<dyn CatalogRepository>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            users,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);

    Router::new()
        // Public
        .route("/health", get(handlers::health))
        .route("/api", get(handlers::api_info))
        .merge(page_routes())
        .merge(auth_public_routes())
        .merge(catalog_routes(state.clone()))
        // Protected
        .merge(admin_routes(state.clone()))
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind-free entry point used by the binary and by tests.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, app(state)).await
}

fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::root))
        .route("/login", get(pages::login))
        .route("/dashboard", get(pages::dashboard))
        .route("/dashboard/*rest", get(pages::dashboard_section))
        .route_layer(middleware::from_fn(access_gate))
        // Not gated: must work with or without a cookie
        .route("/logout", get(pages::logout))
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login_post))
        .route("/api/auth/registro", post(auth::registro_post))
}

fn catalog_routes(state: AppState) -> Router<AppState> {
    use public::cajas;

    Router::new()
        .route("/api/cajas", get(cajas::list).post(cajas::create))
        .route(
            "/api/cajas/:id",
            get(cajas::show).put(cajas::update).delete(cajas::delete),
        )
        .route_layer(middleware::from_fn_with_state(state, catalog_write_guard))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use protected::usuarios;

    Router::new()
        .route("/api/admin/usuarios", get(usuarios::list))
        .route("/api/admin/usuarios/:id", axum::routing::delete(usuarios::delete))
        .route_layer(middleware::from_fn_with_state(state, require_bearer))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
