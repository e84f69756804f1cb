use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
    pub stats: StatsConfig,
    pub security: SecurityConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

/// How bearer tokens are issued on login and checked on guarded routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenMode {
    /// Any non-empty `Bearer` token passes; login issues `mock-jwt-token-<millis>`.
    Presence,
    /// Login issues an HS256 JWT; guarded routes verify signature and expiry.
    Signed,
}

impl TokenMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "presence" | "mock" => Some(TokenMode::Presence),
            "signed" | "jwt" => Some(TokenMode::Signed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub admin_email: String,
    pub admin_password: String,
    pub token_mode: TokenMode,
    pub jwt_secret: String,
    pub session_max_age_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Apply the bearer guard to POST/PUT/DELETE on /api/cajas.
    pub guard_catalog_writes: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Estimated value of one active subscription.
    pub unit_value: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
}

pub const DEFAULT_UNIT_VALUE: u64 = 45;
pub const SESSION_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;
pub const DEFAULT_API_URL: &str = "https://snackworld-api.vercel.app";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Port: SNACKWORLD_PORT wins over the generic PORT
        if let Some(port) = env::var("SNACKWORLD_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Auth overrides
        if let Ok(v) = env::var("AUTH_ADMIN_EMAIL") {
            self.auth.admin_email = v;
        }
        if let Ok(v) = env::var("AUTH_ADMIN_PASSWORD") {
            self.auth.admin_password = v;
        }
        if let Ok(v) = env::var("AUTH_TOKEN_MODE") {
            self.auth.token_mode = TokenMode::parse(&v).unwrap_or(self.auth.token_mode);
        }
        if let Ok(v) = env::var("AUTH_JWT_SECRET") {
            self.auth.jwt_secret = v;
        }
        if let Ok(v) = env::var("AUTH_SESSION_MAX_AGE_SECS") {
            self.auth.session_max_age_secs = v.parse().unwrap_or(self.auth.session_max_age_secs);
        }

        // Catalog overrides
        if let Ok(v) = env::var("CATALOG_GUARD_WRITES") {
            self.catalog.guard_catalog_writes = v.parse().unwrap_or(self.catalog.guard_catalog_writes);
        }

        // Stats overrides
        if let Ok(v) = env::var("STATS_UNIT_VALUE") {
            self.stats.unit_value = v.parse().unwrap_or(self.stats.unit_value);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Client overrides
        if let Ok(v) = env::var("SNACKWORLD_API_URL") {
            self.client.api_url = v;
        }
        if let Ok(v) = env::var("CLIENT_REQUEST_TIMEOUT_SECS") {
            self.client.request_timeout_secs = v.parse().unwrap_or(self.client.request_timeout_secs);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            auth: AuthConfig {
                admin_email: "admin@snackworld.com".to_string(),
                admin_password: "admin123".to_string(),
                token_mode: TokenMode::Presence,
                jwt_secret: "snackworld-dev-secret".to_string(),
                session_max_age_secs: SESSION_MAX_AGE_SECS,
            },
            catalog: CatalogConfig {
                guard_catalog_writes: false,
            },
            stats: StatsConfig {
                unit_value: DEFAULT_UNIT_VALUE,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
            client: ClientConfig {
                api_url: DEFAULT_API_URL.to_string(),
                request_timeout_secs: 30,
            },
        }
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.catalog.guard_catalog_writes = true;
        config.security.cors_origins = vec!["https://staging.snackworld.com".to_string()];
        config.client.request_timeout_secs = 15;
        config
    }

    fn production() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Production;
        config.auth.token_mode = TokenMode::Signed;
        // Must be supplied through AUTH_JWT_SECRET
        config.auth.jwt_secret = String::new();
        config.catalog.guard_catalog_writes = true;
        config.security.cors_origins = vec!["https://snackworld.com".to_string()];
        config.client.request_timeout_secs = 10;
        config
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
