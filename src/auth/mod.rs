use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{AuthConfig, TokenMode};

/// Prefix of the opaque tokens handed out in presence mode.
pub const MOCK_TOKEN_PREFIX: &str = "mock-jwt-token-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: String, lifetime_secs: i64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::seconds(lifetime_secs)).timestamp();

        Self {
            sub,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
    InvalidToken(String),
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
            JwtError::InvalidToken(msg) => write!(f, "Invalid JWT token: {}", msg),
        }
    }
}

impl std::error::Error for JwtError {}

/// Compare a login attempt against the configured admin account.
pub fn credentials_match(auth: &AuthConfig, correo: &str, contrasena: &str) -> bool {
    correo == auth.admin_email && contrasena == auth.admin_password
}

/// Issue a bearer token for the admin according to the configured mode.
pub fn issue_token(auth: &AuthConfig) -> Result<String, JwtError> {
    match auth.token_mode {
        TokenMode::Presence => Ok(format!("{}{}", MOCK_TOKEN_PREFIX, Utc::now().timestamp_millis())),
        TokenMode::Signed => generate_jwt(auth, Claims::new(auth.admin_email.clone(), auth.session_max_age_secs)),
    }
}

/// Check a bearer token. Presence mode only requires it to be non-empty and
/// yields no claims.
pub fn verify_token(auth: &AuthConfig, token: &str) -> Result<Option<Claims>, JwtError> {
    if token.trim().is_empty() {
        return Err(JwtError::InvalidToken("empty token".to_string()));
    }

    match auth.token_mode {
        TokenMode::Presence => Ok(None),
        TokenMode::Signed => validate_jwt(auth, token).map(Some),
    }
}

pub fn generate_jwt(auth: &AuthConfig, claims: Claims) -> Result<String, JwtError> {
    if auth.jwt_secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(auth.jwt_secret.as_bytes());
    let header = Header::default();

    encode(&header, &claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

fn validate_jwt(auth: &AuthConfig, token: &str) -> Result<Claims, JwtError> {
    if auth.jwt_secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(auth.jwt_secret.as_bytes());
    let validation = Validation::default();

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn signed() -> AuthConfig {
        let mut auth = AppConfig::development().auth;
        auth.token_mode = TokenMode::Signed;
        auth
    }

    #[test]
    fn presence_tokens_are_timestamped() {
        let auth = AppConfig::development().auth;
        let token = issue_token(&auth).unwrap();
        let digits = token.strip_prefix(MOCK_TOKEN_PREFIX).unwrap();
        assert!(!digits.is_empty());
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn presence_mode_accepts_any_non_empty_token() {
        let auth = AppConfig::development().auth;
        assert!(verify_token(&auth, "x").unwrap().is_none());
        assert!(verify_token(&auth, "  ").is_err());
    }

    #[test]
    fn signed_tokens_round_trip() {
        let auth = signed();
        let token = issue_token(&auth).unwrap();
        let claims = verify_token(&auth, &token).unwrap().unwrap();
        assert_eq!(claims.sub, "admin@snackworld.com");
        assert_eq!(claims.exp - claims.iat, auth.session_max_age_secs);
    }

    #[test]
    fn signed_mode_rejects_foreign_and_expired_tokens() {
        let auth = signed();
        assert!(verify_token(&auth, "x").is_err());

        let mut other = signed();
        other.jwt_secret = "another-secret".to_string();
        let foreign = issue_token(&other).unwrap();
        assert!(verify_token(&auth, &foreign).is_err());

        let expired = generate_jwt(&auth, Claims::new("admin@snackworld.com".to_string(), -3600)).unwrap();
        assert!(verify_token(&auth, &expired).is_err());
    }

    #[test]
    fn signed_mode_requires_secret() {
        let mut auth = signed();
        auth.jwt_secret.clear();
        assert!(matches!(issue_token(&auth), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn credentials_compare_both_fields() {
        let auth = AppConfig::development().auth;
        assert!(credentials_match(&auth, "admin@snackworld.com", "admin123"));
        assert!(!credentials_match(&auth, "admin@snackworld.com", "wrong"));
        assert!(!credentials_match(&auth, "someone@snackworld.com", "admin123"));
    }
}
