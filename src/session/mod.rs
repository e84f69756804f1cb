// Cookie-held bearer token. The server keeps no session record: a non-empty
// `auth-token` cookie is all "authenticated" means for page access.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};

pub const AUTH_COOKIE: &str = "auth-token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticated,
    Anonymous,
}

impl SessionState {
    pub fn from_jar(jar: &CookieJar) -> Self {
        match token(jar) {
            Some(_) => SessionState::Authenticated,
            None => SessionState::Anonymous,
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::from_jar(&CookieJar::from_headers(headers))
    }
}

/// Cookie establishing the session for `max_age_secs`.
pub fn session_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .max_age(Duration::seconds(max_age_secs))
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie that expires the session immediately.
///
/// Always sent, even when the request carried no session cookie.
pub fn cleared_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .same_site(SameSite::Lax)
        .build()
}

/// Value of the `auth-token` cookie, if present and non-empty.
pub fn token(jar: &CookieJar) -> Option<&str> {
    jar.get(AUTH_COOKIE)
        .map(|cookie| cookie.value().trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    fn jar(cookie: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn finds_token_among_other_cookies() {
        let jar = jar("theme=dark; auth-token=mock-jwt-token-1; lang=es");
        assert_eq!(token(&jar), Some("mock-jwt-token-1"));
        assert_eq!(SessionState::from_jar(&jar), SessionState::Authenticated);
    }

    #[test]
    fn empty_or_missing_cookie_is_anonymous() {
        assert_eq!(SessionState::from_headers(&HeaderMap::new()), SessionState::Anonymous);
        assert_eq!(SessionState::from_jar(&jar("auth-token=")), SessionState::Anonymous);
        assert_eq!(SessionState::from_jar(&jar("xauth-token=abc")), SessionState::Anonymous);
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("abc".to_string(), 604_800);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(604_800)));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        let rendered = cookie.to_string();
        assert!(rendered.starts_with("auth-token=abc;"));
        assert!(rendered.contains("Max-Age=604800"));
    }

    #[test]
    fn cleared_cookie_expires_at_epoch() {
        let cookie = cleared_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));

        let rendered = cookie.to_string();
        assert!(rendered.starts_with("auth-token=;"));
        assert!(rendered.contains("Max-Age=0"));
        assert!(rendered.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }
}
