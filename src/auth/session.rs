//! Client-held sessions.
//!
//! The session lives entirely in a cookie whose value is an HS256-signed
//! token carrying the user id and display name. Nothing is stored server
//! side, so logging out only means telling the browser to drop the cookie.
//! A token that fails signature or expiry checks is treated as no session.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::time::Duration;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, get_current_timestamp,
};
use serde::{Deserialize, Serialize};

use crate::db::models::UserId;
use crate::error::{AppError, Result};

pub const SESSION_COOKIE: &str = "bookshelf_session";

/// The authenticated identity carried by a valid session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    name: String,
    iat: u64,
    exp: u64,
}

#[derive(Clone)]
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
    cookie_secure: bool,
}

impl SessionKeys {
    pub fn new(secret: &[u8], ttl_secs: u64, cookie_secure: bool) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_secs,
            cookie_secure,
        }
    }

    /// Keys from a fresh random secret. Sessions signed with them die with
    /// the process.
    pub fn random(ttl_secs: u64, cookie_secure: bool) -> Self {
        let mut secret = [0u8; 32];
        OsRng.fill_bytes(&mut secret);
        Self::new(&secret, ttl_secs, cookie_secure)
    }

    pub fn issue(&self, user: &SessionUser) -> Result<String> {
        self.issue_at(user, get_current_timestamp())
    }

    fn issue_at(&self, user: &SessionUser, now: u64) -> Result<String> {
        let claims = SessionClaims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AppError::SessionToken)
    }

    pub fn verify(&self, token: &str) -> Option<SessionUser> {
        let validation = Validation::new(Algorithm::HS256);
        let data = match decode::<SessionClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!("rejected session token: {e}");
                return None;
            }
        };

        let id = data.claims.sub.parse().ok()?;
        Some(SessionUser {
            id,
            name: data.claims.name,
        })
    }

    /// Cookie carrying a freshly issued session token.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        let max_age = i64::try_from(self.ttl_secs).unwrap_or(i64::MAX);

        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(max_age))
            .secure(self.cookie_secure)
            .build()
    }

    /// Cookie to hand to [`CookieJar::remove`] on logout. The path must match
    /// the one the session was set with.
    pub fn removal_cookie() -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, "")).path("/").build()
    }
}

/// The session token sent with the request, if any.
pub fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};
    use axum::response::IntoResponse;

    fn alice() -> SessionUser {
        SessionUser {
            id: 7,
            name: "Alice".to_string(),
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let keys = SessionKeys::new(b"secret", 3600, false);
        let token = keys.issue(&alice()).unwrap();
        assert_eq!(keys.verify(&token), Some(alice()));
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let token = SessionKeys::new(b"one", 3600, false).issue(&alice()).unwrap();
        let other = SessionKeys::new(b"two", 3600, false);
        assert_eq!(other.verify(&token), None);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let keys = SessionKeys::new(b"secret", 3600, false);
        let mut token = keys.issue(&alice()).unwrap();
        token.push('x');
        assert_eq!(keys.verify(&token), None);
        assert_eq!(keys.verify("garbage"), None);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = SessionKeys::new(b"secret", 10, false);
        // Well past the default validation leeway
        let token = keys.issue_at(&alice(), get_current_timestamp() - 3600).unwrap();
        assert_eq!(keys.verify(&token), None);
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let keys = SessionKeys::new(b"secret", u64::MAX, false);
        let token = keys.issue(&alice()).unwrap();
        assert_eq!(keys.verify(&token), Some(alice()));
        assert_eq!(
            keys.session_cookie(token).max_age(),
            Some(Duration::seconds(i64::MAX))
        );
    }

    #[test]
    fn test_cookie_attributes() {
        let keys = SessionKeys::new(b"secret", 60, true);
        let cookie = keys.session_cookie("tok".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(60)));
        assert_eq!(cookie.secure(), Some(true));

        let plain = SessionKeys::new(b"secret", 60, false).session_cookie("tok".to_string());
        assert_eq!(plain.secure(), Some(false));
    }

    #[test]
    fn test_session_token_from_request_cookies() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&CookieJar::from_headers(&headers)), None);

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; bookshelf_session=abc.def; lang=en"),
        );
        let jar = CookieJar::from_headers(&headers);
        assert_eq!(session_token(&jar), Some("abc.def"));

        headers.insert(header::COOKIE, HeaderValue::from_static("bookshelf_session="));
        assert_eq!(session_token(&CookieJar::from_headers(&headers)), None);
    }

    #[test]
    fn test_logout_emits_removal_for_existing_session() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("bookshelf_session=abc"));

        let jar = CookieJar::from_headers(&headers).remove(SessionKeys::removal_cookie());
        let response = (jar, ()).into_response();
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        let removal = Cookie::parse(set_cookie).unwrap();
        assert_eq!(removal.name(), SESSION_COOKIE);
        assert_eq!(removal.value(), "");
        assert_eq!(removal.path(), Some("/"));
        assert_eq!(removal.max_age(), Some(Duration::ZERO));
    }
}
