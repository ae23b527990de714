use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;
use std::sync::Arc;

use crate::api::server::AppState;
use crate::auth::session::{SessionUser, session_token};
use crate::error::{AppError, Result};

/// Per-request view of who is calling. Built from the session cookie; a
/// missing or invalid cookie yields `user: None` rather than a rejection.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub user: Option<SessionUser>,
}

impl RequestContext {
    pub fn require_user(&self) -> Result<&SessionUser> {
        self.user.as_ref().ok_or(AppError::Unauthenticated)
    }
}

impl FromRequestParts<Arc<AppState>> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let user = session_token(&jar).and_then(|token| state.sessions.verify(token));
        Ok(Self { user })
    }
}
