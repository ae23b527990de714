use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use crate::api::context::RequestContext;
use crate::api::server::AppState;
use crate::api::views;
use crate::auth;
use crate::auth::session::SessionKeys;
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub async fn home(ctx: RequestContext) -> Html<String> {
    Html(views::home(ctx.user.as_ref()))
}

pub async fn signup_page() -> Html<String> {
    Html(views::signup(None))
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    match auth::signup(&state.db, &form.name, &form.email, &form.password).await {
        Ok(_) => Ok(Redirect::to("/login").into_response()),
        Err(e @ AppError::DuplicateEmail) => {
            let msg = e.to_string();
            Ok((StatusCode::CONFLICT, Html(views::signup(Some(&msg)))).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn login_page() -> Html<String> {
    Html(views::login(None))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match auth::login(&state.db, &form.email, &form.password).await {
        Ok(user) => {
            let token = state.sessions.issue(&user)?;
            let jar = jar.add(state.sessions.session_cookie(token));
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        Err(e @ AppError::InvalidCredentials) => {
            let msg = e.to_string();
            Ok((StatusCode::UNAUTHORIZED, Html(views::login(Some(&msg)))).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(SessionKeys::removal_cookie()), Redirect::to("/"))
}
