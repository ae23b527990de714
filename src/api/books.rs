use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::context::RequestContext;
use crate::api::server::AppState;
use crate::api::views;
use crate::books;
use crate::db::models::BookId;
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct BookForm {
    pub title: String,
    pub author: String,
}

// Path ids are taken as strings and parsed after the session check. A
// malformed id never names a book the caller owns.
fn parse_book_id(raw: &str) -> Option<BookId> {
    raw.parse().ok()
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> Result<Html<String>> {
    let user = ctx.require_user()?;
    let books = books::list(&state.db, user.id).await?;
    Ok(Html(views::dashboard(&user.name, &books)))
}

pub async fn add_page(ctx: RequestContext) -> Result<Html<String>> {
    ctx.require_user()?;
    Ok(Html(views::add_book()))
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(form): Form<BookForm>,
) -> Result<Redirect> {
    let user = ctx.require_user()?;
    books::create(&state.db, user.id, &form.title, &form.author).await?;
    Ok(Redirect::to("/dashboard"))
}

pub async fn edit_page(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let user = ctx.require_user()?;
    let id = parse_book_id(&id).ok_or(AppError::Unauthorized)?;
    let book = books::read_for_edit(&state.db, id, user.id).await?;
    Ok(Html(views::edit_book(&book)))
}

pub async fn edit(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> Result<Redirect> {
    let user = ctx.require_user()?;
    let id = parse_book_id(&id).ok_or(AppError::Unauthorized)?;
    books::owned_book(&state.db, id, user.id).await?;
    books::update(&state.db, id, user.id, &form.title, &form.author).await?;
    Ok(Redirect::to("/dashboard"))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let user = ctx.require_user()?;
    if let Some(id) = parse_book_id(&id) {
        books::delete(&state.db, id, user.id).await?;
    }
    Ok(Redirect::to("/dashboard"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book_id() {
        assert_eq!(parse_book_id("42"), Some(42));
        assert_eq!(parse_book_id("abc"), None);
        assert_eq!(parse_book_id(""), None);
        assert_eq!(parse_book_id("1.5"), None);
    }
}
