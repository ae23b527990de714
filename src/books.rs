//! Ownership-scoped book operations. Every query filters on the caller's
//! user id, so another user's book is never read or changed.

use sqlx::SqlitePool;

use crate::db::models::{Book, BookId, UserId};
use crate::db::repo;
use crate::error::{AppError, Result};

pub async fn list(pool: &SqlitePool, user_id: UserId) -> Result<Vec<Book>> {
    repo::list_books(pool, user_id).await
}

pub async fn create(
    pool: &SqlitePool,
    user_id: UserId,
    title: &str,
    author: &str,
) -> Result<BookId> {
    let id = repo::insert_book(pool, user_id, title, author).await?;
    tracing::debug!(book_id = id, user_id, "book added");
    Ok(id)
}

/// Authorization guard: the book must exist and belong to `user_id`.
pub async fn owned_book(pool: &SqlitePool, id: BookId, user_id: UserId) -> Result<Book> {
    repo::get_owned_book(pool, id, user_id).await?.ok_or_else(|| {
        tracing::warn!(book_id = id, user_id, "book not owned by caller");
        AppError::Unauthorized
    })
}

pub async fn read_for_edit(pool: &SqlitePool, id: BookId, user_id: UserId) -> Result<Book> {
    owned_book(pool, id, user_id).await
}

/// Returns the number of rows changed; zero when `id` is not the caller's.
pub async fn update(
    pool: &SqlitePool,
    id: BookId,
    user_id: UserId,
    title: &str,
    author: &str,
) -> Result<u64> {
    repo::update_book(pool, id, user_id, title, author).await
}

/// Returns the number of rows removed; zero when `id` is not the caller's.
pub async fn delete(pool: &SqlitePool, id: BookId, user_id: UserId) -> Result<u64> {
    repo::delete_book(pool, id, user_id).await
}
