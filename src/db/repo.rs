use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use crate::db::models::{Book, BookId, User, UserId};
use crate::error::{AppError, Result};

pub async fn connect(db_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(db_url)
        .await?;

    Ok(pool)
}

/// Creates both tables if they are missing. Safe to run on every start.
pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            user_id INTEGER NOT NULL REFERENCES users(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT id, name, password FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Inserts a user and returns the generated id. A taken email surfaces as
/// [`AppError::DuplicateEmail`].
pub async fn insert_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<UserId> {
    let result = sqlx::query("INSERT INTO users (name, email, password) VALUES (?, ?, ?)")
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::DuplicateEmail
            }
            other => AppError::Database(other),
        })?;

    Ok(result.last_insert_rowid())
}

pub async fn list_books(pool: &SqlitePool, user_id: UserId) -> Result<Vec<Book>> {
    let books = sqlx::query_as::<_, Book>(
        "SELECT id, title, author, user_id FROM books WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(books)
}

pub async fn insert_book(
    pool: &SqlitePool,
    user_id: UserId,
    title: &str,
    author: &str,
) -> Result<BookId> {
    let result = sqlx::query("INSERT INTO books (title, author, user_id) VALUES (?, ?, ?)")
        .bind(title)
        .bind(author)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Fetches a book only when it belongs to `user_id`.
pub async fn get_owned_book(
    pool: &SqlitePool,
    id: BookId,
    user_id: UserId,
) -> Result<Option<Book>> {
    let book = sqlx::query_as::<_, Book>(
        "SELECT id, title, author, user_id FROM books WHERE id = ? AND user_id = ?",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(book)
}

pub async fn update_book(
    pool: &SqlitePool,
    id: BookId,
    user_id: UserId,
    title: &str,
    author: &str,
) -> Result<u64> {
    let result = sqlx::query("UPDATE books SET title = ?, author = ? WHERE id = ? AND user_id = ?")
        .bind(title)
        .bind(author)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_book(pool: &SqlitePool, id: BookId, user_id: UserId) -> Result<u64> {
    let result = sqlx::query("DELETE FROM books WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Single-connection in-memory database with the schema applied. Every
/// pooled connection to `sqlite::memory:` is a separate database, so the
/// pool must never grow or recycle its one connection.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    create_tables(&pool).await.expect("schema");
    pool
}
