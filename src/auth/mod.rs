pub mod password;
pub mod session;

use sqlx::SqlitePool;

use crate::db::models::UserId;
use crate::db::repo;
use crate::error::{AppError, Result};
use session::SessionUser;

/// Registers a new account. The email must not be taken; nothing else about
/// the input is validated.
pub async fn signup(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<UserId> {
    let hash = password::hash_password(password)?;
    let id = repo::insert_user(pool, name, email, &hash).await?;

    tracing::info!(user_id = id, "new account registered");
    Ok(id)
}

/// Checks credentials and returns the identity to bind to a session.
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(pool: &SqlitePool, email: &str, password: &str) -> Result<SessionUser> {
    let user = repo::get_user_by_email(pool, email).await?;

    match user {
        Some(user) if password::verify_password(password, &user.password_hash) => {
            tracing::info!(user_id = user.id, "login succeeded");
            Ok(SessionUser {
                id: user.id,
                name: user.name,
            })
        }
        _ => {
            tracing::warn!("failed login attempt");
            Err(AppError::InvalidCredentials)
        }
    }
}
