pub type UserId = i64;
pub type BookId = i64;

/// The columns of a `users` row needed to authenticate.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    // Argon2 PHC string, never the raw password
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub user_id: UserId,
}
