use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No session, or the session cookie failed verification.
    #[error("Authentication required")]
    Unauthenticated,

    /// The book does not exist or belongs to another user.
    #[error("Unauthorized")]
    Unauthorized,

    // Deliberately vague: never say whether the email or the password was wrong
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Password hashing failed")]
    PasswordHash,

    #[error("Failed to issue session token")]
    SessionToken,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::SEE_OTHER,
            AppError::Unauthorized => StatusCode::FORBIDDEN,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::PasswordHash => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SessionToken => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => Redirect::to("/login").into_response(),
            AppError::PasswordHash | AppError::SessionToken | AppError::Database(_) => {
                tracing::error!("request failed: {self}");
                (self.status_code(), "Internal server error").into_response()
            }
            other => (other.status_code(), other.to_string()).into_response(),
        }
    }
}
