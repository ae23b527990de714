use axum::{Json, Router, routing::get};
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::api::{auth, books};
use crate::auth::session::SessionKeys;
use crate::config::Config;
use crate::db::repo;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub sessions: SessionKeys,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(auth::home))
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(books::dashboard))
        .route("/add", get(books::add_page).post(books::add))
        .route("/edit/{id}", get(books::edit_page).post(books::edit))
        .route("/delete/{id}", get(books::delete))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: &Config) -> anyhow::Result<()> {
    let pool = repo::connect(&config.database_url, config.max_connections).await?;
    repo::create_tables(&pool).await?;

    let sessions = match &config.session_secret {
        Some(secret) => SessionKeys::new(
            secret.as_bytes(),
            config.session_ttl_secs,
            config.cookie_secure,
        ),
        None => {
            tracing::warn!(
                "BOOKSHELF_SESSION_SECRET not set; using a random secret, sessions end on restart"
            );
            SessionKeys::random(config.session_ttl_secs, config.cookie_secure)
        }
    };

    let state = Arc::new(AppState { db: pool, sessions });
    let app = router(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
