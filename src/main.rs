pub mod api;
pub mod auth;
pub mod books;
pub mod config;
pub mod db;
pub mod error;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment alone is enough
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookshelf=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting Bookshelf on {}", config.bind_addr);

    api::server::start_server(&config).await
}
