pub mod auth;
pub mod books;
pub mod context;
pub mod server;
pub mod views;
