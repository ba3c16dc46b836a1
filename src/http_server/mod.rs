//! # HTTP Server Module
//!
//! Serves the data API over Axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `{base_path}/data` - Create and list records
//! - `{base_path}/data/:id` - Get and delete a record

pub mod config;
pub mod health;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
