//! # HTTP Server
//!
//! Combines the data routes and the health check into one Axum server, with
//! CORS, request tracing, and panic recovery.

use std::any::Any;
use std::net::SocketAddr;

use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::HttpServerConfig;
use super::health::health_routes;
use crate::rest_api::{data_routes, ApiError, DataHandler};

/// HTTP server for the data API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server for `handler` with the given configuration
    pub fn new(config: HttpServerConfig, handler: DataHandler) -> Self {
        let router = Self::build_router(&config, handler);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(config: &HttpServerConfig, handler: DataHandler) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin)
        };

        let data = data_routes(handler);
        let api = if config.base_path.is_empty() {
            Router::new().merge(data)
        } else {
            Router::new().nest(&config.base_path, data)
        };

        Router::new()
            .merge(health_routes())
            .merge(api)
            .fallback(route_not_found)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, base_path = %self.config.base_path, "listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}
