//! # HTTP Server
//!
//! Axum server assembling the address routes, CORS and request tracing.

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use super::openapi;
use crate::config::AppConfig;
use crate::storage::Storage;

/// HTTP server for the address book API
pub struct ApiServer {
    config: AppConfig,
    router: Router,
}

impl ApiServer {
    /// Create a server over the given storage handle
    pub fn new(config: AppConfig, storage: Arc<Storage>) -> Self {
        let router = Self::build_router(&config, storage);
        Self { config, router }
    }

    /// Build the router with all endpoints
    fn build_router(config: &AppConfig, storage: Arc<Storage>) -> Router {
        // Configure CORS from config
        let cors = if config.cors_origins.is_empty() {
            // If no origins configured, use permissive for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            // Use configured origins for production
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        // The static /addresses/nearby/ route takes priority over the
        // /addresses/{id} capture, so "nearby" can never be read as an id.
        Router::new()
            .route("/addresses/", post(handlers::create_handler))
            .route("/addresses/nearby/", get(handlers::nearby_handler))
            .route("/addresses/{id}", get(handlers::get_handler))
            .route("/addresses/{id}", put(handlers::update_handler))
            .route("/addresses/{id}", delete(handlers::delete_handler))
            .route("/health", get(handlers::health_handler))
            .route("/openapi.json", get(openapi::document_handler))
            .with_state(storage)
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

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;
        info!(%addr, "address book API listening");
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
