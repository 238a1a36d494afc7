//! HTTP host for the coordinator
//!
//! This is the process boundary the external actors talk to: page-side
//! extractors submit text, viewer panels poll session state or follow the
//! live event stream, and the options surface reads and edits the analysis
//! config record.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::coordinator::Coordinator;
use crate::error::ServerError;

pub mod api;

pub use api::create_router;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The analysis coordinator
    pub coordinator: Coordinator,

    /// Server start time, for uptime reporting
    pub start_time: Arc<Instant>,
}

/// Coordinator API server
pub struct ApiServer {
    config: ServiceConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a new API server around a coordinator
    pub fn new(config: ServiceConfig, coordinator: Coordinator) -> Self {
        let state = AppState {
            coordinator,
            start_time: Arc::new(Instant::now()),
        };

        Self { config, state }
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let mut router = create_router(self.state.clone());

        // Viewers usually live on other origins
        if self.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.config.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start the server
    pub async fn start(&self) -> Result<(), ServerError> {
        self.start_with_shutdown(std::future::pending()).await
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = self.config.bind_address;

        tracing::info!("Starting coordinator API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(e.to_string()))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        tracing::info!("Coordinator API server shutdown complete");
        Ok(())
    }
}
