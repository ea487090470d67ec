//! axum server hosting the webhook endpoint.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{custom_get, custom_post, health_check, receive_event, AppState};
use crate::config::SyncConfig;
use crate::sync::SyncHandler;

/// Webhook server wrapping the sync pipeline.
pub struct ApiServer {
    config: SyncConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: SyncConfig, handler: Arc<SyncHandler>) -> Self {
        Self {
            config,
            state: AppState::new(handler),
        }
    }

    /// Build the router with all routes.
    fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/events", post(receive_event))
            .route("/health", get(health_check))
            .route("/store/custom", get(custom_get).post(custom_post))
            .with_state(self.state.clone());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            router = router.layer(cors);
        }

        router.layer(TraceLayer::new_for_http())
    }

    /// Run the server until ctrl-c.
    pub async fn run(self) -> Result<()> {
        let bind_addr = self.config.bind_address();
        let app = self.build_router();

        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("failed to bind {bind_addr}"))?;

        tracing::info!("listening on {bind_addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("shutting down");
            })
            .await
            .context("server error")?;

        Ok(())
    }
}
