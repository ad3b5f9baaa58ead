use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Farmchain HTTP server.
pub struct FarmchainServer {
    config: ServerConfig,
    state: AppState,
}

impl FarmchainServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            state: AppState::new(),
        }
    }

    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(self.state, &self.config);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("farmchain server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
