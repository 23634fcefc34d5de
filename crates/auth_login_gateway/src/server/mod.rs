//! Auth Login Gateway HTTP Server
//!
//! Every request goes through a single fallback handler that dispatches by
//! path prefix to the provider callbacks or the login chooser page.

pub mod oauth_handlers;
pub mod page;

use crate::{LoginConfig, OAuthClient, ProviderSpec};
use axum::Router as AxumRouter;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers, read-only after startup
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: LoginConfig,
    pub discord: OAuthClient,
    pub microsoft: OAuthClient,
}

impl AppState {
    /// State with the real Discord and Microsoft endpoints
    pub fn new(config: LoginConfig) -> Self {
        Self::with_providers(
            config,
            ProviderSpec::discord(),
            ProviderSpec::microsoft(),
            reqwest::Client::new(),
        )
    }

    pub fn with_providers(
        config: LoginConfig,
        discord: ProviderSpec,
        microsoft: ProviderSpec,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            config,
            discord: OAuthClient::new(discord, http_client.clone()),
            microsoft: OAuthClient::new(microsoft, http_client),
        }
    }
}

/// Build the gateway router
pub fn router(state: Arc<AppState>) -> AxumRouter {
    AxumRouter::new()
        .fallback(oauth_handlers::dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Auth Login Gateway HTTP server
///
/// Routes:
/// - GET /discord*   - Discord OAuth callback
/// - GET /microsoft* - Microsoft OAuth callback
/// - GET /           - Login chooser (also every other path)
///
/// # Errors
/// Returns error if binding or serving fails
pub async fn start_server(host: &str, port: u16, config: LoginConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config));
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;

    info!("[INFO] Auth Login Gateway listening on {}", addr);
    info!("[INFO] Available endpoints:");
    info!("  GET    /discord?code=...        - Discord OAuth callback");
    info!("  GET    /microsoft?code=...      - Microsoft OAuth callback");
    info!("  GET    /                        - Login chooser");

    axum::serve(listener, app).await?;

    Ok(())
}
