// Auth Login Gateway Server
//
// Login chooser plus Discord / Microsoft OAuth callback handling.
// Usage: auth_login_gateway [host] [port]

use auth_login_gateway::{start_server, LoginConfig};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let host = args.get(1).map(|s| s.as_str()).unwrap_or("127.0.0.1");
    let port = args.get(2)
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8787);

    let config = LoginConfig::from_env();

    let missing = config.missing_keys();
    if missing.is_empty() {
        tracing::info!("[OK] All provider settings configured");
    } else {
        tracing::warn!("[WARN] Missing configuration: {}", missing.join(", "));
    }
    if let Some(client_id) = config.get("DISCORD_CLIENT_ID") {
        tracing::info!("[OK] Discord OAuth configured: {}", client_id);
    }
    if let Some(client_id) = config.get("MICROSOFT_CLIENT_ID") {
        tracing::info!("[OK] Microsoft OAuth configured: {}", client_id);
    }

    start_server(host, port, config).await?;

    Ok(())
}
