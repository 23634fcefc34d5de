//! Login Handlers
//!
//! Prefix dispatch for every inbound request:
//! - `/discord*`   - Discord authorization code callback
//! - `/microsoft*` - Microsoft authorization code callback
//! - anything else - login chooser page

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use url::form_urlencoded;

use crate::auth::{OAuthClient, TokenExchange};
use crate::error::Result;

use super::page::render_page;
use super::AppState;

pub const DISCORD_CALLBACK_PREFIX: &str = "/discord";
pub const MICROSOFT_CALLBACK_PREFIX: &str = "/microsoft";

/// Route a request by path prefix (case-sensitive)
pub async fn dispatch(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let path = uri.path();

    if path.starts_with(DISCORD_CALLBACK_PREFIX) {
        oauth_callback(&state, &state.discord, &uri).await.into_response()
    } else if path.starts_with(MICROSOFT_CALLBACK_PREFIX) {
        oauth_callback(&state, &state.microsoft, &uri).await.into_response()
    } else {
        login_chooser(&state)
    }
}

/// Exchange the callback's authorization code and show the token response
pub async fn oauth_callback(state: &AppState, client: &OAuthClient, uri: &Uri) -> Result<Response> {
    let provider = client.provider();

    let Some(code) = callback_code(uri) else {
        tracing::info!("[INFO] {} callback without code, redirecting to /", provider.name);
        return Ok(redirect_to_root());
    };

    let credentials = provider.credentials(&state.config);

    match client.exchange_code(&code, &credentials).await? {
        TokenExchange::Granted(fields) => {
            let slot = provider.render_tokens(&state.config, &fields);
            Ok(render_page(&slot, StatusCode::OK, &[]))
        }
        TokenExchange::Rejected(status) => {
            tracing::info!(
                "[INFO] {} rejected code exchange ({}), redirecting to /",
                provider.name,
                status
            );
            Ok(redirect_to_root())
        }
    }
}

/// Chooser page with both login links and missing configuration diagnostics
pub fn login_chooser(state: &AppState) -> Response {
    let discord_url = state.discord.provider().authorization_url(&state.config);
    let microsoft_url = state.microsoft.provider().authorization_url(&state.config);
    let lacks = state.config.missing_keys();

    let slot = format!(
        r#"<a class="w-25 btn btn-lg btn-primary mr-4" href="{}" role="button">Login With Discord</a>
            <a class="w-25 btn btn-lg btn-primary" href="{}" role="button">Login With Microsoft</a>
            "#,
        discord_url, microsoft_url
    );

    render_page(&slot, StatusCode::OK, &lacks)
}

/// First non-empty `code` query parameter
pub fn callback_code(uri: &Uri) -> Option<String> {
    let query = uri.query()?;

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .filter(|code| !code.is_empty())
}

/// `301 Moved Permanently` back to the chooser page
pub fn redirect_to_root() -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/")]).into_response()
}
