use axum::http::{header::CONTENT_TYPE, StatusCode};
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::config::LoginConfig;
use crate::error::{GatewayError, Result};

pub const DISCORD_AUTH_URL: &str = "https://discord.com/api/oauth2/authorize";
pub const DISCORD_TOKEN_URL: &str = "https://discord.com/api/v10/oauth2/token";
pub const MICROSOFT_AUTH_URL: &str = "https://login.microsoftonline.com/common/oauth2/v2.0/authorize";
pub const MICROSOFT_TOKEN_URL: &str = "https://login.microsoftonline.com/common/oauth2/v2.0/token";

/// Scope requested from Discord when `DISCORD_SCOPE` is unset
pub const DISCORD_DEFAULT_SCOPE: &str = "bot";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Discord,
    Microsoft,
}

/// What to do when the token endpoint answers with a non-success status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Parse and render the body regardless of status
    Ignore,
    /// Send the browser back to the chooser page
    RedirectOnFailure,
}

/// OAuth provider description: endpoints, status policy and page template
#[derive(Debug, Clone)]
pub struct ProviderSpec {
    pub kind: ProviderKind,
    pub name: &'static str,
    pub auth_url: String,
    pub token_url: String,
    pub status_policy: StatusPolicy,
}

impl ProviderSpec {
    /// Discord OAuth2 (bot/application authorization)
    ///
    /// Discord error bodies are JSON too, so the status is not checked and
    /// the error fields end up on the result page.
    pub fn discord() -> Self {
        Self {
            kind: ProviderKind::Discord,
            name: "discord",
            auth_url: DISCORD_AUTH_URL.to_string(),
            token_url: DISCORD_TOKEN_URL.to_string(),
            status_policy: StatusPolicy::Ignore,
        }
    }

    /// Microsoft identity platform v2.0, `common` tenant
    pub fn microsoft() -> Self {
        Self {
            kind: ProviderKind::Microsoft,
            name: "microsoft",
            auth_url: MICROSOFT_AUTH_URL.to_string(),
            token_url: MICROSOFT_TOKEN_URL.to_string(),
            status_policy: StatusPolicy::RedirectOnFailure,
        }
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn with_auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = auth_url.into();
        self
    }

    /// Client credentials for this provider; unset values are sent empty
    pub fn credentials<'a>(&self, config: &'a LoginConfig) -> ClientCredentials<'a> {
        let (client_id, client_secret, redirect_uri) = match self.kind {
            ProviderKind::Discord => (
                &config.discord_client_id,
                &config.discord_client_secret,
                &config.discord_redirect_url,
            ),
            ProviderKind::Microsoft => (
                &config.microsoft_client_id,
                &config.microsoft_client_secret,
                &config.microsoft_redirect_url,
            ),
        };

        ClientCredentials {
            client_id: client_id.as_deref().unwrap_or_default(),
            client_secret: client_secret.as_deref().unwrap_or_default(),
            redirect_uri: redirect_uri.as_deref().unwrap_or_default(),
        }
    }

    /// Login link for the chooser page
    pub fn authorization_url(&self, config: &LoginConfig) -> String {
        let credentials = self.credentials(config);
        let mut query = form_urlencoded::Serializer::new(String::new());

        match self.kind {
            ProviderKind::Discord => {
                if let Some(login_url) = config.get("DISCORD_LOGIN_URL") {
                    return login_url.to_string();
                }

                query
                    .append_pair("client_id", credentials.client_id)
                    .append_pair("permissions", config.get("DISCORD_PERMISSIONS").unwrap_or_default())
                    .append_pair("response_type", "code")
                    .append_pair("redirect_uri", credentials.redirect_uri)
                    .append_pair(
                        "scope",
                        config.get("DISCORD_SCOPE").unwrap_or(DISCORD_DEFAULT_SCOPE),
                    );
            }
            ProviderKind::Microsoft => {
                query
                    .append_pair("client_id", credentials.client_id)
                    .append_pair("response_type", "code")
                    .append_pair("redirect_uri", credentials.redirect_uri)
                    .append_pair("scope", config.get("MICROSOFT_SCOPE").unwrap_or_default());
            }
        }

        format!("{}?{}", self.auth_url, query.finish())
    }

    /// HTML fragment listing every token response field in response order
    pub fn render_tokens(&self, config: &LoginConfig, fields: &Map<String, Value>) -> String {
        match self.kind {
            ProviderKind::Discord => {
                let lines: String = fields
                    .iter()
                    .map(|(key, value)| format!("{} : {} <br/>", key, display_value(value)))
                    .collect();
                format!("<p>{}</p>", lines)
            }
            ProviderKind::Microsoft => {
                let credentials = self.credentials(config);
                let blocks: String = fields
                    .iter()
                    .map(|(key, value)| format!("\n\t\t<h2>{}: {}</h2>", key, display_value(value)))
                    .collect();
                format!(
                    "\n\t<div>\n\t\t<h2>Client ID: {}</h2>\n\t\t<h2>Redirect URL: {}</h2>{}\n\t</div>\n\t",
                    credentials.client_id, credentials.redirect_uri, blocks
                )
            }
        }
    }
}

/// Credentials sent to the token endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientCredentials<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
}

/// Outcome of a single token exchange
#[derive(Debug, Clone, PartialEq)]
pub enum TokenExchange {
    /// Parsed token response, in the order the provider sent the fields
    Granted(Map<String, Value>),
    /// Upstream status was not a success and the provider policy rejects it
    Rejected(StatusCode),
}

/// Strings render bare, everything else as compact JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// OAuth client performing the authorization code exchange for one provider
#[derive(Debug, Clone)]
pub struct OAuthClient {
    provider: ProviderSpec,
    http_client: reqwest::Client,
}

impl OAuthClient {
    pub fn new(provider: ProviderSpec, http_client: reqwest::Client) -> Self {
        Self {
            provider,
            http_client,
        }
    }

    pub fn provider(&self) -> &ProviderSpec {
        &self.provider
    }

    /// Exchange an authorization code for tokens
    ///
    /// One POST, no retry. Transport failures and unreadable bodies are
    /// errors; a non-success status is only an outcome when the provider's
    /// [`StatusPolicy`] says so.
    pub async fn exchange_code(
        &self,
        code: &str,
        credentials: &ClientCredentials<'_>,
    ) -> Result<TokenExchange> {
        let provider = self.provider.name;

        tracing::info!(
            "[INFO] {} token exchange: client_id={}, redirect_uri={}",
            provider,
            credentials.client_id,
            credentials.redirect_uri
        );

        let form_params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", credentials.client_id),
            ("client_secret", credentials.client_secret),
            ("redirect_uri", credentials.redirect_uri),
        ];

        let response = self
            .http_client
            .post(&self.provider.token_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&form_params)
            .send()
            .await
            .map_err(|source| GatewayError::TokenRequest { provider, source })?;

        let status = response.status();
        if !status.is_success() {
            match self.provider.status_policy {
                StatusPolicy::RedirectOnFailure => {
                    tracing::warn!("[WARN] {} token endpoint returned {}", provider, status);
                    return Ok(TokenExchange::Rejected(status));
                }
                StatusPolicy::Ignore => {
                    tracing::debug!("{} token endpoint returned {}, rendering body", provider, status);
                }
            }
        }

        let body = response
            .text()
            .await
            .map_err(|source| GatewayError::TokenRequest { provider, source })?;

        let parsed: Value = serde_json::from_str(&body)
            .map_err(|source| GatewayError::InvalidTokenResponse { provider, source })?;

        match parsed {
            Value::Object(fields) => {
                tracing::info!("[OK] {} token response with {} fields", provider, fields.len());
                Ok(TokenExchange::Granted(fields))
            }
            _ => Err(GatewayError::UnexpectedTokenShape(provider)),
        }
    }
}
