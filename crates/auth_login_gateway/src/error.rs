use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::page::render_page;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Token request to {provider} failed: {source}")]
    TokenRequest {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Token response from {provider} is not valid JSON: {source}")]
    InvalidTokenResponse {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Token response from {0} is not a JSON object")]
    UnexpectedTokenShape(&'static str),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::error!("[ERROR] {}", self);

        render_page(
            "<h4>Token exchange failed</h4><p>The identity provider could not be reached or returned an unreadable response.</p>",
            StatusCode::INTERNAL_SERVER_ERROR,
            &[],
        )
    }
}
