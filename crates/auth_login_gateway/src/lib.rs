//! Auth Login Gateway
//!
//! Login chooser and OAuth 2.0 authorization code exchange for Discord and
//! the Microsoft identity platform. The token response is rendered as HTML
//! for inspection; nothing is stored.
//!
//! # Features
//! - Login chooser page with a link per provider and missing-config diagnostics
//! - Callback handlers exchanging `?code=` for tokens in one POST
//! - Per-provider handling of non-success token endpoint responses

pub mod auth;
pub mod config;
pub mod error;
pub mod server;

pub use auth::{ClientCredentials, OAuthClient, ProviderKind, ProviderSpec, StatusPolicy, TokenExchange};
pub use config::{LoginConfig, CONFIG_KEYS};
pub use error::{GatewayError, Result};
pub use server::{router, start_server, AppState};
