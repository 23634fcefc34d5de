pub mod oauth;

pub use oauth::{
    display_value, ClientCredentials, OAuthClient, ProviderKind, ProviderSpec, StatusPolicy,
    TokenExchange,
};
