//! Gateway configuration
//!
//! The ten provider settings are read once at startup and shared read-only
//! with every request. An unset or empty value counts as missing.

use std::env;

/// Recognized configuration keys, in the order they are reported when missing.
pub const CONFIG_KEYS: [&str; 10] = [
    "DISCORD_CLIENT_ID",
    "DISCORD_CLIENT_SECRET",
    "DISCORD_REDIRECT_URL",
    "DISCORD_PERMISSIONS",
    "DISCORD_SCOPE",
    "DISCORD_LOGIN_URL",
    "MICROSOFT_CLIENT_ID",
    "MICROSOFT_CLIENT_SECRET",
    "MICROSOFT_SCOPE",
    "MICROSOFT_REDIRECT_URL",
];

/// Client credentials and login settings for both providers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginConfig {
    pub discord_client_id: Option<String>,
    pub discord_client_secret: Option<String>,
    pub discord_redirect_url: Option<String>,
    pub discord_permissions: Option<String>,
    /// Scopes joined with `+`, e.g. `bot+identify`
    pub discord_scope: Option<String>,
    /// Replaces the constructed Discord authorize URL when set
    pub discord_login_url: Option<String>,
    pub microsoft_client_id: Option<String>,
    pub microsoft_client_secret: Option<String>,
    /// Scopes joined with spaces
    pub microsoft_scope: Option<String>,
    pub microsoft_redirect_url: Option<String>,
}

impl LoginConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup (env, secret store, fixtures)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            discord_client_id: get("DISCORD_CLIENT_ID"),
            discord_client_secret: get("DISCORD_CLIENT_SECRET"),
            discord_redirect_url: get("DISCORD_REDIRECT_URL"),
            discord_permissions: get("DISCORD_PERMISSIONS"),
            discord_scope: get("DISCORD_SCOPE"),
            discord_login_url: get("DISCORD_LOGIN_URL"),
            microsoft_client_id: get("MICROSOFT_CLIENT_ID"),
            microsoft_client_secret: get("MICROSOFT_CLIENT_SECRET"),
            microsoft_scope: get("MICROSOFT_SCOPE"),
            microsoft_redirect_url: get("MICROSOFT_REDIRECT_URL"),
        }
    }

    /// Value for one of [`CONFIG_KEYS`]; `None` when unset, empty or unknown
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "DISCORD_CLIENT_ID" => &self.discord_client_id,
            "DISCORD_CLIENT_SECRET" => &self.discord_client_secret,
            "DISCORD_REDIRECT_URL" => &self.discord_redirect_url,
            "DISCORD_PERMISSIONS" => &self.discord_permissions,
            "DISCORD_SCOPE" => &self.discord_scope,
            "DISCORD_LOGIN_URL" => &self.discord_login_url,
            "MICROSOFT_CLIENT_ID" => &self.microsoft_client_id,
            "MICROSOFT_CLIENT_SECRET" => &self.microsoft_client_secret,
            "MICROSOFT_SCOPE" => &self.microsoft_scope,
            "MICROSOFT_REDIRECT_URL" => &self.microsoft_redirect_url,
            _ => return None,
        };
        value.as_deref().filter(|value| !value.is_empty())
    }

    /// Keys with no usable value, in declared order
    pub fn missing_keys(&self) -> Vec<&'static str> {
        CONFIG_KEYS
            .iter()
            .copied()
            .filter(|key| self.get(key).is_none())
            .collect()
    }
}
