//! Client configuration, read from the environment.

use gymkit_types::SESSION_COOKIE_NAME;
use url::Url;

use crate::error::ClientError;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8045/api";
const AUTH_ROUTE_SUFFIX: &str = "/auth";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, e.g. `http://127.0.0.1:8045/api`.
    pub api_url: Url,
    /// Base URL of the auth API. Defaults to `<api_url>/auth`.
    pub auth_url: Url,
    /// Session token sent as the session cookie, if signed in.
    pub session_token: Option<String>,
    pub session_cookie_name: String,
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Read `GYMKIT_API_URL`, `GYMKIT_AUTH_URL` and `GYMKIT_SESSION_TOKEN`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = lookup("GYMKIT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base = api_base.trim_end_matches('/').to_string();
        let auth_base = lookup("GYMKIT_AUTH_URL")
            .unwrap_or_else(|| format!("{}{}", api_base, AUTH_ROUTE_SUFFIX));

        Ok(Self {
            api_url: parse_url("GYMKIT_API_URL", &api_base)?,
            auth_url: parse_url("GYMKIT_AUTH_URL", &auth_base)?,
            session_token: lookup("GYMKIT_SESSION_TOKEN").filter(|t| !t.is_empty()),
            session_cookie_name: SESSION_COOKIE_NAME.to_string(),
            timeout_secs: 30,
        })
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

fn parse_url(key: &str, value: &str) -> Result<Url, ClientError> {
    Url::parse(value).map_err(|e| ClientError::Config(format!("{key}={value}: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ClientConfig, ClientError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:8045/api");
        assert_eq!(config.auth_url.as_str(), "http://127.0.0.1:8045/api/auth");
        assert!(config.session_token.is_none());
        assert_eq!(config.session_cookie_name, "better-auth.session_token");
    }

    #[test]
    fn test_auth_url_follows_api_url() {
        let config = config_from(&[("GYMKIT_API_URL", "https://gym.example.com/v2/")]).unwrap();
        assert_eq!(config.auth_url.as_str(), "https://gym.example.com/v2/auth");
    }

    #[test]
    fn test_explicit_auth_url() {
        let config = config_from(&[("GYMKIT_AUTH_URL", "https://auth.example.com")]).unwrap();
        assert_eq!(config.auth_url.host_str(), Some("auth.example.com"));
    }

    #[test]
    fn test_session_token_from_env() {
        let config = config_from(&[("GYMKIT_SESSION_TOKEN", "tok-123")]).unwrap();
        assert_eq!(config.session_token.as_deref(), Some("tok-123"));
        assert!(config_from(&[("GYMKIT_SESSION_TOKEN", "")]).unwrap().session_token.is_none());
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let err = config_from(&[("GYMKIT_API_URL", "/api")]).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
