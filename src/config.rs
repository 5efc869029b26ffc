//! Client configuration.

use crate::error::KbError;
use reqwest::header::HeaderMap;

/// Environment variable consulted by [`ClientConfig::from_env`].
pub const BASE_URL_ENV: &str = "KB_API_URL";

/// Process-wide configuration resolved once at client construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Prefix for relative request paths.
    pub base_url: String,
    /// Headers applied to every request; call-site headers override these.
    pub default_headers: HeaderMap,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_headers: HeaderMap::new(),
            user_agent: concat!("kb-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Read the base URL from `KB_API_URL`. Resolved here once, never
    /// re-read per request.
    pub fn from_env() -> Result<Self, KbError> {
        let base_url = std::env::var(BASE_URL_ENV)
            .map_err(|_| KbError::Configuration(format!("{BASE_URL_ENV} is not set")))?;
        Ok(Self::new(base_url))
    }

    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
