//! Configuration management for Rostrum
//!
//! Handles API keys and endpoint settings. Credentials are resolved into a
//! [`Connection`] that is handed to each provider explicitly.

use std::env;
use std::fmt;

use crate::catalog::Endpoint;

/// Default OpenAI base URL
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Default TogetherAI base URL
pub const TOGETHER_BASE_URL: &str = "https://api.together.xyz/v1";

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A resolved endpoint plus the key used to call it
#[derive(Clone, PartialEq, Eq)]
pub struct Connection {
    /// Base URL including the API version segment
    pub base_url: String,
    /// Bearer token
    pub api_key: String,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// API keys and endpoint overrides for every provider in the catalog
#[derive(Clone)]
pub struct Credentials {
    /// OpenAI API key (env: OPENAI_API_KEY)
    pub openai_api_key: Option<String>,
    /// TogetherAI API key (env: TOGETHER_API_KEY)
    pub together_api_key: Option<String>,
    /// OpenAI base URL (env: ROSTRUM_OPENAI_BASE_URL)
    pub openai_base_url: String,
    /// TogetherAI base URL (env: ROSTRUM_TOGETHER_BASE_URL)
    pub together_base_url: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("together_api_key", &self.together_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_base_url", &self.openai_base_url)
            .field("together_base_url", &self.together_base_url)
            .finish()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            together_api_key: None,
            openai_base_url: OPENAI_BASE_URL.to_string(),
            together_base_url: TOGETHER_BASE_URL.to_string(),
        }
    }
}

/// Blank values (e.g. an empty password field) count as unset
fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

impl Credentials {
    /// Load credentials from environment variables
    pub fn from_env() -> Self {
        Self {
            openai_api_key: non_empty(env::var("OPENAI_API_KEY").ok()),
            together_api_key: non_empty(env::var("TOGETHER_API_KEY").ok()),
            openai_base_url: non_empty(env::var("ROSTRUM_OPENAI_BASE_URL").ok())
                .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
            together_base_url: non_empty(env::var("ROSTRUM_TOGETHER_BASE_URL").ok())
                .unwrap_or_else(|| TOGETHER_BASE_URL.to_string()),
        }
    }

    /// Override the OpenAI key (blank values are ignored)
    pub fn with_openai_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = non_empty(key) {
            self.openai_api_key = Some(key);
        }
        self
    }

    /// Override the TogetherAI key (blank values are ignored)
    pub fn with_together_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = non_empty(key) {
            self.together_api_key = Some(key);
        }
        self
    }

    /// Check if an endpoint has a usable key
    pub fn is_configured(&self, endpoint: Endpoint) -> bool {
        self.connection(endpoint).is_ok()
    }

    /// Resolve the connection for an endpoint
    pub fn connection(&self, endpoint: Endpoint) -> Result<Connection, ConfigError> {
        let (base_url, key, var) = match endpoint {
            Endpoint::OpenAI => (&self.openai_base_url, &self.openai_api_key, "OPENAI_API_KEY"),
            Endpoint::Together => (
                &self.together_base_url,
                &self.together_api_key,
                "TOGETHER_API_KEY",
            ),
        };

        if base_url.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "empty base URL for {}",
                endpoint
            )));
        }

        let api_key = key
            .clone()
            .ok_or_else(|| ConfigError::MissingCredential(format!("{} ({})", endpoint, var)))?;

        Ok(Connection {
            base_url: base_url.clone(),
            api_key,
        })
    }

    /// List endpoints with credentials
    pub fn available_endpoints(&self) -> Vec<Endpoint> {
        Endpoint::ALL
            .into_iter()
            .filter(|e| self.is_configured(*e))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_credentials() {
        let creds = Credentials::default();
        assert_eq!(creds.openai_base_url, OPENAI_BASE_URL);
        assert!(creds.available_endpoints().is_empty());
        assert!(matches!(
            creds.connection(Endpoint::OpenAI),
            Err(ConfigError::MissingCredential(_))
        ));
    }

    #[test]
    fn test_connection_resolution() {
        let creds = Credentials::default()
            .with_openai_key(Some("sk-openai".to_string()))
            .with_together_key(Some("   ".to_string()));

        let conn = creds.connection(Endpoint::OpenAI).unwrap();
        assert_eq!(conn.base_url, OPENAI_BASE_URL);
        assert_eq!(conn.api_key, "sk-openai");

        assert!(!creds.is_configured(Endpoint::Together));
        assert_eq!(creds.available_endpoints(), vec![Endpoint::OpenAI]);
    }

    #[test]
    fn test_debug_redacts_keys() {
        let creds = Credentials::default().with_together_key(Some("secret-key".to_string()));
        let conn = creds.connection(Endpoint::Together).unwrap();
        assert!(!format!("{:?}", creds).contains("secret-key"));
        assert!(!format!("{:?}", conn).contains("secret-key"));
    }
}
