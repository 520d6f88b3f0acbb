//! Endpoint configuration shared by the directory and post query clients.
//! Both endpoints are plain static strings; nothing here is secret.

use crate::APP_USER_AGENT;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_GRAPHQL_URL: &str = "https://graphqlzero.almansi.me/api";
/// Default request timeout applied to every call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: Url,
    pub graphql_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    /// # Errors
    /// Returns an error if either URL cannot be parsed.
    pub fn new(api_url: &str, graphql_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            api_url: Url::parse(api_url.trim())?,
            graphql_url: Url::parse(graphql_url.trim())?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: APP_USER_AGENT.to_string(),
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the reqwest client used by both endpoints.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn http_client(&self) -> Result<Client, reqwest::Error> {
        Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()
    }
}

/// Appends `path` to `base`, tolerating trailing and leading slashes.
///
/// # Errors
/// Returns an error if the joined URL is invalid.
pub fn endpoint_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let base = base.as_str().trim_end_matches('/');
    let path = path.trim().trim_start_matches('/');
    Url::parse(&format!("{base}/{path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() -> Result<(), url::ParseError> {
        let config = ClientConfig::new(DEFAULT_API_URL, DEFAULT_GRAPHQL_URL)?;
        assert_eq!(config.api_url.host_str(), Some("jsonplaceholder.typicode.com"));
        assert_eq!(config.graphql_url.path(), "/api");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.user_agent, APP_USER_AGENT);
        Ok(())
    }

    #[test]
    fn rejects_invalid_url() {
        assert!(ClientConfig::new("not a url", DEFAULT_GRAPHQL_URL).is_err());
    }

    #[test]
    fn endpoint_url_joins_paths() -> Result<(), url::ParseError> {
        let base = Url::parse("https://example.com")?;
        assert_eq!(endpoint_url(&base, "/users")?.as_str(), "https://example.com/users");

        let base = Url::parse("https://example.com/api/")?;
        assert_eq!(endpoint_url(&base, "users")?.as_str(), "https://example.com/api/users");
        Ok(())
    }

    #[test]
    fn with_timeout_overrides_default() -> Result<(), url::ParseError> {
        let config = ClientConfig::new(DEFAULT_API_URL, DEFAULT_GRAPHQL_URL)?
            .with_timeout(Duration::from_secs(2));
        assert_eq!(config.timeout, Duration::from_secs(2));
        Ok(())
    }
}
