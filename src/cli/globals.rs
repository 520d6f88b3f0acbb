use crate::config::ClientConfig;
use anyhow::{Context, Result};
use std::time::Duration;

/// Arguments shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub graphql_url: String,
    pub timeout_secs: u64,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, graphql_url: String, timeout_secs: u64) -> Self {
        Self {
            api_url,
            graphql_url,
            timeout_secs,
        }
    }

    /// # Errors
    /// Returns an error if either endpoint is not a valid URL.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let config = ClientConfig::new(&self.api_url, &self.graphql_url)
            .with_context(|| format!("invalid endpoint URL: {} / {}", self.api_url, self.graphql_url))?;
        Ok(config.with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() -> Result<()> {
        let args = GlobalArgs::new(
            "http://localhost:3000".to_string(),
            "http://localhost:4000/graphql".to_string(),
            5,
        );
        let config = args.client_config()?;
        assert_eq!(config.api_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.graphql_url.path(), "/graphql");
        assert_eq!(config.timeout, Duration::from_secs(5));
        Ok(())
    }

    #[test]
    fn test_invalid_url() {
        let args = GlobalArgs::new("nope".to_string(), "http://localhost".to_string(), 5);
        let err = args.client_config().err();
        assert!(err.is_some_and(|e| e.to_string().contains("invalid endpoint URL")));
    }
}
