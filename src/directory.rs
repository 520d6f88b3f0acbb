//! Client for the REST user directory (`GET {base}/users`).

use crate::{
    config::{endpoint_url, ClientConfig},
    error::FetchError,
    http::json_body,
    model::User,
    schema::validate_users,
};
use reqwest::Client;
use tracing::{debug, info_span, instrument, Instrument};
use url::Url;

#[derive(Clone, Debug)]
pub struct UserDirectory {
    client: Client,
    base_url: Url,
}

impl UserDirectory {
    #[must_use]
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(config.http_client()?, config.api_url.clone()))
    }

    /// Fetches the whole directory in one request, in the order the server sent it.
    ///
    /// # Errors
    /// Returns [`FetchError`] on transport failure, non-2xx status, a body that is
    /// not JSON, or a payload that fails user validation.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_all_users(&self) -> Result<Vec<User>, FetchError> {
        let url = endpoint_url(&self.base_url, "users")
            .map_err(|err| FetchError::Transport(format!("invalid directory URL: {err}")))?;

        let span = info_span!("directory.fetch_all_users", http.method = "GET", url = %url);
        let response = self.client.get(url).send().instrument(span).await?;

        let payload = json_body(response).await?;
        let users = validate_users(&payload)?;

        debug!(count = users.len(), "directory fetched");

        Ok(users)
    }
}
