//! Client for the GraphQL post service.
//!
//! The service nests posts under `data.user.posts.data` and sends every id as
//! text, with the owner id one level deeper (`user.id`). Entries are flattened
//! into `{id, title, body, userId}` with integer ids before they are validated.

use crate::{
    config::ClientConfig,
    error::FetchError,
    http::json_body,
    model::Post,
    schema::validate_posts,
};
use reqwest::Client;
use serde_json::{json, Map, Value};
use tracing::{debug, info_span, instrument, Instrument};
use url::Url;

/// Query document sent with every post request.
pub const GET_USER_POSTS_QUERY: &str = r"
  query GetUserPosts($userId: ID!) {
    user(id: $userId) {
      posts {
        data {
          id
          title
          body
          user {
            id
          }
        }
      }
    }
  }
";

#[derive(Clone, Debug)]
pub struct PostQueryClient {
    client: Client,
    endpoint: Url,
}

impl PostQueryClient {
    #[must_use]
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(config.http_client()?, config.graphql_url.clone()))
    }

    /// Fetches the posts of one user. A user without posts, or unknown to the
    /// service, yields an empty list.
    ///
    /// # Errors
    /// Returns [`FetchError`] on transport failure, non-2xx status, a body that is
    /// not JSON, query errors reported by the service, or posts that fail
    /// validation after normalization.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch_posts_for_user(&self, user_id: u64) -> Result<Vec<Post>, FetchError> {
        let body = json!({
            "query": GET_USER_POSTS_QUERY,
            "variables": { "userId": user_id.to_string() },
        });

        let span = info_span!(
            "posts.fetch_posts_for_user",
            http.method = "POST",
            url = %self.endpoint,
            user_id
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .instrument(span)
            .await?;

        let payload = json_body(response).await?;
        let posts = posts_from_response(&payload)?;

        debug!(count = posts.len(), "posts fetched");

        Ok(posts)
    }
}

/// Turns a decoded query response into validated posts.
///
/// # Errors
/// Returns [`FetchError::RemoteQuery`] when the response carries errors and
/// [`FetchError::Schema`] when a normalized entry is malformed.
pub fn posts_from_response(payload: &Value) -> Result<Vec<Post>, FetchError> {
    if let Some(message) = remote_errors(payload) {
        return Err(FetchError::RemoteQuery(message));
    }

    let normalized = match payload.pointer("/data/user/posts/data") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => Value::Array(entries.iter().map(normalize_post).collect()),
        // Let the validator report the wrong shape.
        Some(other) => other.clone(),
    };

    Ok(validate_posts(&normalized)?)
}

fn remote_errors(payload: &Value) -> Option<String> {
    match payload.get("errors")? {
        Value::Null => None,
        Value::Array(errors) if errors.is_empty() => None,
        Value::Array(errors) => Some(
            errors
                .iter()
                .map(|error| {
                    error
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error")
                })
                .collect::<Vec<_>>()
                .join("; "),
        ),
        _ => Some("unknown error".to_string()),
    }
}

fn normalize_post(entry: &Value) -> Value {
    let Some(object) = entry.as_object() else {
        return entry.clone();
    };

    let mut flat = Map::new();
    if let Some(id) = object.get("id") {
        flat.insert("id".to_string(), coerce_id(id));
    }
    for key in ["title", "body"] {
        if let Some(value) = object.get(key) {
            flat.insert(key.to_string(), value.clone());
        }
    }
    if let Some(owner) = object.get("user").and_then(|user| user.get("id")) {
        flat.insert("userId".to_string(), coerce_id(owner));
    }

    Value::Object(flat)
}

/// Textual ids become integers; anything else is left for the validator to reject.
fn coerce_id(value: &Value) -> Value {
    value
        .as_str()
        .and_then(|text| text.trim().parse::<u64>().ok())
        .map_or_else(|| value.clone(), Value::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn envelope(posts: Value) -> Value {
        json!({ "data": { "user": { "posts": { "data": posts } } } })
    }

    fn wire_post(id: &str, user_id: &str) -> Value {
        json!({
            "id": id,
            "title": format!("title {id}"),
            "body": format!("body {id}"),
            "user": { "id": user_id }
        })
    }

    #[test]
    fn normalizes_nested_text_ids() -> Result<()> {
        let posts = posts_from_response(&envelope(json!([wire_post("1", "3"), wire_post("2", "3")])))?;
        assert_eq!(
            posts,
            vec![
                Post {
                    id: 1,
                    title: "title 1".to_string(),
                    body: "body 1".to_string(),
                    user_id: 3
                },
                Post {
                    id: 2,
                    title: "title 2".to_string(),
                    body: "body 2".to_string(),
                    user_id: 3
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn empty_posts_is_empty_sequence() -> Result<()> {
        assert!(posts_from_response(&envelope(json!([])))?.is_empty());
        Ok(())
    }

    #[test]
    fn missing_user_is_empty_sequence() -> Result<()> {
        assert!(posts_from_response(&json!({ "data": { "user": null } }))?.is_empty());
        assert!(posts_from_response(&json!({ "data": {} }))?.is_empty());
        assert!(posts_from_response(&json!({}))?.is_empty());
        Ok(())
    }

    #[test]
    fn errors_become_remote_query() {
        let err = posts_from_response(&json!({ "errors": [{ "message": "X", "path": ["user"] }] })).err();
        assert!(matches!(err, Some(FetchError::RemoteQuery(ref m)) if m == "X"));
    }

    #[test]
    fn multiple_errors_are_joined() {
        let err = posts_from_response(&json!({
            "data": null,
            "errors": [{ "message": "first" }, { "extensions": {} }]
        }))
        .err();
        assert!(matches!(err, Some(FetchError::RemoteQuery(ref m)) if m == "first; unknown error"));
    }

    #[test]
    fn empty_errors_array_is_ignored() -> Result<()> {
        let mut payload = envelope(json!([wire_post("5", "1")]));
        payload["errors"] = json!([]);
        assert_eq!(posts_from_response(&payload)?.len(), 1);
        Ok(())
    }

    #[test]
    fn unparseable_id_is_schema_error() {
        let err = posts_from_response(&envelope(json!([wire_post("abc", "1")]))).err();
        match err {
            Some(FetchError::Schema(validation)) => {
                assert_eq!(validation.violations().len(), 1);
                assert_eq!(validation.violations()[0].path(), "[0].id");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_owner_is_schema_error() {
        let mut entry = wire_post("1", "1");
        if let Some(object) = entry.as_object_mut() {
            object.remove("user");
        }
        let err = posts_from_response(&envelope(json!([entry]))).err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("schema validation failed: [0].userId: missing field".to_string())
        );
    }

    #[test]
    fn integer_ids_are_accepted() -> Result<()> {
        let posts = posts_from_response(&envelope(json!([
            { "id": 9, "title": "t", "body": "b", "user": { "id": 4 } }
        ])))?;
        assert_eq!(posts[0].id, 9);
        assert_eq!(posts[0].user_id, 4);
        Ok(())
    }

    #[tokio::test]
    async fn sends_query_with_string_user_id() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "query": GET_USER_POSTS_QUERY,
                "variables": { "userId": "7" }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope(json!([wire_post("70", "7")]))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = PostQueryClient::new(Client::new(), Url::parse(&format!("{}/api", server.uri()))?);
        let posts = client.fetch_posts_for_user(7).await?;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 70);
        assert_eq!(posts[0].user_id, 7);
        Ok(())
    }

    #[tokio::test]
    async fn remote_errors_over_http_success() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{ "message": "X" }]
            })))
            .mount(&server)
            .await;

        let client = PostQueryClient::new(Client::new(), Url::parse(&server.uri())?);
        let err = client
            .fetch_posts_for_user(1)
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;
        assert!(matches!(err, FetchError::RemoteQuery(ref m) if m == "X"));
        Ok(())
    }

    #[tokio::test]
    async fn server_error_is_http_status() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = PostQueryClient::new(Client::new(), Url::parse(&server.uri())?);
        let err = client
            .fetch_posts_for_user(1)
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;
        assert!(matches!(err, FetchError::HttpStatus(500)));
        Ok(())
    }

    #[tokio::test]
    async fn non_json_body_is_decode_error() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>upstream error</html>"))
            .mount(&server)
            .await;

        let client = PostQueryClient::new(Client::new(), Url::parse(&server.uri())?);
        let err = client
            .fetch_posts_for_user(1)
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;
        assert!(matches!(err, FetchError::Decode(_)));
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        // Bind then drop to get a port nobody listens on.
        let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
        let client = PostQueryClient::new(
            Client::new(),
            Url::parse(&format!("http://127.0.0.1:{port}/graphql"))?,
        );

        let err = client
            .fetch_posts_for_user(1)
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;
        assert!(matches!(err, FetchError::Transport(_)));
        Ok(())
    }
}
