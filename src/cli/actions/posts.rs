use crate::{
    catalog::PostsPanel,
    cli::{globals::GlobalArgs, render},
    posts::PostQueryClient,
};
use anyhow::{anyhow, Result};
use tracing::instrument;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub id: u64,
    pub json: bool,
}

/// Execute the posts action.
/// # Errors
/// Returns an error if the posts cannot be loaded.
pub async fn execute(args: Args) -> Result<()> {
    let output = output(&args).await?;
    println!("{output}");
    Ok(())
}

#[instrument(skip_all, fields(user_id = args.id))]
async fn output(args: &Args) -> Result<String> {
    let config = args.globals.client_config()?;
    let client = PostQueryClient::from_config(&config)?;

    let mut panel = PostsPanel::new();
    panel.load(&client, args.id).await;

    if let Some(message) = panel.error() {
        return Err(anyhow!("{message}"));
    }

    if args.json {
        Ok(serde_json::to_string_pretty(panel.posts())?)
    } else {
        Ok(render::post_list(panel.posts()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn args(server: &MockServer, json: bool) -> Args {
        Args {
            globals: GlobalArgs::new(server.uri(), format!("{}/graphql", server.uri()), 5),
            id: 4,
            json,
        }
    }

    #[tokio::test]
    async fn empty_posts_message() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "user": { "posts": { "data": [] } } }
            })))
            .mount(&server)
            .await;

        assert_eq!(output(&args(&server, false)).await?, "This user has no posts");
        Ok(())
    }

    #[tokio::test]
    async fn posts_as_json_use_flat_shape() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "user": { "posts": { "data": [
                    { "id": "31", "title": "t", "body": "b", "user": { "id": "4" } }
                ] } } }
            })))
            .mount(&server)
            .await;

        let value: Value = serde_json::from_str(&output(&args(&server, true)).await?)?;
        assert_eq!(value, json!([{ "id": 31, "title": "t", "body": "b", "userId": 4 }]));
        Ok(())
    }

    #[tokio::test]
    async fn http_failure_is_an_error() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = output(&args(&server, false)).await.err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("Error loading posts: Request failed (401).".to_string())
        );
        Ok(())
    }
}
