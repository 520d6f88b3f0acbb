use crate::{
    cli::{globals::GlobalArgs, render},
    directory::UserDirectory,
    posts::PostQueryClient,
    session::CatalogSession,
};
use anyhow::{anyhow, Result};
use serde_json::json;
use tracing::instrument;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub id: u64,
    pub json: bool,
}

/// Execute the show action.
/// # Errors
/// Returns an error if the directory or the user's posts cannot be loaded, or
/// the user does not exist.
pub async fn execute(args: Args) -> Result<()> {
    let output = output(&args).await?;
    println!("{output}");
    Ok(())
}

#[instrument(skip_all, fields(user_id = args.id))]
async fn output(args: &Args) -> Result<String> {
    let config = args.globals.client_config()?;
    let directory = UserDirectory::from_config(&config)?;
    let client = PostQueryClient::from_config(&config)?;

    let mut session = CatalogSession::new();
    session.mount(&directory).await;

    if let Some(message) = session.catalog().error() {
        return Err(anyhow!("{message}"));
    }

    let ticket = session
        .select_by_id(args.id)
        .ok_or_else(|| anyhow!("User {} not found", args.id))?;

    session.fetch_posts(&client, ticket).await;

    if let Some(message) = session.posts().error() {
        return Err(anyhow!("{message}"));
    }

    let user = session
        .selection()
        .get()
        .ok_or_else(|| anyhow!("User {} not found", args.id))?;
    let posts = session.posts().posts();

    if args.json {
        Ok(serde_json::to_string_pretty(&json!({
            "user": user,
            "posts": posts,
        }))?)
    } else {
        Ok(format!(
            "{}\n\n{}",
            render::user_detail(user),
            render::post_list(posts)
        ))
    }
}
