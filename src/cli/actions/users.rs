use crate::{
    cli::{globals::GlobalArgs, render},
    directory::UserDirectory,
    session::CatalogSession,
};
use anyhow::{anyhow, Result};
use tracing::instrument;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub search: Option<String>,
    pub json: bool,
}

/// Execute the users action.
/// # Errors
/// Returns an error if the directory cannot be loaded.
pub async fn execute(args: Args) -> Result<()> {
    let output = output(&args).await?;
    println!("{output}");
    Ok(())
}

#[instrument(skip_all, fields(search = ?args.search))]
async fn output(args: &Args) -> Result<String> {
    let config = args.globals.client_config()?;
    let directory = UserDirectory::from_config(&config)?;

    let mut session = CatalogSession::new();
    session.mount(&directory).await;

    if let Some(message) = session.catalog().error() {
        return Err(anyhow!("{message}"));
    }

    session.set_search_term(args.search.clone().unwrap_or_default());
    let users = session.visible_users();

    if args.json {
        Ok(serde_json::to_string_pretty(users)?)
    } else {
        Ok(render::user_list(users))
    }
}
