use crate::cli::{
    actions::{posts, show, users, Action},
    commands::{ARG_API_URL, ARG_GRAPHQL_URL, ARG_ID, ARG_JSON, ARG_SEARCH, ARG_TIMEOUT},
    globals::GlobalArgs,
};
use crate::config::DEFAULT_TIMEOUT_SECS;
use anyhow::{bail, Context, Result};

/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let globals = GlobalArgs::new(
        matches
            .get_one::<String>(ARG_API_URL)
            .cloned()
            .context("missing required argument: --api-url")?,
        matches
            .get_one::<String>(ARG_GRAPHQL_URL)
            .cloned()
            .context("missing required argument: --graphql-url")?,
        matches
            .get_one::<u64>(ARG_TIMEOUT)
            .copied()
            .unwrap_or(DEFAULT_TIMEOUT_SECS),
    );

    let id = |sub: &clap::ArgMatches| -> Result<u64> {
        sub.get_one::<u64>(ARG_ID)
            .copied()
            .context("missing required argument: <id>")
    };

    match matches.subcommand() {
        Some(("users", sub)) => Ok(Action::Users(users::Args {
            globals,
            search: sub.get_one::<String>(ARG_SEARCH).cloned(),
            json: sub.get_flag(ARG_JSON),
        })),
        Some(("show", sub)) => Ok(Action::Show(show::Args {
            globals,
            id: id(sub)?,
            json: sub.get_flag(ARG_JSON),
        })),
        Some(("posts", sub)) => Ok(Action::Posts(posts::Args {
            globals,
            id: id(sub)?,
            json: sub.get_flag(ARG_JSON),
        })),
        Some((name, _)) => bail!("unknown subcommand: {name}"),
        None => bail!("missing subcommand"),
    }
}
