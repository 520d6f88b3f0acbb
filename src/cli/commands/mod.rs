pub mod logging;

use crate::config::{DEFAULT_API_URL, DEFAULT_GRAPHQL_URL};
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_GRAPHQL_URL: &str = "graphql-url";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_ID: &str = "id";
pub const ARG_SEARCH: &str = "search";
pub const ARG_JSON: &str = "json";

fn json_arg() -> Arg {
    Arg::new(ARG_JSON)
        .long("json")
        .help("Print JSON instead of text")
        .action(ArgAction::SetTrue)
}

fn id_arg() -> Arg {
    Arg::new(ARG_ID)
        .help("User id")
        .required(true)
        .value_parser(clap::value_parser!(u64))
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("user-catalog")
        .about("Browse a user directory and the posts of each user")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the REST user directory")
                .default_value(DEFAULT_API_URL)
                .env("USER_CATALOG_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_GRAPHQL_URL)
                .long("graphql-url")
                .help("GraphQL endpoint serving user posts")
                .default_value(DEFAULT_GRAPHQL_URL)
                .env("USER_CATALOG_GRAPHQL_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .short('t')
                .long("timeout")
                .help("Request timeout in seconds")
                .default_value("10")
                .env("USER_CATALOG_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .subcommand(
            Command::new("users")
                .about("List users, optionally filtered by name")
                .arg(
                    Arg::new(ARG_SEARCH)
                        .short('s')
                        .long("search")
                        .help("Case-insensitive name filter"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("show")
                .about("Show a user's details and posts")
                .arg(id_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("posts")
                .about("List the posts of a user")
                .arg(id_arg())
                .arg(json_arg()),
        );

    logging::with_args(command)
}
