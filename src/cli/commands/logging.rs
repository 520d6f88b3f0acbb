//! `-v` / `USER_CATALOG_LOG_LEVEL`: repeat the flag, or name the level in the
//! environment. Both resolve to the same count.

use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names indexed by verbosity count.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts a level name (any case) or its count, `0` (error) to `4` (trace).
///
/// # Errors
/// Returns a message naming the rejected value.
pub fn parse_level(level: &str) -> Result<u8, String> {
    let level = level.trim();

    if let Ok(count) = level.parse::<u8>() {
        if usize::from(count) < LEVELS.len() {
            return Ok(count);
        }
        return Err(format!("log level out of range: {count} (0-4)"));
    }

    LEVELS
        .iter()
        .position(|name| name.eq_ignore_ascii_case(level))
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("invalid log level: {level} (expected one of {})", LEVELS.join(", ")))
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log verbosity, repeat for more: -v warn, -vv info, -vvv debug, -vvvv trace")
            .env("USER_CATALOG_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(ValueParser::new(parse_level)),
    )
}
