use crate::cli::actions::{posts, show, users, Action};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Users(args) => users::execute(args).await,
        Action::Show(args) => show::execute(args).await,
        Action::Posts(args) => posts::execute(args).await,
    }
}
