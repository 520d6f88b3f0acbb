//! Directory lifecycle and the derived, name-filtered view.
//!
//! The directory is fetched exactly once per catalog. While the fetch is in
//! flight the catalog reports loading with no data; afterwards it holds either
//! the full ordered collection or a user-facing error message.

mod posts_panel;

pub use self::posts_panel::{PostTicket, PostsPanel, PostsState};

use crate::{directory::UserDirectory, error::FetchError, model::User};
use tracing::{debug, error, instrument};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<User>),
    Failed(String),
}

/// Case-insensitive substring match of `term` against each user's name.
/// A blank term keeps every user. Otherwise the term is matched as given,
/// surrounding whitespace included. Order is preserved.
#[must_use]
pub fn filter_by_name(users: &[User], term: &str) -> Vec<User> {
    if term.trim().is_empty() {
        return users.to_vec();
    }

    let needle = term.to_lowercase();
    users
        .iter()
        .filter(|user| user.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[derive(Debug)]
struct FilterMemo {
    generation: u64,
    term: String,
    users: Vec<User>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    state: LoadState,
    // Bumped whenever the collection is replaced.
    generation: u64,
    memo: Option<FilterMemo>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// The full collection; empty unless loaded.
    #[must_use]
    pub fn users(&self) -> &[User] {
        match &self.state {
            LoadState::Loaded(users) => users,
            _ => &[],
        }
    }

    #[must_use]
    pub fn find(&self, id: u64) -> Option<&User> {
        self.users().iter().find(|user| user.id == id)
    }

    /// Moves `Idle → Loading`. Returns false if a load already started, so the
    /// directory is fetched only once.
    pub fn begin_load(&mut self) -> bool {
        if self.state != LoadState::Idle {
            debug!("directory load already started");
            return false;
        }
        self.state = LoadState::Loading;
        true
    }

    /// Settles the pending load with the fetch outcome.
    pub fn finish_load(&mut self, result: Result<Vec<User>, FetchError>) {
        self.state = match result {
            Ok(users) => {
                debug!(count = users.len(), "directory loaded");
                LoadState::Loaded(users)
            }
            Err(err) => {
                error!("Error fetching users: {err}");
                LoadState::Failed(format!("Error loading users: {}", err.user_message()))
            }
        };
        self.generation += 1;
        self.memo = None;
    }

    /// Runs the one-shot directory fetch. Does nothing if a load already started.
    #[instrument(skip_all)]
    pub async fn load(&mut self, directory: &UserDirectory) {
        if !self.begin_load() {
            return;
        }
        let result = directory.fetch_all_users().await;
        self.finish_load(result);
    }

    /// Users whose name contains `term`, recomputed only when the collection or
    /// the term changed since the previous call.
    pub fn compute_filtered(&mut self, term: &str) -> &[User] {
        let fresh = self
            .memo
            .as_ref()
            .is_some_and(|memo| memo.generation == self.generation && memo.term == term);

        if !fresh {
            let users = filter_by_name(self.users(), term);
            self.memo = Some(FilterMemo {
                generation: self.generation,
                term: term.to_string(),
                users,
            });
        }

        match &self.memo {
            Some(memo) => &memo.users,
            None => &[],
        }
    }
}
