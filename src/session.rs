//! Explicit browsing context: the catalog, the search term, the selection, and
//! the post panel of the selected user. A view layer owns one session and
//! threads it through its handlers.

use crate::{
    catalog::{Catalog, PostTicket, PostsPanel},
    directory::UserDirectory,
    error::FetchError,
    model::{Post, User},
    posts::PostQueryClient,
    selection::Selection,
};
use tracing::debug;

#[derive(Debug, Default)]
pub struct CatalogSession {
    catalog: Catalog,
    search_term: String,
    selection: Selection,
    posts: PostsPanel,
}

impl CatalogSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the directory. Only the first call per session has any effect.
    pub async fn mount(&mut self, directory: &UserDirectory) {
        self.catalog.load(directory).await;
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn posts(&self) -> &PostsPanel {
        &self.posts
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Users matching the current search term.
    pub fn visible_users(&mut self) -> &[User] {
        self.catalog.compute_filtered(&self.search_term)
    }

    /// Changes the selection. When the selected id changes to a user, the old
    /// posts are discarded and a ticket for the new user's posts is returned;
    /// clearing the selection empties the post panel.
    pub fn select(&mut self, user: Option<User>) -> Option<PostTicket> {
        if !self.selection.select(user) {
            return None;
        }

        if let Some(id) = self.selection.selected_id() {
            debug!(user_id = id, "user selected");
            Some(self.posts.request(id))
        } else {
            debug!("selection cleared");
            self.posts.clear();
            None
        }
    }

    /// Selects a loaded user by id. Unknown ids leave the selection unchanged.
    pub fn select_by_id(&mut self, id: u64) -> Option<PostTicket> {
        let user = self.catalog.find(id).cloned()?;
        self.select(Some(user))
    }

    /// Applies a post fetch result; stale tickets are ignored.
    pub fn complete_posts(&mut self, ticket: PostTicket, result: Result<Vec<Post>, FetchError>) -> bool {
        self.posts.complete(ticket, result)
    }

    /// Fetches the posts for a ticket handed out by [`Self::select`] and applies
    /// them. Returns false if the ticket was superseded while the request ran.
    pub async fn fetch_posts(&mut self, client: &PostQueryClient, ticket: PostTicket) -> bool {
        let result = client.fetch_posts_for_user(ticket.user_id()).await;
        self.posts.complete(ticket, result)
    }

    /// Starts a new post request for the selected user, if any, superseding
    /// any outstanding ticket. Use it to reload; after a selection change
    /// pass the returned ticket to [`Self::fetch_posts`] instead.
    pub async fn refresh_posts(&mut self, client: &PostQueryClient) {
        if let Some(id) = self.selection.selected_id() {
            self.posts.load(client, id).await;
        }
    }
}
