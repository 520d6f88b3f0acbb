//! Post state for the currently selected user.
//!
//! Every request hands out a [`PostTicket`] tagged with the user id and a
//! request generation. Only the ticket of the latest request may settle the
//! panel; results carried by older tickets are dropped.

use crate::{error::FetchError, model::Post, posts::PostQueryClient};
use tracing::{debug, error};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PostTicket {
    user_id: u64,
    generation: u64,
}

impl PostTicket {
    #[must_use]
    pub fn user_id(&self) -> u64 {
        self.user_id
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PostsState {
    #[default]
    Empty,
    Loading {
        user_id: u64,
    },
    Loaded {
        user_id: u64,
        posts: Vec<Post>,
    },
    Failed {
        user_id: u64,
        message: String,
    },
}

#[derive(Debug, Default)]
pub struct PostsPanel {
    state: PostsState,
    generation: u64,
}

impl PostsPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &PostsState {
        &self.state
    }

    /// User the panel currently belongs to, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<u64> {
        match self.state {
            PostsState::Empty => None,
            PostsState::Loading { user_id }
            | PostsState::Loaded { user_id, .. }
            | PostsState::Failed { user_id, .. } => Some(user_id),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, PostsState::Loading { .. })
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        match &self.state {
            PostsState::Loaded { posts, .. } => posts,
            _ => &[],
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            PostsState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Starts a request for `user_id`, discarding whatever the panel held.
    pub fn request(&mut self, user_id: u64) -> PostTicket {
        self.generation += 1;
        self.state = PostsState::Loading { user_id };
        PostTicket {
            user_id,
            generation: self.generation,
        }
    }

    /// Empties the panel and invalidates any outstanding ticket.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.state = PostsState::Empty;
    }

    #[must_use]
    pub fn is_current(&self, ticket: PostTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Applies a fetch result. Returns false, leaving the panel untouched, when
    /// the ticket was superseded by a later request or a clear.
    pub fn complete(&mut self, ticket: PostTicket, result: Result<Vec<Post>, FetchError>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                user_id = ticket.user_id,
                current = ?self.user_id(),
                "dropping stale posts response"
            );
            return false;
        }

        let user_id = ticket.user_id;
        self.state = match result {
            Ok(posts) => PostsState::Loaded { user_id, posts },
            Err(err) => {
                error!(user_id, "Error fetching user posts: {err}");
                PostsState::Failed {
                    user_id,
                    message: format!("Error loading posts: {}", err.user_message()),
                }
            }
        };
        true
    }

    /// Requests, fetches, and applies the posts of `user_id`.
    pub async fn load(&mut self, client: &PostQueryClient, user_id: u64) {
        let ticket = self.request(user_id);
        let result = client.fetch_posts_for_user(user_id).await;
        self.complete(ticket, result);
    }
}
