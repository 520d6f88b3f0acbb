use crate::model::User;

/// The user currently selected in the list, if any. Owned by the session and
/// passed to whatever needs it; there is no global instance.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    selected: Option<User>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self) -> Option<&User> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<u64> {
        self.selected.as_ref().map(|user| user.id)
    }

    #[must_use]
    pub fn is_selected(&self, id: u64) -> bool {
        self.selected_id() == Some(id)
    }

    /// Replaces the selection; `None` clears it. Returns true if the selected
    /// id changed.
    pub fn select(&mut self, user: Option<User>) -> bool {
        let changed = self.selected_id() != user.as_ref().map(|u| u.id);
        self.selected = user;
        changed
    }
}
