//! Staged vs. committed search text with a modal commit protocol.

use serde::{Deserialize, Serialize};

/// Search text for the pump list.
///
/// `query` is the committed value the active list query is built from.
/// `draft` is the text staged inside the search modal; it reaches `query`
/// only through [`SearchState::submit`]. Committing (submit or clear)
/// obligates the caller to reset pagination to the first page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    query: String,
    draft: String,
    modal_open: bool,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the modal with the committed query staged as the draft.
    pub fn open_modal(&mut self) {
        self.draft = self.query.clone();
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    /// Replaces the draft while the modal is open.
    pub fn stage(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Commits `query` (trimmed) and closes the modal.
    pub fn submit(&mut self, query: &str) {
        self.query = query.trim().to_string();
        self.draft = self.query.clone();
        self.modal_open = false;
    }

    /// Closes the modal, discarding the draft. The committed query is
    /// untouched.
    pub fn cancel(&mut self) {
        self.draft = self.query.clone();
        self.modal_open = false;
    }

    /// Commits the empty query.
    pub fn clear(&mut self) {
        self.query.clear();
        self.draft.clear();
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }
}
