//! Interaction mode for the pump list view.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The exclusive interaction mode of the list view.
///
/// Exactly one mode is active at a time. Edit and Delete are mutually
/// exclusive and must be entered from `Normal`; entering or leaving
/// `Delete` always clears the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMode {
    /// Plain browsing; rows are inert.
    #[default]
    Normal,
    /// Row activation opens the device for editing.
    Edit,
    /// Row checkboxes are live and bulk delete is armed.
    Delete,
}

impl ListMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListMode::Normal => "normal",
            ListMode::Edit => "edit",
            ListMode::Delete => "delete",
        }
    }
}

impl fmt::Display for ListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
