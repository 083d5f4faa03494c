//! Keyed multi-selection over the currently visible rows.

use std::collections::BTreeSet;
use std::fmt;

/// Selection of items keyed by a caller-supplied extractor.
///
/// The set only ever holds keys of rows the user could see when they
/// selected them; page, size, and dataset changes are expected to call
/// [`Selection::clear`]. Keys are kept ordered so enumeration is
/// deterministic.
pub struct Selection<T> {
    keys: BTreeSet<String>,
    key_of: Box<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T> fmt::Debug for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection").field("keys", &self.keys).finish()
    }
}

impl<T: ToString> Default for Selection<T> {
    /// Keys items by their `ToString` form.
    fn default() -> Self {
        Self::new(|item: &T| item.to_string())
    }
}

impl<T> Selection<T> {
    pub fn new(key_of: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self {
            keys: BTreeSet::new(),
            key_of: Box::new(key_of),
        }
    }

    pub fn key_of(&self, item: &T) -> String {
        (self.key_of)(item)
    }

    pub fn select(&mut self, item: &T) {
        self.keys.insert(self.key_of(item));
    }

    pub fn deselect(&mut self, item: &T) {
        let key = self.key_of(item);
        self.keys.remove(&key);
    }

    pub fn toggle(&mut self, item: &T) {
        let key = self.key_of(item);
        if !self.keys.remove(&key) {
            self.keys.insert(key);
        }
    }

    pub fn is_selected(&self, item: &T) -> bool {
        self.keys.contains(&self.key_of(item))
    }

    /// Replaces the selection with exactly the keys of `items`.
    pub fn select_all(&mut self, items: &[T]) {
        self.keys = items.iter().map(|item| self.key_of(item)).collect();
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Backs a tri-state "select all" control: `checked` selects every
    /// item, unchecked clears the selection.
    pub fn handle_select_all(&mut self, checked: bool, items: &[T]) {
        if checked {
            self.select_all(items);
        } else {
            self.clear();
        }
    }

    /// True when every one of `items` is selected and there is at least one.
    pub fn is_all_selected(&self, items: &[T]) -> bool {
        !items.is_empty() && self.keys.len() == items.len()
    }

    /// True when some but not all of `items` are selected.
    pub fn is_indeterminate(&self, items: &[T]) -> bool {
        !self.keys.is_empty() && self.keys.len() < items.len()
    }

    /// Direct key replacement, for syncing from an external source.
    pub fn set_selected_keys(&mut self, keys: impl IntoIterator<Item = String>) {
        self.keys = keys.into_iter().collect();
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }
}
