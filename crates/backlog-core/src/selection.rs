//! Multi-selection state.
//!
//! A set of identifiers chosen for a bulk action. Membership is independent of
//! list order and of whatever filter is currently hiding items, so an id can
//! stay selected while it is not visible.

use std::collections::HashSet;
use std::hash::Hash;

#[derive(Clone, Debug)]
pub struct SelectionSet<T> {
    selected: HashSet<T>,
}

impl<T> SelectionSet<T>
where
    T: Eq + Hash + Clone + Ord,
{
    /// Create an empty selection.
    pub fn new() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }

    /// Add the id if absent, remove it if present. Returns whether the id is
    /// selected afterwards.
    pub fn toggle(&mut self, id: T) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Add every id from the iterator.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = T>) {
        self.selected.extend(ids);
    }

    /// Remove the id if present.
    pub fn remove(&mut self, id: &T) -> bool {
        self.selected.remove(id)
    }

    /// Empty the selection unconditionally.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, id: &T) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in sorted order, so requests built from them are stable.
    pub fn ids(&self) -> Vec<T> {
        let mut ids: Vec<T> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }
}

impl<T> Default for SelectionSet<T>
where
    T: Eq + Hash + Clone + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_selection_is_empty() {
        let selection: SelectionSet<String> = SelectionSet::new();
        assert!(selection.is_empty());
        assert_eq!(selection.len(), 0);
        assert!(selection.ids().is_empty());
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut selection = SelectionSet::new();
        assert!(selection.toggle("a"));
        assert!(selection.contains(&"a"));
        assert!(!selection.toggle("a"));
        assert!(!selection.contains(&"a"));
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut selection = SelectionSet::new();
        selection.toggle(1);
        selection.toggle(2);
        let before = selection.ids();

        selection.toggle(3);
        selection.toggle(3);
        assert_eq!(selection.ids(), before);

        selection.toggle(1);
        selection.toggle(1);
        assert_eq!(selection.ids(), before);
    }

    #[test]
    fn test_clear() {
        let mut selection = SelectionSet::new();
        selection.select_all(["b", "a", "c"]);
        assert_eq!(selection.len(), 3);
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_ids_are_sorted() {
        let mut selection = SelectionSet::new();
        selection.select_all(["c", "a", "b"]);
        assert_eq!(selection.ids(), vec!["a", "b", "c"]);
    }
}
