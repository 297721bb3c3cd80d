//! Focus and selection list primitives
//!
//! Every list-backed screen is built on these two types:
//!
//! - [`SelectionList`] tracks a single focused position with cyclic
//!   navigation. Menus, enum pickers and form field focus all use it.
//! - [`MultiSelectionList`] adds an independent set of toggled indices for
//!   batch actions. When nothing is toggled, actions apply to the focused
//!   item; otherwise they apply to the whole selection
//!   (see [`MultiSelectionList::action_targets`]).
//!
//! Focus is always a valid index or the list is empty. Replacing the items
//! of a multi-selection list clears the selection, so stale indices never
//! survive a reload.

use std::collections::BTreeSet;

/// Ordered items with one focused position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionList<T> {
    items: Vec<T>,
    focus: usize,
}

impl<T> Default for SelectionList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            focus: 0,
        }
    }
}

impl<T> SelectionList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, focus: 0 }
    }

    /// Moves focus forward, wrapping to the first item
    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.focus = (self.focus + 1) % self.items.len();
        }
    }

    /// Moves focus backward, wrapping to the last item
    pub fn prev(&mut self) {
        if !self.items.is_empty() {
            self.focus = (self.focus + self.items.len() - 1) % self.items.len();
        }
    }

    /// The focused item, or `None` on an empty list
    pub fn focused(&self) -> Option<&T> {
        self.items.get(self.focus)
    }

    pub fn focused_index(&self) -> usize {
        self.focus
    }

    pub fn focus_first(&mut self) {
        self.focus = 0;
    }

    /// Replaces the items, clamping focus into the new range
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.focus = self.focus.min(self.items.len().saturating_sub(1));
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates items paired with whether each one is focused
    pub fn iter(&self) -> impl Iterator<Item = (&T, bool)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (item, i == self.focus))
    }
}

impl<T: PartialEq> SelectionList<T> {
    /// Focuses the first item equal to `item`; returns false if absent
    pub fn focus(&mut self, item: &T) -> bool {
        match self.items.iter().position(|candidate| candidate == item) {
            Some(position) => {
                self.focus = position;
                true
            }
            None => false,
        }
    }
}

impl<T> FromIterator<T> for SelectionList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A [`SelectionList`] with an independent set of toggled indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelectionList<T> {
    list: SelectionList<T>,
    selected: BTreeSet<usize>,
}

impl<T> Default for MultiSelectionList<T> {
    fn default() -> Self {
        Self {
            list: SelectionList::default(),
            selected: BTreeSet::new(),
        }
    }
}

impl<T> MultiSelectionList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            list: SelectionList::new(items),
            selected: BTreeSet::new(),
        }
    }

    pub fn next(&mut self) {
        self.list.next();
    }

    pub fn prev(&mut self) {
        self.list.prev();
    }

    pub fn focused(&self) -> Option<&T> {
        self.list.focused()
    }

    pub fn focused_index(&self) -> usize {
        self.list.focused_index()
    }

    pub fn focus_first(&mut self) {
        self.list.focus_first();
    }

    /// Replaces the items, clearing the selection and resetting focus to 0
    pub fn set_items(&mut self, items: Vec<T>) {
        self.list = SelectionList::new(items);
        self.selected.clear();
    }

    /// Flips selection of the focused index. No-op on an empty list.
    pub fn toggle(&mut self) {
        if self.list.is_empty() {
            return;
        }
        let index = self.list.focused_index();
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    pub fn none_selected(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Selected indices in ascending order
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    /// Selected items in ascending index order
    pub fn selected_items(&self) -> Vec<&T> {
        self.selected
            .iter()
            .filter_map(|&i| self.list.items().get(i))
            .collect()
    }

    /// Items a batch action applies to: the selection, or the focused item
    /// when nothing is selected. Empty only when the list is.
    pub fn action_targets(&self) -> Vec<&T> {
        if self.none_selected() {
            self.focused().into_iter().collect()
        } else {
            self.selected_items()
        }
    }

    pub fn items(&self) -> &[T] {
        self.list.items()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Iterates `(item, focused, selected)` triples
    pub fn iter(&self) -> impl Iterator<Item = (&T, bool, bool)> {
        self.list
            .iter()
            .enumerate()
            .map(|(i, (item, focused))| (item, focused, self.selected.contains(&i)))
    }
}
