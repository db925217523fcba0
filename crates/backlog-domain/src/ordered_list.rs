//! The canonical ordered sequence of backlog items.
//!
//! Order is significant and is the only notion of position: an item's
//! position is its index here. Two kinds of mutation exist. [`replace`]
//! swaps the whole sequence for a freshly loaded one and [`move_index`]
//! performs a single order-preserving move. Nothing merges partial server data
//! into an existing list.
//!
//! [`replace`]: OrderedItemList::replace
//! [`move_index`]: OrderedItemList::move_index

use std::collections::HashSet;

use crate::api::ItemPosition;
use crate::item::{BacklogItem, ItemId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedItemList {
    items: Vec<BacklogItem>,
}

impl OrderedItemList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a server listing. Repeated ids keep their first occurrence.
    pub fn from_items(items: Vec<BacklogItem>) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        let mut unique = Vec::with_capacity(items.len());
        for item in items {
            if seen.insert(item.id.clone()) {
                unique.push(item);
            } else {
                tracing::warn!("Dropping duplicate backlog item {} from listing", item.id);
            }
        }
        Self { items: unique }
    }

    /// Replace the entire sequence.
    pub fn replace(&mut self, items: Vec<BacklogItem>) {
        *self = Self::from_items(items);
    }

    /// Move the item at `from` so that it ends up at index `to`. Items between
    /// the two indices shift by one slot; all other relative order is kept.
    /// Out-of-range indices leave the list untouched and return false.
    pub fn move_index(&mut self, from: usize, to: usize) -> bool {
        if from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
        true
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&BacklogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[BacklogItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BacklogItem> {
        self.items.iter()
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// Full position assignment for every item, in sequence order.
    pub fn positions(&self) -> Vec<ItemPosition> {
        self.items
            .iter()
            .enumerate()
            .map(|(position, item)| ItemPosition::new(item.id.clone(), position))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a OrderedItemList {
    type Item = &'a BacklogItem;
    type IntoIter = std::slice::Iter<'a, BacklogItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
