//! Item filter implementations.

use crate::item::{BacklogItem, Priority};

/// Trait for filtering backlog items.
pub trait ItemFilter {
    /// Returns true if the item matches the filter criteria.
    fn matches(&self, item: &BacklogItem) -> bool;
}

/// Case-insensitive substring search on the title.
pub struct TitleSearch {
    query: String,
}

impl TitleSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().trim().to_lowercase(),
        }
    }
}

impl ItemFilter for TitleSearch {
    fn matches(&self, item: &BacklogItem) -> bool {
        if self.query.is_empty() {
            return true;
        }
        item.title.to_lowercase().contains(&self.query)
    }
}

/// Exact priority match.
pub struct PriorityFilter {
    priority: Priority,
}

impl PriorityFilter {
    pub fn new(priority: Priority) -> Self {
        Self { priority }
    }
}

impl ItemFilter for PriorityFilter {
    fn matches(&self, item: &BacklogItem) -> bool {
        item.priority == self.priority
    }
}

/// Combine multiple filters with AND logic. An empty composite matches all.
#[derive(Default)]
pub struct CompositeFilter {
    filters: Vec<Box<dyn ItemFilter>>,
}

impl CompositeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Box<dyn ItemFilter>) -> Self {
        self.filters.push(filter);
        self
    }
}

impl ItemFilter for CompositeFilter {
    fn matches(&self, item: &BacklogItem) -> bool {
        self.filters.iter().all(|f| f.matches(item))
    }
}
