use crate::api::ItemQuery;
use crate::filter::item_filter::{CompositeFilter, ItemFilter, PriorityFilter, TitleSearch};
use crate::item::{BacklogItem, Priority};
use crate::ordered_list::OrderedItemList;

/// Active search text and priority filter for the backlog view.
///
/// The same settings are sent to the server when the list is loaded and
/// applied locally to derive the visible subset. Neither use reorders
/// anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterController {
    search: String,
    priority: Option<Priority>,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_priority(&mut self, priority: Option<Priority>) {
        self.priority = priority;
    }

    pub fn clear(&mut self) {
        self.search.clear();
        self.priority = None;
    }

    /// Filters to forward to the listing endpoint.
    pub fn query(&self) -> ItemQuery {
        let search = self.search.trim();
        ItemQuery {
            search: (!search.is_empty()).then(|| search.to_string()),
            priority: self.priority,
        }
    }

    fn predicate(&self) -> CompositeFilter {
        let mut filter = CompositeFilter::new();
        if !self.search.trim().is_empty() {
            filter = filter.with_filter(Box::new(TitleSearch::new(self.search.as_str())));
        }
        if let Some(priority) = self.priority {
            filter = filter.with_filter(Box::new(PriorityFilter::new(priority)));
        }
        filter
    }

    /// Items passing the filter, in list order.
    pub fn visible<'a>(&self, list: &'a OrderedItemList) -> Vec<&'a BacklogItem> {
        let predicate = self.predicate();
        list.iter().filter(|item| predicate.matches(item)).collect()
    }
}
