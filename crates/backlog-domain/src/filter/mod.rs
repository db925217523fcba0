//! Item filtering.
//!
//! Predicates over single items plus the controller holding the active
//! search text and priority for the backlog view.

pub mod filter_controller;
pub mod item_filter;

pub use filter_controller::FilterController;
pub use item_filter::{CompositeFilter, ItemFilter, PriorityFilter, TitleSearch};
