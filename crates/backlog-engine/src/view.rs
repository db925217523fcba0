use backlog_domain::BacklogItem;

/// Outcome of the most recent listing attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Ready,
    Failed { message: String },
}

impl LoadState {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// What the backlog screen should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BacklogView<'a> {
    /// No listing has completed yet.
    Loading,
    /// The first load failed, so there is nothing to show.
    Unavailable(&'a str),
    /// Loaded, and the backlog has no items.
    Empty,
    /// Items exist, but none pass the current filters.
    NoMatches,
    Items(Vec<&'a BacklogItem>),
}

impl<'a> BacklogView<'a> {
    pub fn items(&self) -> &[&'a BacklogItem] {
        match self {
            Self::Items(items) => items,
            _ => &[],
        }
    }
}
