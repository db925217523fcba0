//! The single owner of backlog state.
//!
//! `BacklogController` holds the ordered list, filters, selection, board
//! picker contents and pending notifications, and is the only thing that
//! mutates them. Every mutation goes through `&mut self`; background persist
//! outcomes are delivered as [`EngineEvent`]s and applied by the owner via
//! [`BacklogController::handle_event`] or [`BacklogController::settle`].

use std::collections::VecDeque;
use std::sync::Arc;

use backlog_core::{AppConfig, BacklogError, BacklogResult, Notification, SelectionSet};
use backlog_domain::{
    BacklogItem, BoardId, BoardSummary, ConversionTarget, FilterController, ItemId, ItemQuery,
    ItemUpdate, NewBacklogItem, OrderedItemList, Priority,
};
use backlog_remote::BacklogApi;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::bulk::{self, BulkConversionCoordinator, ConversionReport};
use crate::events::EngineEvent;
use crate::reorder::{PersistVerdict, ReorderCoordinator, ReorderOutcome};
use crate::view::{BacklogView, LoadState};

pub struct BacklogController {
    api: Arc<dyn BacklogApi>,
    list: OrderedItemList,
    filters: FilterController,
    selection: SelectionSet<ItemId>,
    boards: Vec<BoardSummary>,
    load_state: LoadState,
    /// Query of the last successful load; `None` until one succeeds.
    loaded_query: Option<ItemQuery>,
    notifications: VecDeque<Notification>,
    reorder: ReorderCoordinator,
    bulk: BulkConversionCoordinator,
    events: mpsc::UnboundedReceiver<EngineEvent>,
    pending_persists: usize,
    board_list_limit: u32,
    weekly_board_title: String,
}

impl BacklogController {
    pub fn new(api: Arc<dyn BacklogApi>, config: &AppConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            reorder: ReorderCoordinator::new(Arc::clone(&api), tx),
            bulk: BulkConversionCoordinator::new(Arc::clone(&api)),
            api,
            list: OrderedItemList::new(),
            filters: FilterController::new(),
            selection: SelectionSet::new(),
            boards: Vec::new(),
            load_state: LoadState::NotLoaded,
            loaded_query: None,
            notifications: VecDeque::new(),
            events: rx,
            pending_persists: 0,
            board_list_limit: config.effective_board_list_limit(),
            weekly_board_title: config.effective_weekly_board_title().to_string(),
        }
    }

    pub fn items(&self) -> &OrderedItemList {
        &self.list
    }

    pub fn filters(&self) -> &FilterController {
        &self.filters
    }

    pub fn selection(&self) -> &SelectionSet<ItemId> {
        &self.selection
    }

    pub fn boards(&self) -> &[BoardSummary] {
        &self.boards
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Reorder persists issued but not yet handled.
    pub fn pending_persists(&self) -> usize {
        self.pending_persists
    }

    pub fn visible_items(&self) -> Vec<&BacklogItem> {
        self.filters.visible(&self.list)
    }

    pub fn view(&self) -> BacklogView<'_> {
        match (&self.load_state, &self.loaded_query) {
            (LoadState::NotLoaded, _) => BacklogView::Loading,
            (LoadState::Failed { message }, None) => BacklogView::Unavailable(message.as_str()),
            // The server already applied the filters when the load was filtered.
            (_, Some(query)) if self.list.is_empty() && !query.is_unfiltered() => {
                BacklogView::NoMatches
            }
            _ if self.list.is_empty() => BacklogView::Empty,
            _ => {
                let visible = self.visible_items();
                if visible.is_empty() {
                    BacklogView::NoMatches
                } else {
                    BacklogView::Items(visible)
                }
            }
        }
    }

    // Filters. These never touch stored order; the next load forwards them.

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.set_search(search);
    }

    pub fn set_priority(&mut self, priority: Option<Priority>) {
        self.filters.set_priority(priority);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Fetch the list with the current filters and replace it wholesale.
    ///
    /// On failure the previous list is kept and an error notification queued.
    pub async fn load(&mut self) -> BacklogResult<()> {
        let query = self.filters.query();
        let result = self.api.list_backlog_items(&query).await;
        match result {
            Ok(items) => {
                info!("Loaded {} backlog items", items.len());
                self.list.replace(items);
                self.load_state = LoadState::Ready;
                self.loaded_query = Some(query);
                Ok(())
            }
            Err(err) => {
                error!("Failed to load backlog: {}", err);
                self.load_state = LoadState::Failed {
                    message: err.to_string(),
                };
                self.notify(Notification::error(format!(
                    "Could not load backlog: {}",
                    err.server_message().map(str::to_string).unwrap_or_else(|| err.to_string())
                )));
                Err(err)
            }
        }
    }

    /// User-triggered retry.
    pub async fn refresh(&mut self) -> BacklogResult<()> {
        self.load().await
    }

    /// Drop `source_id` onto `target_id`'s position. Applied at once; the
    /// persist outcome arrives later as an [`EngineEvent`].
    pub fn reorder(&mut self, source_id: &str, target_id: &str) -> ReorderOutcome {
        let outcome = self.reorder.reorder(&mut self.list, source_id, target_id);
        if outcome.is_applied() {
            self.pending_persists += 1;
        }
        outcome
    }

    /// Wait for the next background outcome. `None` when nothing is pending.
    pub async fn next_event(&mut self) -> Option<EngineEvent> {
        if self.pending_persists == 0 {
            return None;
        }
        self.events.recv().await
    }

    pub async fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::PersistSettled {
                persist_id,
                item_count,
                result,
            } => {
                self.pending_persists = self.pending_persists.saturating_sub(1);
                debug!(
                    "Persist #{} of {} positions settled ({} still pending)",
                    persist_id, item_count, self.pending_persists
                );
                if let PersistVerdict::ReloadRequired { message } =
                    self.reorder.on_persist_settled(persist_id, &result)
                {
                    self.notify(Notification::error(message));
                    // Replaces the list even if newer moves are still unconfirmed.
                    if self.load().await.is_err() {
                        warn!("Reload after failed persist #{} also failed", persist_id);
                    }
                }
            }
        }
    }

    /// Handle outcomes that have already arrived, without waiting.
    pub async fn process_ready_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event).await;
            handled += 1;
        }
        handled
    }

    /// Wait for every outstanding persist and handle its outcome.
    pub async fn settle(&mut self) {
        while let Some(event) = self.next_event().await {
            self.handle_event(event).await;
        }
    }

    // Selection

    /// Toggle an item. Returns whether it is selected afterwards.
    ///
    /// A selected id is always removable, even when a filter or reload has
    /// hidden it; only ids missing from the list are refused for adding.
    pub fn toggle_selection(&mut self, id: &str) -> bool {
        let id = id.to_string();
        if !self.selection.contains(&id) && !self.list.contains(&id) {
            debug!("Ignoring selection toggle for unknown item {}", id);
            return false;
        }
        self.selection.toggle(id)
    }

    /// Add every visible item. Items already selected but filtered out stay.
    pub fn select_all_visible(&mut self) {
        let visible: Vec<ItemId> = self.visible_items().iter().map(|i| i.id.clone()).collect();
        self.selection.select_all(visible);
    }

    pub fn select_none(&mut self) {
        self.selection.clear();
    }

    // Boards

    pub async fn load_boards(&mut self) -> BacklogResult<&[BoardSummary]> {
        let result = self.api.fetch_my_boards(self.board_list_limit).await;
        match result {
            Ok(boards) => {
                info!("Loaded {} boards", boards.len());
                self.boards = boards;
                Ok(self.boards.as_slice())
            }
            Err(err) => {
                error!("Failed to load boards: {}", err);
                self.notify(Notification::error(format!("Could not load boards: {}", err)));
                Err(err)
            }
        }
    }

    // Bulk conversion

    pub async fn convert_to_existing_board(
        &mut self,
        board_id: Option<BoardId>,
    ) -> BacklogResult<ConversionReport> {
        self.convert_selection(ConversionTarget::ExistingBoard(board_id))
            .await
    }

    /// A blank or missing title falls back to the configured default.
    pub async fn start_weekly_board(
        &mut self,
        base_title: Option<&str>,
    ) -> BacklogResult<ConversionReport> {
        let base_title = base_title
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(&self.weekly_board_title)
            .to_string();
        self.convert_selection(ConversionTarget::WeeklyBoard { base_title })
            .await
    }

    /// Convert the selection. On success the selection is cleared and the
    /// list reloaded; on failure nothing local changes.
    pub async fn convert_selection(
        &mut self,
        target: ConversionTarget,
    ) -> BacklogResult<ConversionReport> {
        let ids = self.selected_ids_for_request();
        let result = self.bulk.convert(ids, target.clone()).await;
        match result {
            Ok(report) => {
                info!("Converted {} items: {}", report.moved.len(), report.message);
                self.selection.clear();
                self.notify(Notification::success(report.message.clone()));
                if self.load().await.is_err() {
                    warn!("Reload after conversion failed");
                }
                Ok(report)
            }
            Err(err) => {
                if !err.is_precondition() {
                    error!("Conversion failed: {}", err);
                }
                self.notify(Notification::error(bulk::failure_message(&target, &err)));
                Err(err)
            }
        }
    }

    /// Selected ids to send. Ids missing from an unfiltered list are stale and
    /// left out; with server-side filters active absence proves nothing.
    fn selected_ids_for_request(&self) -> Vec<ItemId> {
        let ids = self.selection.ids();
        let unfiltered = self
            .loaded_query
            .as_ref()
            .is_some_and(ItemQuery::is_unfiltered);
        if !unfiltered {
            return ids;
        }
        let (present, stale): (Vec<ItemId>, Vec<ItemId>) =
            ids.into_iter().partition(|id| self.list.contains(id));
        if !stale.is_empty() {
            warn!(
                "Leaving {} stale selected items out of conversion: {:?}",
                stale.len(),
                stale
            );
        }
        present
    }

    // Single-item edits. Each reloads on success.

    pub async fn create_item(&mut self, item: NewBacklogItem) -> BacklogResult<BacklogItem> {
        let result = match item.validated() {
            Ok(item) => self.api.create_backlog_item(item).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(created) => {
                info!("Created backlog item {}", created.id);
                self.notify(Notification::success(format!("Added '{}'", created.title)));
                self.reload_after_edit().await;
                Ok(created)
            }
            Err(err) => Err(self.edit_failed("add item", err)),
        }
    }

    pub async fn update_item(
        &mut self,
        id: &str,
        update: ItemUpdate,
    ) -> BacklogResult<BacklogItem> {
        let result = match update.validated() {
            Ok(update) => self.api.update_backlog_item(id, update).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(updated) => {
                info!("Updated backlog item {}", updated.id);
                self.notify(Notification::success(format!("Updated '{}'", updated.title)));
                self.reload_after_edit().await;
                Ok(updated)
            }
            Err(err) => Err(self.edit_failed("update item", err)),
        }
    }

    pub async fn delete_item(&mut self, id: &str) -> BacklogResult<()> {
        let result = self.api.delete_backlog_item(id).await;
        match result {
            Ok(()) => {
                info!("Deleted backlog item {}", id);
                self.selection.remove(&id.to_string());
                self.notify(Notification::success("Item deleted"));
                self.reload_after_edit().await;
                Ok(())
            }
            Err(err) => Err(self.edit_failed("delete item", err)),
        }
    }

    async fn reload_after_edit(&mut self) {
        if self.load().await.is_err() {
            warn!("Reload after edit failed");
        }
    }

    fn edit_failed(&mut self, action: &str, err: BacklogError) -> BacklogError {
        error!("Failed to {}: {}", action, err);
        let detail = err
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        self.notify(Notification::error(format!("Could not {}: {}", action, detail)));
        err
    }

    // Notifications

    fn notify(&mut self, notification: Notification) {
        debug!("Notification: {}", notification.message);
        self.notifications.push_back(notification);
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }
}
