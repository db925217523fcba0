//! Optimistic drag-and-drop reordering.
//!
//! A move is applied to the list immediately, then the complete position
//! mapping is persisted in the background. Persists are neither serialized
//! nor cancelled: two quick drags issue two requests, each carrying the full
//! snapshot taken when it was sent. A failed persist is answered with a full
//! reload from the server, which also discards any later unconfirmed move.

use std::sync::Arc;

use backlog_core::{BacklogError, BacklogResult};
use backlog_domain::{ItemPosition, OrderedItemList};
use backlog_remote::BacklogApi;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::events::EngineEvent;

/// Source and destination indices of an applied single-element move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// Nothing changed: an id was not in the list, or source equals target.
    Ignored,
    /// The list was reordered and a persist was queued.
    Applied { plan: MovePlan, persist_id: u64 },
}

impl ReorderOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// What the owner must do once a persist has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistVerdict {
    Confirmed,
    /// The optimistic order can no longer be trusted.
    ReloadRequired { message: String },
}

/// Move `source_id` to the index currently held by `target_id`.
///
/// Returns `None` without touching the list when either id is absent (a
/// stale drag) or both ids are the same.
pub fn apply_move(list: &mut OrderedItemList, source_id: &str, target_id: &str) -> Option<MovePlan> {
    if source_id == target_id {
        return None;
    }
    let from = list.index_of(source_id)?;
    let to = list.index_of(target_id)?;
    if !list.move_index(from, to) {
        return None;
    }
    Some(MovePlan { from, to })
}

pub struct ReorderCoordinator {
    api: Arc<dyn BacklogApi>,
    events: mpsc::UnboundedSender<EngineEvent>,
    next_persist_id: u64,
}

impl ReorderCoordinator {
    pub fn new(api: Arc<dyn BacklogApi>, events: mpsc::UnboundedSender<EngineEvent>) -> Self {
        Self {
            api,
            events,
            next_persist_id: 1,
        }
    }

    /// Reorder optimistically and queue a persist of the resulting positions.
    ///
    /// Must be called from within a tokio runtime; the persist runs as a
    /// spawned task and reports through the event channel.
    pub fn reorder(
        &mut self,
        list: &mut OrderedItemList,
        source_id: &str,
        target_id: &str,
    ) -> ReorderOutcome {
        let Some(plan) = apply_move(list, source_id, target_id) else {
            debug!(
                "Ignoring reorder of {} onto {}: no-op or stale drag",
                source_id, target_id
            );
            return ReorderOutcome::Ignored;
        };

        debug!(
            "Moved {} from position {} to {}",
            source_id, plan.from, plan.to
        );

        let persist_id = self.next_persist_id;
        self.next_persist_id += 1;
        self.spawn_persist(persist_id, list.positions());

        ReorderOutcome::Applied { plan, persist_id }
    }

    fn spawn_persist(&self, persist_id: u64, positions: Vec<ItemPosition>) {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let item_count = positions.len();
        debug!("Queueing persist #{} of {} positions", persist_id, item_count);

        tokio::spawn(async move {
            // The request runs in its own task so a panic still settles the persist.
            let request = tokio::spawn(async move { api.reorder_backlog_items(positions).await });
            let result = match request.await {
                Ok(result) => result,
                Err(join_err) => {
                    error!("Persist #{} aborted: {}", persist_id, join_err);
                    Err(BacklogError::Internal(format!(
                        "reorder request aborted: {}",
                        join_err
                    )))
                }
            };
            if events
                .send(EngineEvent::PersistSettled {
                    persist_id,
                    item_count,
                    result,
                })
                .is_err()
            {
                debug!("Persist #{} settled after the controller was dropped", persist_id);
            }
        });
    }

    /// Decide how to react to a settled persist.
    pub fn on_persist_settled(&self, persist_id: u64, result: &BacklogResult<()>) -> PersistVerdict {
        match result {
            Ok(()) => {
                debug!("Persist #{} confirmed", persist_id);
                PersistVerdict::Confirmed
            }
            Err(err) => {
                warn!("Persist #{} failed: {}", persist_id, err);
                PersistVerdict::ReloadRequired {
                    message: persist_failure_message(err),
                }
            }
        }
    }
}

fn persist_failure_message(err: &BacklogError) -> String {
    match err.server_message() {
        Some(message) => format!("Could not save the new order: {}", message),
        None => "Could not save the new order".to_string(),
    }
}
