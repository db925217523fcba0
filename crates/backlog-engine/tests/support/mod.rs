//! In-memory stand-in for the backlog service.
//!
//! Keeps a server-side item order, applies successful reorders to it, and can
//! hold reorder calls open until the test releases them so persists can be
//! made to overlap.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use backlog_core::{AppConfig, BacklogError, BacklogResult};
use backlog_domain::{
    BacklogItem, BoardSummary, ConvertRequest, ConvertResponse, ItemPosition, ItemQuery,
    ItemUpdate, NewBacklogItem, Priority,
};
use backlog_engine::BacklogController;
use backlog_remote::BacklogApi;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderMode {
    /// Accept and apply immediately.
    Apply,
    /// Fail immediately with a 500.
    Fail,
    /// Park the call until `release_next`.
    Hold,
    /// Panic inside the request, as a broken backend would.
    Panic,
}

#[derive(Debug, Clone)]
pub enum ConvertScript {
    Accept(Option<String>),
    Reject(Option<String>),
    TransportError,
}

struct HeldReorder {
    positions: Vec<ItemPosition>,
    reply: oneshot::Sender<BacklogResult<()>>,
}

struct FakeState {
    items: Vec<BacklogItem>,
    reorder_mode: ReorderMode,
    convert_script: ConvertScript,
    list_calls: usize,
    reorder_payloads: Vec<Vec<ItemPosition>>,
    convert_requests: Vec<ConvertRequest>,
    held: VecDeque<HeldReorder>,
}

pub struct FakeBacklogApi {
    state: Mutex<FakeState>,
}

pub fn item(id: &str) -> BacklogItem {
    BacklogItem::new(id, format!("Item {}", id), Priority::Medium)
}

impl FakeBacklogApi {
    pub fn with_ids(ids: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState {
                items: ids.iter().map(|id| item(id)).collect(),
                reorder_mode: ReorderMode::Apply,
                convert_script: ConvertScript::Accept(None),
                list_calls: 0,
                reorder_payloads: Vec::new(),
                convert_requests: Vec::new(),
                held: VecDeque::new(),
            }),
        })
    }

    pub fn set_reorder_mode(&self, mode: ReorderMode) {
        self.state.lock().unwrap().reorder_mode = mode;
    }

    pub fn set_convert_script(&self, script: ConvertScript) {
        self.state.lock().unwrap().convert_script = script;
    }

    pub fn server_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .items
            .iter()
            .map(|i| i.id.clone())
            .collect()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn reorder_payloads(&self) -> Vec<Vec<ItemPosition>> {
        self.state.lock().unwrap().reorder_payloads.clone()
    }

    pub fn convert_requests(&self) -> Vec<ConvertRequest> {
        self.state.lock().unwrap().convert_requests.clone()
    }

    pub fn held_count(&self) -> usize {
        self.state.lock().unwrap().held.len()
    }

    /// Wait until at least `count` reorder calls are parked.
    pub async fn wait_for_held(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.held_count() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("reorder calls never arrived");
    }

    /// Answer the oldest parked reorder. A success applies its positions.
    pub fn release_next(&self, result: BacklogResult<()>) {
        let mut state = self.state.lock().unwrap();
        let held = state.held.pop_front().expect("no held reorder");
        if result.is_ok() {
            apply_positions(&mut state.items, &held.positions);
        }
        let _ = held.reply.send(result);
    }
}

fn apply_positions(items: &mut Vec<BacklogItem>, positions: &[ItemPosition]) {
    let mut ordered: Vec<BacklogItem> = Vec::with_capacity(items.len());
    let mut sorted = positions.to_vec();
    sorted.sort_by_key(|p| p.position);
    for position in &sorted {
        if let Some(index) = items.iter().position(|i| i.id == position.item_id) {
            ordered.push(items.remove(index));
        }
    }
    ordered.append(items);
    *items = ordered;
}

pub fn server_error(message: &str) -> BacklogError {
    BacklogError::Server {
        status: 500,
        message: Some(message.to_string()),
    }
}

#[async_trait]
impl BacklogApi for FakeBacklogApi {
    async fn list_backlog_items(&self, query: &ItemQuery) -> BacklogResult<Vec<BacklogItem>> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        let search = query.search.as_deref().map(str::to_lowercase);
        Ok(state
            .items
            .iter()
            .filter(|i| {
                search
                    .as_deref()
                    .map_or(true, |s| i.title.to_lowercase().contains(s))
            })
            .filter(|i| query.priority.map_or(true, |p| i.priority == p))
            .cloned()
            .collect())
    }

    async fn create_backlog_item(&self, new: NewBacklogItem) -> BacklogResult<BacklogItem> {
        let mut state = self.state.lock().unwrap();
        let id = format!("N{}", state.items.len() + 1);
        let mut created = BacklogItem::new(id, new.title, new.priority);
        created.story_points = new.story_points;
        state.items.push(created.clone());
        Ok(created)
    }

    async fn update_backlog_item(
        &self,
        id: &str,
        update: ItemUpdate,
    ) -> BacklogResult<BacklogItem> {
        let mut state = self.state.lock().unwrap();
        let existing = state
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| BacklogError::NotFound(id.to_string()))?;
        existing.apply(update)?;
        Ok(existing.clone())
    }

    async fn delete_backlog_item(&self, id: &str) -> BacklogResult<()> {
        let mut state = self.state.lock().unwrap();
        state.items.retain(|i| i.id != id);
        Ok(())
    }

    async fn reorder_backlog_items(&self, items: Vec<ItemPosition>) -> BacklogResult<()> {
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.reorder_payloads.push(items.clone());
            let mode = state.reorder_mode;
            match mode {
                ReorderMode::Apply => {
                    apply_positions(&mut state.items, &items);
                    return Ok(());
                }
                ReorderMode::Fail => return Err(server_error("reorder rejected")),
                ReorderMode::Panic => {
                    drop(state);
                    panic!("reorder backend crashed");
                }
                ReorderMode::Hold => {
                    let (tx, rx) = oneshot::channel();
                    state.held.push_back(HeldReorder {
                        positions: items,
                        reply: tx,
                    });
                    rx
                }
            }
        };
        reply
            .await
            .unwrap_or_else(|_| Err(BacklogError::Connection("dropped".into())))
    }

    async fn convert_backlog_items_to_board(
        &self,
        request: ConvertRequest,
    ) -> BacklogResult<ConvertResponse> {
        let mut state = self.state.lock().unwrap();
        state.convert_requests.push(request.clone());
        match state.convert_script.clone() {
            ConvertScript::Accept(message) => {
                state.items.retain(|i| !request.item_ids.contains(&i.id));
                Ok(ConvertResponse {
                    success: true,
                    message,
                })
            }
            ConvertScript::Reject(message) => Ok(ConvertResponse {
                success: false,
                message,
            }),
            ConvertScript::TransportError => {
                Err(BacklogError::Connection("connection reset".into()))
            }
        }
    }

    async fn fetch_my_boards(&self, limit: u32) -> BacklogResult<Vec<BoardSummary>> {
        Ok((1..=limit.min(3))
            .map(|n| BoardSummary {
                id: format!("b{}", n),
                title: format!("Board {}", n),
                description: None,
            })
            .collect())
    }
}

/// A controller over `api` that has completed its first load.
pub async fn loaded_controller(api: &Arc<FakeBacklogApi>) -> BacklogController {
    let mut controller = BacklogController::new(api.clone(), &AppConfig::default());
    controller.load().await.unwrap();
    controller
}
