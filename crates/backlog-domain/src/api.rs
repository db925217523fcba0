//! Request and response bodies exchanged with the backlog service.

use serde::{Deserialize, Serialize};

use crate::board::BoardId;
use crate::item::{ItemId, Priority};

/// Server-side filters for listing items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl ItemQuery {
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_none() && self.priority.is_none()
    }
}

/// `{success, data}` envelope used by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `{success, data}` envelope for endpoints returning a single record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Persisted position of one item: its zero-based index in the full sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPosition {
    pub item_id: ItemId,
    pub position: usize,
}

impl ItemPosition {
    pub fn new(item_id: impl Into<ItemId>, position: usize) -> Self {
        Self {
            item_id: item_id.into(),
            position,
        }
    }
}

/// Body of the reorder call. Always the complete ordering, never a delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub items: Vec<ItemPosition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBoardRequest {
    pub base_title: String,
}

/// Body of the bulk conversion call. Exactly one of `board_id` or
/// `create_weekly_board` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub item_ids: Vec<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<BoardId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_weekly_board: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly: Option<WeeklyBoardRequest>,
}

impl ConvertRequest {
    pub fn to_existing_board(item_ids: Vec<ItemId>, board_id: BoardId) -> Self {
        Self {
            item_ids,
            board_id: Some(board_id),
            create_weekly_board: None,
            weekly: None,
        }
    }

    pub fn weekly_board(item_ids: Vec<ItemId>, base_title: impl Into<String>) -> Self {
        Self {
            item_ids,
            board_id: None,
            create_weekly_board: Some(true),
            weekly: Some(WeeklyBoardRequest {
                base_title: base_title.into(),
            }),
        }
    }

    pub fn is_weekly(&self) -> bool {
        self.create_weekly_board.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
