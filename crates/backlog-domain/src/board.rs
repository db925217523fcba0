use serde::{Deserialize, Serialize};

pub type BoardId = String;

/// Entry of the board picker. Loaded from the board listing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    #[serde(alias = "_id")]
    pub id: BoardId,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Where a bulk conversion sends the selected items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionTarget {
    /// An existing board. `None` means the picker has no board chosen yet.
    ExistingBoard(Option<BoardId>),
    /// A board the server creates (or reuses) for the current week.
    WeeklyBoard { base_title: String },
}

impl ConversionTarget {
    pub fn existing(board_id: impl Into<BoardId>) -> Self {
        Self::ExistingBoard(Some(board_id.into()))
    }

    pub fn weekly(base_title: impl Into<String>) -> Self {
        Self::WeeklyBoard {
            base_title: base_title.into(),
        }
    }
}
