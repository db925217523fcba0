//! Bulk conversion of selected backlog items into a board.
//!
//! Preconditions are checked before any request is built. The coordinator
//! itself holds no selection or list state; the controller clears and reloads
//! on success and leaves everything alone on failure.

use std::sync::Arc;

use backlog_core::{BacklogError, BacklogResult};
use backlog_domain::{BoardId, ConversionTarget, ConvertRequest, ItemId};
use backlog_remote::BacklogApi;
use tracing::{info, warn};

const EXISTING_BOARD_FAILURE: &str = "Failed to move items to board";
const WEEKLY_BOARD_FAILURE: &str = "Failed to start weekly board";

/// Result of a conversion the server accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Ids sent in the request.
    pub moved: Vec<ItemId>,
    /// Server message, or a default summary when the server sent none.
    pub message: String,
}

pub struct BulkConversionCoordinator {
    api: Arc<dyn BacklogApi>,
}

impl BulkConversionCoordinator {
    pub fn new(api: Arc<dyn BacklogApi>) -> Self {
        Self { api }
    }

    /// Move the selected items into an existing board.
    pub async fn convert_to_existing_board(
        &self,
        selected_ids: Vec<ItemId>,
        board_id: Option<BoardId>,
    ) -> BacklogResult<ConversionReport> {
        if selected_ids.is_empty() {
            return Err(BacklogError::EmptySelection);
        }
        let board_id = board_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(BacklogError::NoBoardSelected)?;

        info!(
            "Converting {} backlog items to board {}",
            selected_ids.len(),
            board_id
        );
        let count = selected_ids.len();
        let request = ConvertRequest::to_existing_board(selected_ids, board_id);
        self.send(request, format!("Moved {} item(s) to board", count))
            .await
    }

    /// Ask the server to create (or reuse) this week's board and move the
    /// selected items into it. Naming and dedup are the server's call.
    pub async fn start_weekly_board(
        &self,
        selected_ids: Vec<ItemId>,
        base_title: &str,
    ) -> BacklogResult<ConversionReport> {
        if selected_ids.is_empty() {
            return Err(BacklogError::EmptySelection);
        }

        info!(
            "Starting weekly board '{}' with {} backlog items",
            base_title,
            selected_ids.len()
        );
        let count = selected_ids.len();
        let request = ConvertRequest::weekly_board(selected_ids, base_title);
        self.send(
            request,
            format!("Started weekly board with {} item(s)", count),
        )
        .await
    }

    /// Dispatch on the picker's target.
    pub async fn convert(
        &self,
        selected_ids: Vec<ItemId>,
        target: ConversionTarget,
    ) -> BacklogResult<ConversionReport> {
        match target {
            ConversionTarget::ExistingBoard(board_id) => {
                self.convert_to_existing_board(selected_ids, board_id).await
            }
            ConversionTarget::WeeklyBoard { base_title } => {
                self.start_weekly_board(selected_ids, &base_title).await
            }
        }
    }

    async fn send(
        &self,
        request: ConvertRequest,
        default_message: String,
    ) -> BacklogResult<ConversionReport> {
        let moved = request.item_ids.clone();
        let response = self.api.convert_backlog_items_to_board(request).await?;
        if !response.success {
            warn!(
                "Conversion rejected: {}",
                response.message.as_deref().unwrap_or("no details")
            );
            return Err(BacklogError::Rejected {
                message: response.message,
            });
        }
        Ok(ConversionReport {
            moved,
            message: response
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(default_message),
        })
    }
}

/// User-facing text for a failed conversion: the precondition itself, the
/// server's message when it sent one, otherwise a generic line.
pub fn failure_message(target: &ConversionTarget, err: &BacklogError) -> String {
    if err.is_precondition() {
        return err.to_string();
    }
    match err.server_message() {
        Some(message) if !message.trim().is_empty() => message.to_string(),
        _ => match target {
            ConversionTarget::ExistingBoard(_) => EXISTING_BOARD_FAILURE.to_string(),
            ConversionTarget::WeeklyBoard { .. } => WEEKLY_BOARD_FAILURE.to_string(),
        },
    }
}
