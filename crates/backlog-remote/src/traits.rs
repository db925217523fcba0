use async_trait::async_trait;
use backlog_core::BacklogResult;
use backlog_domain::{
    BacklogItem, BoardSummary, ConvertRequest, ConvertResponse, ItemPosition, ItemQuery,
    ItemUpdate, NewBacklogItem,
};

/// Operations the backlog engine needs from the remote service.
///
/// The server is authoritative for item order, board naming and
/// deduplication. Implementations report transport failures and non-success
/// responses as errors; `convert_backlog_items_to_board` additionally hands
/// back the `{success, message}` body as-is so callers can read the message.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait BacklogApi: Send + Sync {
    /// List items in server order, filtered by the query.
    async fn list_backlog_items(&self, query: &ItemQuery) -> BacklogResult<Vec<BacklogItem>>;

    async fn create_backlog_item(&self, item: NewBacklogItem) -> BacklogResult<BacklogItem>;

    async fn update_backlog_item(&self, id: &str, update: ItemUpdate)
        -> BacklogResult<BacklogItem>;

    async fn delete_backlog_item(&self, id: &str) -> BacklogResult<()>;

    /// Persist a complete ordering. Every item of the list is included.
    async fn reorder_backlog_items(&self, items: Vec<ItemPosition>) -> BacklogResult<()>;

    async fn convert_backlog_items_to_board(
        &self,
        request: ConvertRequest,
    ) -> BacklogResult<ConvertResponse>;

    /// Boards the current user can move items into.
    async fn fetch_my_boards(&self, limit: u32) -> BacklogResult<Vec<BoardSummary>>;
}
