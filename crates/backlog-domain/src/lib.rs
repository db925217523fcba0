pub mod api;
pub mod board;
pub mod field_update;
pub mod filter;
pub mod item;
pub mod ordered_list;

pub use api::{
    ConvertRequest, ConvertResponse, DataResponse, ItemPosition, ItemQuery, ListResponse,
    ReorderRequest, WeeklyBoardRequest,
};
pub use board::{BoardId, BoardSummary, ConversionTarget};
pub use field_update::FieldUpdate;
pub use filter::{FilterController, ItemFilter};
pub use item::{Assignee, BacklogItem, ItemId, ItemUpdate, NewBacklogItem, Priority};
pub use ordered_list::OrderedItemList;
