pub mod bulk;
pub mod controller;
pub mod events;
pub mod reorder;
pub mod view;

pub use bulk::{BulkConversionCoordinator, ConversionReport};
pub use controller::BacklogController;
pub use events::EngineEvent;
pub use reorder::{MovePlan, PersistVerdict, ReorderCoordinator, ReorderOutcome};
pub use view::{BacklogView, LoadState};
