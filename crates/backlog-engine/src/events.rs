use backlog_core::BacklogResult;

/// Completion notices delivered back to the controller's owner task.
#[derive(Debug)]
pub enum EngineEvent {
    /// A background reorder persist finished.
    PersistSettled {
        persist_id: u64,
        item_count: usize,
        result: BacklogResult<()>,
    },
}
