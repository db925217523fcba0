use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacklogError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },

    #[error("Request rejected: {}", .message.as_deref().unwrap_or("no details"))]
    Rejected { message: Option<String> },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("select items first")]
    EmptySelection,

    #[error("select a board")]
    NoBoardSelected,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BacklogError {
    /// Message supplied by the server, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } | Self::Rejected { message } => message.as_deref(),
            _ => None,
        }
    }

    /// True for failures detected locally before any request was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::EmptySelection | Self::NoBoardSelected | Self::Validation(_)
        )
    }
}
