//! Collaborator Errors

use crate::models::ItemId;

/// Failure of a call to the data-access collaborator
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded {status}: {message}")]
    Http { status: u16, message: String },
    #[error("{message} ({code})")]
    Rejected { code: String, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("item not found: {0}")]
    NotFound(ItemId),
}

impl ApiError {
    /// Message suitable for the inline error banner
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } | ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
