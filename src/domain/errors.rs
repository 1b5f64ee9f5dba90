//! List engine error types
//!
//! Local validation failures raised by the query engine and the page window
//! calculator. Both are surfaced synchronously; recovery (falling back to the
//! first page) is the list controller's job.

use thiserror::Error;

use crate::domain::entities::EntityKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("Invalid list query: {reason}")]
    InvalidQuery { reason: String },

    #[error("Invalid paging state: {reason}")]
    InvalidPagingState { reason: String },

    #[error("Sort key '{key}' is not sortable for {entity} lists")]
    UnsupportedSortKey { key: String, entity: EntityKind },
}

impl ListError {
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            reason: reason.into(),
        }
    }

    pub fn invalid_paging_state(reason: impl Into<String>) -> Self {
        Self::InvalidPagingState {
            reason: reason.into(),
        }
    }

    pub fn unsupported_sort_key(key: &str, entity: EntityKind) -> Self {
        Self::UnsupportedSortKey {
            key: key.to_string(),
            entity,
        }
    }

    /// Whether a controller may recover by resetting the query to page 1
    /// with the same search, filters and sort.
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidQuery { .. } | Self::InvalidPagingState { .. } => true,
            Self::UnsupportedSortKey { .. } => false,
        }
    }
}

pub type EngineResult<T> = Result<T, ListError>;
