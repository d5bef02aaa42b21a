//! Error types for analytics

use thiserror::Error;
use wave_core::{CreatorId, ItemId};

/// Analytics errors
///
/// Raised when history refers to something the catalog does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error("History refers to unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("Unknown creator: {0}")]
    UnknownCreator(CreatorId),
}

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
