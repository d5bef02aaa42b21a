//! Error types for the playback engine

use crate::types::SourceKind;
use thiserror::Error;

/// Player errors
///
/// Every failure is detected before the player mutates any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// Operation needs a loaded source
    #[error("No source loaded")]
    NoActiveSource,

    /// Tried to load a collection without tracks
    #[error("Cannot load an empty collection")]
    EmptyCollection,

    /// Operation not supported by the loaded source kind
    #[error("{operation} is not available for a {kind} source")]
    InvalidSourceKind {
        operation: &'static str,
        kind: SourceKind,
    },

    /// Entry id outside the catalog
    #[error("{entity} index out of range: {index}")]
    IndexOutOfRange { entity: &'static str, index: u32 },
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
