/// Catalog error types for Wave
use thiserror::Error;

use crate::types::{CollectionKind, CreatorId, ItemId};

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while building or querying the catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Item id does not exist in the arena
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// Creator id does not exist in the arena
    #[error("Creator not found: {0}")]
    CreatorNotFound(CreatorId),

    /// Lookup by name failed
    #[error("{entity} not found: {name}")]
    NameNotFound { entity: String, name: String },

    /// Entity with the same name already registered
    #[error("Duplicate {entity}: {name}")]
    Duplicate { entity: String, name: String },

    /// Audio items must last at least one second
    #[error("Item {0} has zero duration")]
    ZeroDuration(String),

    /// Item kind does not fit the collection (e.g. an episode in an album)
    #[error("{item} cannot be part of a {kind}")]
    KindMismatch { item: String, kind: CollectionKind },

    /// Creator role does not allow the operation (e.g. a listener owning an album)
    #[error("Permission denied: {0}")]
    RoleMismatch(String),
}

impl CatalogError {
    /// Create a name lookup error
    pub fn name_not_found(entity: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NameNotFound {
            entity: entity.into(),
            name: name.into(),
        }
    }

    /// Create a duplicate entry error
    pub fn duplicate(entity: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Duplicate {
            entity: entity.into(),
            name: name.into(),
        }
    }
}
