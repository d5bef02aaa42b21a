/// ID types for Wave catalog entities
///
/// Ids are dense arena indices handed out by the catalog in insertion order.
/// They are `Copy`, so playback state and history hold them freely.
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create an id from a raw arena index
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Get the raw arena index
            pub const fn get(self) -> u32 {
                self.0
            }

            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Song or episode identifier
    ItemId,
    "item"
);

arena_id!(
    /// Playlist, album, or podcast identifier
    CollectionId,
    "collection"
);

arena_id!(
    /// Artist, host, or listener identifier
    CreatorId,
    "creator"
);
