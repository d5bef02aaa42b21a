mod collection;
mod creator;
mod ids;
mod item;

pub use collection::{Collection, CollectionKind};
pub use creator::{Creator, CreatorRole};
pub use ids::{CollectionId, CreatorId, ItemId};
pub use item::{AudioItem, EpisodeInfo, ItemKind, SongInfo};
