/// Creator domain type
use super::CreatorId;
use serde::{Deserialize, Serialize};

/// What a creator publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatorRole {
    /// Publishes songs and albums
    Artist,
    /// Publishes podcasts
    Host,
    /// Regular account; owns playlists only
    Listener,
}

/// Artist, host, or listener account known to the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    /// Unique creator identifier
    pub id: CreatorId,

    /// Username
    pub name: String,

    /// Publishing role
    pub role: CreatorRole,
}
