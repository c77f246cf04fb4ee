use super::AlbumId;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ArtistId(pub u32);

impl fmt::Display for ArtistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An album artist. The name is the identity key within a catalog.
#[derive(Clone, Debug, Serialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    /// Owned albums, in discovery order.
    pub album_ids: Vec<AlbumId>,
}
