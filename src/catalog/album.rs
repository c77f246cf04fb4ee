use super::{ArtistId, TrackId};
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AlbumId(pub u32);

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    /// Owning artist, always present in the same catalog.
    pub artist_id: ArtistId,
    /// Never empty: an album only exists because a track created it.
    pub track_ids: Vec<TrackId>,
}
