use super::AlbumId;
use serde::Serialize;
use std::fmt;

/// Stored in place of an empty genre or composer tag.
pub const EMPTY_TAG: &str = "[EMPTY]";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    /// Raw track number tag, not necessarily numeric ("3/12", "A1", ...).
    pub number: String,
    /// Source url, unique across the catalog.
    pub url: String,
    pub year: i32,
    /// 0 to 5 scale.
    pub rating: f32,
    pub duration_ms: i64,
    pub genre: String,
    pub composer: String,
    pub disc_number: i32,
    pub album_id: AlbumId,
}
