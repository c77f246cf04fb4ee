use crate::catalog::TrackId;
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PlaylistId(pub u32);

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, ordered list of track references. The track list is the only
/// part of a published snapshot that may change, so it carries its own lock.
#[derive(Debug)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub url: String,
    tracks: RwLock<Vec<TrackId>>,
}

impl Playlist {
    pub fn new(id: PlaylistId, name: String, url: String, tracks: Vec<TrackId>) -> Playlist {
        Playlist {
            id,
            name,
            url,
            tracks: RwLock::new(tracks),
        }
    }

    /// A copy of the current track list.
    pub fn track_ids(&self) -> Vec<TrackId> {
        self.tracks.read().clone()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.read().len()
    }

    /// Appends a track and returns the new track count.
    pub fn push(&self, track_id: TrackId) -> usize {
        let mut tracks = self.tracks.write();
        tracks.push(track_id);
        tracks.len()
    }

    /// Removes the track at `index`, `None` when out of range.
    pub fn remove_at(&self, index: usize) -> Option<TrackId> {
        let mut tracks = self.tracks.write();
        if index < tracks.len() {
            Some(tracks.remove(index))
        } else {
            None
        }
    }

    /// Like [`remove_at`](Self::remove_at), but runs `confirm` first while
    /// the track list is locked. Nothing is removed when `confirm` fails or
    /// the index is out of range; in the latter case `confirm` is not run.
    pub fn remove_at_with<E>(
        &self,
        index: usize,
        confirm: impl FnOnce() -> Result<(), E>,
    ) -> Result<Option<TrackId>, E> {
        let mut tracks = self.tracks.write();
        if index >= tracks.len() {
            return Ok(None);
        }
        confirm()?;
        Ok(Some(tracks.remove(index)))
    }
}
