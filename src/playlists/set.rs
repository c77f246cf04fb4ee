use super::{Playlist, PlaylistId};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// The playlists of a snapshot. Membership and each playlist's track list
/// can be edited while readers hold the snapshot.
#[derive(Debug)]
pub struct PlaylistSet {
    playlists: RwLock<Vec<Arc<Playlist>>>,
    next_id: AtomicU32,
}

impl PlaylistSet {
    pub fn new(playlists: Vec<Playlist>) -> PlaylistSet {
        let max_id = playlists.iter().map(|p| p.id.0).max().unwrap_or(0);
        PlaylistSet {
            playlists: RwLock::new(playlists.into_iter().map(Arc::new).collect()),
            next_id: AtomicU32::new(max_id + 1),
        }
    }

    /// All playlists in id order.
    pub fn all(&self) -> Vec<Arc<Playlist>> {
        self.playlists.read().clone()
    }

    pub fn get(&self, id: PlaylistId) -> Option<Arc<Playlist>> {
        self.playlists.read().iter().find(|p| p.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.playlists.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.read().is_empty()
    }

    /// Adds an empty playlist under the next free id.
    pub fn insert(&self, name: String, url: String) -> Arc<Playlist> {
        let id = PlaylistId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let playlist = Arc::new(Playlist::new(id, name, url, vec![]));
        self.playlists.write().push(playlist.clone());
        playlist
    }

    pub fn remove(&self, id: PlaylistId) -> Option<Arc<Playlist>> {
        let mut playlists = self.playlists.write();
        let index = playlists.iter().position(|p| p.id == id)?;
        Some(playlists.remove(index))
    }
}
