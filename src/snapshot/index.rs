//! Ownership of the currently published [`Snapshot`].
//!
//! Readers take an `Arc<Snapshot>` once per request and keep using it even
//! if a rebuild publishes a newer one meanwhile. The first access builds
//! the snapshot; concurrent first accesses wait for that single build.

use super::Snapshot;
use crate::catalog::{log_build_report, BuildError, TrackId};
use crate::playlists::PlaylistId;
use crate::source::{LibrarySource, PlaylistSource};
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("Host rejected the playlist edit: {0}")]
    Source(#[from] anyhow::Error),

    #[error(transparent)]
    Build(#[from] BuildError),
}

pub struct LibraryIndex {
    library: Arc<dyn LibrarySource>,
    playlist_source: Arc<dyn PlaylistSource>,
    file_filter: String,
    published: RwLock<Option<Arc<Snapshot>>>,
    // Held for the whole duration of a build, and of a playlist edit.
    build_lock: Mutex<()>,
    stale: AtomicBool,
}

impl LibraryIndex {
    pub fn new(
        library: Arc<dyn LibrarySource>,
        playlist_source: Arc<dyn PlaylistSource>,
    ) -> LibraryIndex {
        LibraryIndex {
            library,
            playlist_source,
            file_filter: String::new(),
            published: RwLock::new(None),
            build_lock: Mutex::new(()),
            stale: AtomicBool::new(false),
        }
    }

    pub fn with_file_filter(mut self, file_filter: &str) -> LibraryIndex {
        self.file_filter = file_filter.to_owned();
        self
    }

    /// The published snapshot, if any, without building.
    pub fn published(&self) -> Option<Arc<Snapshot>> {
        self.published.read().clone()
    }

    pub fn is_built(&self) -> bool {
        self.published.read().is_some()
    }

    /// The snapshot to serve a request from. Builds it on first use, and
    /// again after [`invalidate`](Self::invalidate).
    ///
    /// A failed rebuild of an invalidated snapshot keeps serving the previous
    /// one; only a failed first build is an error.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>, BuildError> {
        if !self.stale.load(Ordering::Acquire) {
            if let Some(snapshot) = self.published() {
                return Ok(snapshot);
            }
        }

        let _guard = self.build_lock.lock();
        let current = self.published();
        if let Some(snapshot) = &current {
            if !self.stale.load(Ordering::Acquire) {
                return Ok(snapshot.clone());
            }
        }

        self.stale.store(false, Ordering::Release);
        match self.build_and_publish() {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => match current {
                Some(previous) => {
                    error!(
                        "Rebuild failed, still serving generation {}: {}",
                        previous.generation(),
                        err
                    );
                    Ok(previous)
                }
                None => Err(err),
            },
        }
    }

    /// Builds a brand new snapshot and publishes it. On failure the previous
    /// snapshot stays published.
    pub fn rebuild(&self) -> Result<Arc<Snapshot>, BuildError> {
        let _guard = self.build_lock.lock();
        self.stale.store(false, Ordering::Release);
        self.build_and_publish().inspect_err(|err| {
            error!("Rebuild failed, keeping the published catalog: {}", err);
        })
    }

    /// Marks the published snapshot as outdated. The next
    /// [`snapshot`](Self::snapshot) call rebuilds.
    pub fn invalidate(&self) {
        self.stale.store(true, Ordering::Release);
    }

    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    // Callers hold `build_lock`.
    fn build_and_publish(&self) -> Result<Arc<Snapshot>, BuildError> {
        let generation = self.published().map_or(1, |s| s.generation() + 1);
        info!("Building catalog generation {}...", generation);
        let snapshot = Arc::new(Snapshot::build(
            generation,
            self.library.as_ref(),
            self.playlist_source.as_ref(),
            &self.file_filter,
        )?);
        log_build_report(
            snapshot.catalog(),
            snapshot.playlists().len(),
            snapshot.problems(),
        );
        *self.published.write() = Some(snapshot.clone());
        info!("Published catalog generation {}", generation);
        Ok(snapshot)
    }

    /// The snapshot a playlist edit applies to. The returned guard keeps
    /// rebuilds out until the edit has reached both the host and the
    /// snapshot, so no edit lands in a superseded snapshot.
    fn edit_target(&self) -> Result<(MutexGuard<'_, ()>, Arc<Snapshot>), BuildError> {
        let built = self.snapshot()?;
        let guard = self.build_lock.lock();
        // A rebuild may have published a newer snapshot meanwhile.
        let snapshot = self.published().unwrap_or(built);
        Ok((guard, snapshot))
    }

    /// Creates a playlist on the host and adds it to the live snapshot.
    pub fn create_playlist(&self, name: &str) -> Result<PlaylistId, PlaylistError> {
        let (_guard, snapshot) = self.edit_target()?;
        let url = self.playlist_source.create_playlist(name)?;
        let playlist = snapshot.playlists().insert(name.to_owned(), url);
        info!("Created playlist {} ({})", playlist.id, playlist.name);
        Ok(playlist.id)
    }

    /// `Ok(false)` when the playlist does not exist.
    pub fn delete_playlist(&self, id: PlaylistId) -> Result<bool, PlaylistError> {
        let (_guard, snapshot) = self.edit_target()?;
        let Some(playlist) = snapshot.playlists().get(id) else {
            return Ok(false);
        };
        self.playlist_source.delete_playlist(&playlist.url)?;
        Ok(snapshot.playlists().remove(id).is_some())
    }

    /// Appends a track and returns the new track count, `None` when the
    /// playlist or the track does not exist.
    pub fn append_track(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> Result<Option<usize>, PlaylistError> {
        let (_guard, snapshot) = self.edit_target()?;
        let (Some(playlist), Some(track)) = (
            snapshot.playlists().get(playlist_id),
            snapshot.track_by_id(track_id),
        ) else {
            return Ok(None);
        };
        self.playlist_source
            .append_files(&playlist.url, std::slice::from_ref(&track.url))?;
        Ok(Some(playlist.push(track_id)))
    }

    /// Removes the track at the 0-based `index`. `Ok(false)` when the
    /// playlist does not exist or the index is out of range.
    pub fn remove_track(&self, playlist_id: PlaylistId, index: usize) -> Result<bool, PlaylistError> {
        let (_guard, snapshot) = self.edit_target()?;
        let Some(playlist) = snapshot.playlists().get(playlist_id) else {
            return Ok(false);
        };
        let removed = playlist
            .remove_at_with(index, || self.playlist_source.remove_at(&playlist.url, index))?;
        Ok(removed.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{LibraryDump, MemoryFile, MemoryLibrary};

    fn index() -> (Arc<MemoryLibrary>, LibraryIndex) {
        let library = Arc::new(MemoryLibrary::new(LibraryDump {
            files: vec![MemoryFile::new("a", "Artist", "Album", "One")],
            playlists: vec![],
        }));
        let index = LibraryIndex::new(library.clone(), library.clone());
        (library, index)
    }

    #[test]
    fn first_access_builds_once() {
        let (library, index) = index();
        assert!(!index.is_built());
        let first = index.snapshot().unwrap();
        let second = index.snapshot().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.generation(), 1);
        assert_eq!(library.file_enumerations(), 1);
    }

    #[test]
    fn invalidate_rebuilds_on_next_access() {
        let (library, index) = index();
        index.snapshot().unwrap();
        library.push_file(MemoryFile::new("b", "Artist", "Album", "Two"));
        index.invalidate();
        assert!(index.is_stale());

        let snapshot = index.snapshot().unwrap();
        assert_eq!(snapshot.generation(), 2);
        assert_eq!(snapshot.catalog().get_tracks_count(), 2);
        assert!(!index.is_stale());
    }

    #[test]
    fn failed_first_build_is_an_error() {
        let library = Arc::new(MemoryLibrary::new(LibraryDump {
            files: vec![
                MemoryFile::new("dup", "A", "B", "C"),
                MemoryFile::new("dup", "A", "B", "C"),
            ],
            playlists: vec![],
        }));
        let index = LibraryIndex::new(library.clone(), library);
        assert!(matches!(
            index.snapshot(),
            Err(BuildError::DuplicateUrl { .. })
        ));
        assert!(!index.is_built());
    }
}
