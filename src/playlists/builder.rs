//! Resolves the host playlists against a built catalog.

use super::{Playlist, PlaylistId};
use crate::catalog::{BuildError, Catalog};
use crate::source::PlaylistSource;
use tracing::debug;

/// Reads every playlist of `source`. Ids start at 1 for each build. Member
/// urls missing from `catalog` are dropped.
pub fn build_playlists(
    source: &dyn PlaylistSource,
    catalog: &Catalog,
) -> Result<Vec<Playlist>, BuildError> {
    let mut playlists = vec![];
    for entry in source.open_playlists()? {
        if entry.url.is_empty() {
            break;
        }
        let mut tracks = vec![];
        let mut dropped = 0;
        for url in source.open_playlist_files(&entry.url)? {
            if url.is_empty() {
                break;
            }
            match catalog.get_track_by_url(&url) {
                Some(track) => tracks.push(track.id),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            debug!(
                "Playlist {} has {} files missing from the catalog",
                entry.name, dropped
            );
        }
        let id = PlaylistId(playlists.len() as u32 + 1);
        playlists.push(Playlist::new(id, entry.name, entry.url, tracks));
    }
    Ok(playlists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{build_catalog, TrackId};
    use crate::source::{LibraryDump, MemoryFile, MemoryLibrary, MemoryPlaylist};

    #[test]
    fn unresolved_members_are_dropped() {
        let library = MemoryLibrary::new(LibraryDump {
            files: vec![
                MemoryFile::new("a", "Artist", "Album", "One"),
                MemoryFile::new("b", "Artist", "Album", "Two"),
            ],
            playlists: vec![
                MemoryPlaylist::new("pl-x", "First", &["b", "gone", "a"]),
                MemoryPlaylist::new("pl-y", "Second", &[]),
            ],
        });
        let catalog = build_catalog(&library, "").unwrap().catalog;
        let playlists = build_playlists(&library, &catalog).unwrap();

        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[0].id, PlaylistId(1));
        assert_eq!(playlists[0].track_ids(), vec![TrackId(2), TrackId(1)]);
        assert_eq!(playlists[1].id, PlaylistId(2));
        assert_eq!(playlists[1].track_count(), 0);
    }

    #[test]
    fn stops_at_first_empty_url() {
        let library = MemoryLibrary::new(LibraryDump {
            files: vec![],
            playlists: vec![
                MemoryPlaylist::new("pl-1", "One", &[]),
                MemoryPlaylist::new("", "Terminator", &[]),
                MemoryPlaylist::new("pl-3", "Never read", &[]),
            ],
        });
        let catalog = build_catalog(&library, "").unwrap().catalog;
        assert_eq!(build_playlists(&library, &catalog).unwrap().len(), 1);
    }
}
