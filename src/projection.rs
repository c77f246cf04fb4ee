//! Flat, serializable views of catalog entities, in the shape the protocol
//! layer encodes them.

use crate::catalog::{Album, AlbumId, Artist, ArtistId, Catalog, Track, TrackId};
use crate::playlists::{Playlist, PlaylistId};
use serde::Serialize;

/// Converts a 0-5 rating to the 0-100 scale remotes display.
pub fn rating_percent(rating: f32) -> u8 {
    (rating * 20.0).round().clamp(0.0, 100.0) as u8
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackSummary {
    pub id: TrackId,
    pub title: String,
    pub album_id: AlbumId,
    pub album: String,
    pub artist_id: ArtistId,
    pub artist: String,
    pub disc_number: i32,
    pub track_number: u16,
    pub genre: String,
    pub composer: String,
    pub duration_ms: i64,
    pub rating: u8,
    pub year: i32,
}

impl TrackSummary {
    pub fn new(catalog: &Catalog, track: &Track) -> TrackSummary {
        let album = catalog.track_album(track);
        let artist = catalog.album_artist(album);
        TrackSummary {
            id: track.id,
            title: track.title.clone(),
            album_id: album.id,
            album: album.title.clone(),
            artist_id: artist.id,
            artist: artist.name.clone(),
            disc_number: track.disc_number.max(1),
            track_number: track.number.trim().parse().unwrap_or(0),
            genre: track.genre.clone(),
            composer: track.composer.clone(),
            duration_ms: track.duration_ms,
            rating: rating_percent(track.rating),
            year: track.year,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlbumSummary {
    pub id: AlbumId,
    pub title: String,
    pub artist: String,
    pub track_count: usize,
}

impl AlbumSummary {
    pub fn new(catalog: &Catalog, album: &Album) -> AlbumSummary {
        AlbumSummary {
            id: album.id,
            title: album.title.clone(),
            artist: catalog.album_artist(album).name.clone(),
            track_count: album.track_ids.len(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArtistSummary {
    pub id: ArtistId,
    pub name: String,
    pub album_count: usize,
    pub track_count: usize,
}

impl ArtistSummary {
    pub fn new(catalog: &Catalog, artist: &Artist) -> ArtistSummary {
        ArtistSummary {
            id: artist.id,
            name: artist.name.clone(),
            album_count: artist.album_ids.len(),
            track_count: catalog.artist_track_count(artist),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlaylistSummary {
    pub id: PlaylistId,
    pub name: String,
    pub track_count: usize,
}

impl From<&Playlist> for PlaylistSummary {
    fn from(playlist: &Playlist) -> Self {
        PlaylistSummary {
            id: playlist.id,
            name: playlist.name.clone(),
            track_count: playlist.track_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::source::{LibraryDump, MemoryFile, MemoryLibrary};

    #[test]
    fn rating_is_scaled_to_percent() {
        assert_eq!(rating_percent(4.5), 90);
        assert_eq!(rating_percent(0.0), 0);
        assert_eq!(rating_percent(-1.0), 0);
        assert_eq!(rating_percent(5.0), 100);
    }

    #[test]
    fn track_summary_normalizes_numbers() {
        let library = MemoryLibrary::new(LibraryDump {
            files: vec![
                MemoryFile::new("a", "Artist", "Album", "One")
                    .track_no("7")
                    .rating("4.5")
                    .duration("3:00"),
                MemoryFile::new("b", "Artist", "Album", "Two")
                    .track_no("B-side")
                    .disc("3"),
            ],
            playlists: vec![],
        });
        let catalog = build_catalog(&library, "").unwrap().catalog;

        let first = TrackSummary::new(&catalog, catalog.get_track(TrackId(1)).unwrap());
        assert_eq!(first.track_number, 7);
        assert_eq!(first.disc_number, 1);
        assert_eq!(first.rating, 90);
        assert_eq!(first.duration_ms, 180_000);
        assert_eq!(first.artist, "Artist");
        assert_eq!(first.album_id, AlbumId(1));

        let second = TrackSummary::new(&catalog, catalog.get_track(TrackId(2)).unwrap());
        assert_eq!(second.track_number, 0);
        assert_eq!(second.disc_number, 3);

        let artist = catalog.get_artist(ArtistId(1)).unwrap();
        let summary = ArtistSummary::new(&catalog, artist);
        assert_eq!((summary.album_count, summary.track_count), (1, 2));
    }
}
