use super::{Album, AlbumId, Artist, ArtistId, Track, TrackId};
use std::collections::HashMap;

/// Maps a sequential id (starting at 1) to its slot in the owning vector.
fn slot(id: u32) -> Option<usize> {
    (id as usize).checked_sub(1)
}

/// The artist -> album -> track graph produced by a single build, plus the
/// id and url lookup tables. Never mutated once built.
#[derive(Debug, Default)]
pub struct Catalog {
    artists: Vec<Artist>,
    albums: Vec<Album>,
    tracks: Vec<Track>,
    artists_by_name: HashMap<String, ArtistId>,
    tracks_by_id: HashMap<TrackId, usize>,
    tracks_by_url: HashMap<String, TrackId>,
}

impl Catalog {
    /// Assembles a catalog from already cross-referenced entities. Each
    /// vector must be indexed by `id - 1`.
    pub(super) fn from_parts(
        artists: Vec<Artist>,
        albums: Vec<Album>,
        tracks: Vec<Track>,
        artists_by_name: HashMap<String, ArtistId>,
        tracks_by_id: HashMap<TrackId, usize>,
        tracks_by_url: HashMap<String, TrackId>,
    ) -> Catalog {
        Catalog {
            artists,
            albums,
            tracks,
            artists_by_name,
            tracks_by_id,
            tracks_by_url,
        }
    }

    pub fn get_artists_count(&self) -> usize {
        self.artists.len()
    }

    pub fn get_albums_count(&self) -> usize {
        self.albums.len()
    }

    pub fn get_tracks_count(&self) -> usize {
        self.tracks.len()
    }

    /// Artists in first-seen order.
    pub fn iter_artists(&self) -> impl Iterator<Item = &Artist> {
        self.artists.iter()
    }

    /// Albums grouped by artist, in artist order then discovery order.
    pub fn iter_albums(&self) -> impl Iterator<Item = &Album> {
        self.artists
            .iter()
            .flat_map(move |artist| self.artist_albums(artist))
    }

    /// Tracks in catalog order: artist, then album, then discovery order.
    pub fn iter_tracks(&self) -> impl Iterator<Item = &Track> {
        self.iter_albums()
            .flat_map(move |album| self.album_tracks(album))
    }

    pub fn get_artist(&self, id: ArtistId) -> Option<&Artist> {
        slot(id.0).and_then(|i| self.artists.get(i))
    }

    /// Exact, case-sensitive name lookup.
    pub fn get_artist_by_name(&self, name: &str) -> Option<&Artist> {
        self.artists_by_name
            .get(name)
            .and_then(|id| self.get_artist(*id))
    }

    pub fn get_album(&self, id: AlbumId) -> Option<&Album> {
        slot(id.0).and_then(|i| self.albums.get(i))
    }

    pub fn get_track(&self, id: TrackId) -> Option<&Track> {
        self.tracks_by_id.get(&id).map(|i| &self.tracks[*i])
    }

    pub fn get_track_by_url(&self, url: &str) -> Option<&Track> {
        self.tracks_by_url
            .get(url)
            .and_then(|id| self.get_track(*id))
    }

    pub fn artist_albums<'a>(&'a self, artist: &'a Artist) -> impl Iterator<Item = &'a Album> {
        artist
            .album_ids
            .iter()
            .filter_map(move |id| self.get_album(*id))
    }

    pub fn album_tracks<'a>(&'a self, album: &'a Album) -> impl Iterator<Item = &'a Track> {
        album
            .track_ids
            .iter()
            .filter_map(move |id| self.get_track(*id))
    }

    /// The owning artist of an album built by this catalog.
    pub fn album_artist(&self, album: &Album) -> &Artist {
        &self.artists[album.artist_id.0 as usize - 1]
    }

    /// The owning album of a track built by this catalog.
    pub fn track_album(&self, track: &Track) -> &Album {
        &self.albums[track.album_id.0 as usize - 1]
    }

    pub fn artist_track_count(&self, artist: &Artist) -> usize {
        self.artist_albums(artist)
            .map(|album| album.track_ids.len())
            .sum()
    }
}
