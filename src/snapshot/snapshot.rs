use crate::catalog::{
    build_catalog, Album, AlbumId, Artist, BuildError, BuildProblem, Catalog, Track, TrackId,
};
use crate::playlists::{build_playlists, Playlist, PlaylistId, PlaylistSet};
use crate::query::{self, Filters, Page, QueryError};
use crate::source::{LibrarySource, PlaylistSource};
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub generation: u64,
    pub artists: usize,
    pub albums: usize,
    pub tracks: usize,
    pub playlists: usize,
}

/// One published build of the library. The catalog never changes after the
/// build; only the playlist set accepts edits.
#[derive(Debug)]
pub struct Snapshot {
    generation: u64,
    catalog: Catalog,
    playlists: PlaylistSet,
    problems: Vec<BuildProblem>,
}

impl Snapshot {
    /// Runs the catalog and playlist builders end to end.
    pub fn build(
        generation: u64,
        library: &dyn LibrarySource,
        playlist_source: &dyn PlaylistSource,
        file_filter: &str,
    ) -> Result<Snapshot, BuildError> {
        let build = build_catalog(library, file_filter)?;
        let playlists = build_playlists(playlist_source, &build.catalog)?;
        Ok(Snapshot {
            generation,
            catalog: build.catalog,
            playlists: PlaylistSet::new(playlists),
            problems: build.problems,
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn playlists(&self) -> &PlaylistSet {
        &self.playlists
    }

    /// Non-fatal problems found while building.
    pub fn problems(&self) -> &[BuildProblem] {
        &self.problems
    }

    pub fn find_artists(&self, filters: &Filters, page: Option<Page>) -> Vec<&Artist> {
        query::find_artists(&self.catalog, filters, page)
    }

    pub fn find_albums(&self, filters: &Filters, page: Option<Page>) -> Vec<&Album> {
        query::find_albums(&self.catalog, filters, page)
    }

    pub fn find_genres(&self, filters: &Filters, page: Option<Page>) -> Vec<&str> {
        query::find_genres(&self.catalog, filters, page)
    }

    pub fn find_composers(&self, filters: &Filters, page: Option<Page>) -> Vec<&str> {
        query::find_composers(&self.catalog, filters, page)
    }

    pub fn find_tracks(
        &self,
        filters: &Filters,
        page: Option<Page>,
    ) -> Result<Vec<&Track>, QueryError> {
        query::find_tracks(&self.catalog, filters, page)
    }

    pub fn track_by_id(&self, id: TrackId) -> Option<&Track> {
        self.catalog.get_track(id)
    }

    pub fn track_by_url(&self, url: &str) -> Option<&Track> {
        self.catalog.get_track_by_url(url)
    }

    pub fn album_by_id(&self, id: AlbumId) -> Option<&Album> {
        self.catalog.get_album(id)
    }

    /// Playlists in id order, without unnamed ones and those whose name
    /// contains one of `hidden_markers`.
    pub fn visible_playlists(&self, hidden_markers: &[String]) -> Vec<Arc<Playlist>> {
        self.playlists
            .all()
            .into_iter()
            .filter(|playlist| {
                !playlist.name.is_empty()
                    && !hidden_markers
                        .iter()
                        .any(|marker| playlist.name.contains(marker.as_str()))
            })
            .collect()
    }

    /// Up to `limit` tracks of a playlist. Unknown playlists have none.
    pub fn playlist_tracks(&self, id: PlaylistId, limit: usize) -> Vec<&Track> {
        let Some(playlist) = self.playlists.get(id) else {
            return vec![];
        };
        playlist
            .track_ids()
            .into_iter()
            .filter_map(|track_id| self.catalog.get_track(track_id))
            .take(limit)
            .collect()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            generation: self.generation,
            artists: self.catalog.get_artists_count(),
            albums: self.catalog.get_albums_count(),
            tracks: self.catalog.get_tracks_count(),
            playlists: self.playlists.len(),
        }
    }
}
