//! Collaborator traits for the host media library.
//!
//! These abstract the host's file and playlist enumerations so the catalog
//! can be built from the real player or from the in-memory [`MemoryLibrary`].

mod memory;

pub use memory::{LibraryDump, MemoryFile, MemoryLibrary, MemoryPlaylist};

use anyhow::Result;

/// A restartable enumeration of urls. Ends at `None` or at the first empty url.
pub type FileCursor<'a> = Box<dyn Iterator<Item = String> + Send + 'a>;

/// A restartable enumeration of playlists. Ends at `None` or at the first
/// entry with an empty url.
pub type PlaylistCursor<'a> = Box<dyn Iterator<Item = PlaylistEntry> + Send + 'a>;

/// Tags read from each library file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetaField {
    AlbumArtist,
    Album,
    TrackTitle,
    Composer,
    Genre,
    TrackNo,
    DiscNo,
    Year,
    Rating,
}

/// File properties computed by the host rather than stored as tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileProperty {
    Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub url: String,
    pub name: String,
}

/// Read access to the host's media files. Consulted only while building.
pub trait LibrarySource: Send + Sync {
    /// Opens a fresh enumeration of the file urls matching `filter`
    /// (an empty filter means the whole library).
    fn open_files(&self, filter: &str) -> Result<FileCursor<'_>>;

    /// The tag value, or an empty string when absent.
    fn tag(&self, url: &str, field: MetaField) -> String;

    /// The property value, or an empty string when absent.
    fn property(&self, url: &str, property: FileProperty) -> String;
}

/// The host's playlists: enumeration for builds, edits for the incremental
/// playlist mutations.
pub trait PlaylistSource: Send + Sync {
    fn open_playlists(&self) -> Result<PlaylistCursor<'_>>;

    fn open_playlist_files(&self, url: &str) -> Result<FileCursor<'_>>;

    /// Creates an empty playlist and returns its url.
    fn create_playlist(&self, name: &str) -> Result<String>;

    fn delete_playlist(&self, url: &str) -> Result<()>;

    fn append_files(&self, url: &str, files: &[String]) -> Result<()>;

    /// Removes the file at the 0-based `index`.
    fn remove_at(&self, url: &str, index: usize) -> Result<()>;
}
