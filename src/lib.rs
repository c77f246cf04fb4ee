//! Media Catalog Library
//!
//! Indexes a host media library (files and playlists) into an immutable
//! artist/album/track catalog and answers browse and search queries
//! against it, while background rebuilds swap in fresh snapshots.

pub mod catalog;
pub mod config;
pub mod playlists;
pub mod projection;
pub mod query;
pub mod refresh;
pub mod snapshot;
pub mod source;

// Re-export commonly used types for convenience
pub use catalog::{Album, AlbumId, Artist, ArtistId, BuildError, Catalog, Track, TrackId};
pub use playlists::{Playlist, PlaylistId};
pub use query::{FilterField, Filters, Page, QueryError};
pub use refresh::{spawn_refresh_worker, RefreshHandle, RefreshReason};
pub use snapshot::{LibraryIndex, PlaylistError, Snapshot};
pub use source::{LibrarySource, MemoryLibrary, PlaylistSource};
