//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When the fixture library changes, update only this file.
#![allow(dead_code)]

use media_catalog::{AlbumId, ArtistId, PlaylistId, TrackId};

// ============================================================================
// Fixture Urls
// ============================================================================

pub const TRACK_1_URL: &str = "music/band/first/01.mp3";
pub const TRACK_2_URL: &str = "music/band/first/02.mp3";
pub const TRACK_3_URL: &str = "music/jazz/night/01.mp3";
pub const TRACK_4_URL: &str = "music/jazz/night/02.mp3";
pub const TRACK_5_URL: &str = "music/band/first/03.mp3";
pub const TRACK_6_URL: &str = "podcasts/talk/01.mp3";

/// Missing its title tag, never indexed
pub const BROKEN_URL: &str = "music/broken/no-title.mp3";

/// Referenced by a playlist but not part of the library
pub const MISSING_URL: &str = "music/missing/file.mp3";

/// Restricts the index to music files
pub const MUSIC_FILTER: &str = "music/";

// ============================================================================
// Fixture Catalog IDs
// ============================================================================

/// "The Test Band"
pub const ARTIST_1_ID: ArtistId = ArtistId(1);
pub const ARTIST_1_NAME: &str = "The Test Band";

/// "Jazz Ensemble"
pub const ARTIST_2_ID: ArtistId = ArtistId(2);
pub const ARTIST_2_NAME: &str = "Jazz Ensemble";

/// "Talk Show", the podcast artist
pub const ARTIST_3_ID: ArtistId = ArtistId(3);
pub const ARTIST_3_NAME: &str = "Talk Show";

pub const ALBUM_1_ID: AlbumId = AlbumId(1);
pub const ALBUM_1_TITLE: &str = "First Album";

pub const ALBUM_2_ID: AlbumId = AlbumId(2);
pub const ALBUM_2_TITLE: &str = "Night Sessions";

pub const ALBUM_3_ID: AlbumId = AlbumId(3);
pub const ALBUM_3_TITLE: &str = "Episode One";

pub const TRACK_1_ID: TrackId = TrackId(1);
pub const TRACK_1_TITLE: &str = "Opening";
pub const TRACK_2_ID: TrackId = TrackId(2);
pub const TRACK_2_TITLE: &str = "Second Song";
pub const TRACK_3_ID: TrackId = TrackId(3);
pub const TRACK_3_TITLE: &str = "Blue Hour";
pub const TRACK_4_ID: TrackId = TrackId(4);
pub const TRACK_4_TITLE: &str = "Late Train";
pub const TRACK_5_ID: TrackId = TrackId(5);
pub const TRACK_5_TITLE: &str = "Closing";
pub const TRACK_6_ID: TrackId = TrackId(6);
pub const TRACK_6_TITLE: &str = "Intro";

pub const TRACKS_COUNT: usize = 6;
pub const MUSIC_TRACKS_COUNT: usize = 5;

// ============================================================================
// Fixture Playlists
// ============================================================================

/// Blue Hour, Second Song and a missing file
pub const PLAYLIST_1_ID: PlaylistId = PlaylistId(1);
pub const PLAYLIST_1_URL: &str = "playlists/favourites.mbp";
pub const PLAYLIST_1_NAME: &str = "Favourites";

/// Hidden by the default markers
pub const PLAYLIST_2_ID: PlaylistId = PlaylistId(2);
pub const PLAYLIST_2_URL: &str = "playlists/accessible.mbp";
pub const PLAYLIST_2_NAME: &str = "Accessible Tracks";

/// Every music track in file order
pub const PLAYLIST_3_ID: PlaylistId = PlaylistId(3);
pub const PLAYLIST_3_URL: &str = "playlists/road-trip.mbp";
pub const PLAYLIST_3_NAME: &str = "Road Trip";

pub const PLAYLISTS_COUNT: usize = 3;
