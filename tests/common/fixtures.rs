//! Fixture library creation
//!
//! Creates an in-memory library with 3 artists, 3 albums, 6 indexed tracks
//! (plus one file missing its title) and 3 playlists.
#![allow(dead_code)]

use super::constants::*;
use media_catalog::source::{LibraryDump, MemoryFile, MemoryLibrary, MemoryPlaylist};
use media_catalog::LibraryIndex;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub fn fixture_dump() -> LibraryDump {
    LibraryDump {
        files: vec![
            MemoryFile::new(TRACK_1_URL, ARTIST_1_NAME, ALBUM_1_TITLE, TRACK_1_TITLE)
                .genre("Rock")
                .composer("Alex Writer")
                .track_no("1")
                .duration("3:30")
                .rating("4")
                .year("2001"),
            MemoryFile::new(TRACK_2_URL, ARTIST_1_NAME, ALBUM_1_TITLE, TRACK_2_TITLE)
                .genre("Rock")
                .composer("Alex Writer")
                .track_no("2")
                .duration("4:05"),
            MemoryFile::new(TRACK_3_URL, ARTIST_2_NAME, ALBUM_2_TITLE, TRACK_3_TITLE)
                .genre("Jazz")
                .composer("Sam Keys")
                .track_no("1")
                .duration("1:02:03")
                .rating("4.5"),
            MemoryFile::new(TRACK_4_URL, ARTIST_2_NAME, ALBUM_2_TITLE, TRACK_4_TITLE)
                .genre("Jazz Fusion")
                .composer("Sam Keys")
                .track_no("2"),
            MemoryFile::new(TRACK_5_URL, ARTIST_1_NAME, ALBUM_1_TITLE, TRACK_5_TITLE)
                .genre("Rock")
                .track_no("3"),
            MemoryFile::new(BROKEN_URL, ARTIST_1_NAME, ALBUM_1_TITLE, "").genre("Rock"),
            MemoryFile::new(TRACK_6_URL, ARTIST_3_NAME, ALBUM_3_TITLE, TRACK_6_TITLE)
                .genre("Podcast"),
        ],
        playlists: vec![
            MemoryPlaylist::new(
                PLAYLIST_1_URL,
                PLAYLIST_1_NAME,
                &[TRACK_3_URL, TRACK_2_URL, MISSING_URL],
            ),
            MemoryPlaylist::new(PLAYLIST_2_URL, PLAYLIST_2_NAME, &[TRACK_1_URL]),
            MemoryPlaylist::new(
                PLAYLIST_3_URL,
                PLAYLIST_3_NAME,
                &[TRACK_1_URL, TRACK_2_URL, TRACK_3_URL, TRACK_4_URL, TRACK_5_URL],
            ),
        ],
    }
}

pub fn fixture_library() -> Arc<MemoryLibrary> {
    Arc::new(MemoryLibrary::new(fixture_dump()))
}

/// An index over the fixture library. The library is returned as well so
/// tests can edit it and inspect the host side of playlist edits.
pub fn fixture_index() -> (Arc<MemoryLibrary>, LibraryIndex) {
    let library = fixture_library();
    let index = LibraryIndex::new(library.clone(), library.clone());
    (library, index)
}

/// Writes the fixture library as a JSON dump.
pub fn write_library_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let json = serde_json::to_string_pretty(&fixture_dump()).unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}
