//! In-memory library source.
//!
//! Holds a [`LibraryDump`] (loadable from JSON) and serves both collaborator
//! traits from it. Used by the CLI and by tests.

use super::{
    FileCursor, FileProperty, LibrarySource, MetaField, PlaylistCursor, PlaylistEntry,
    PlaylistSource,
};
use anyhow::{bail, Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryFile {
    pub url: String,
    pub album_artist: String,
    pub album: String,
    pub title: String,
    pub composer: String,
    pub genre: String,
    pub track_no: String,
    pub disc_no: String,
    pub year: String,
    pub rating: String,
    pub duration: String,
}

impl MemoryFile {
    pub fn new(url: &str, album_artist: &str, album: &str, title: &str) -> MemoryFile {
        MemoryFile {
            url: url.to_owned(),
            album_artist: album_artist.to_owned(),
            album: album.to_owned(),
            title: title.to_owned(),
            ..Default::default()
        }
    }

    pub fn genre(mut self, genre: &str) -> Self {
        self.genre = genre.to_owned();
        self
    }

    pub fn composer(mut self, composer: &str) -> Self {
        self.composer = composer.to_owned();
        self
    }

    pub fn track_no(mut self, track_no: &str) -> Self {
        self.track_no = track_no.to_owned();
        self
    }

    pub fn disc(mut self, disc_no: &str) -> Self {
        self.disc_no = disc_no.to_owned();
        self
    }

    pub fn year(mut self, year: &str) -> Self {
        self.year = year.to_owned();
        self
    }

    pub fn rating(mut self, rating: &str) -> Self {
        self.rating = rating.to_owned();
        self
    }

    pub fn duration(mut self, duration: &str) -> Self {
        self.duration = duration.to_owned();
        self
    }

    fn tag(&self, field: MetaField) -> &str {
        match field {
            MetaField::AlbumArtist => &self.album_artist,
            MetaField::Album => &self.album,
            MetaField::TrackTitle => &self.title,
            MetaField::Composer => &self.composer,
            MetaField::Genre => &self.genre,
            MetaField::TrackNo => &self.track_no,
            MetaField::DiscNo => &self.disc_no,
            MetaField::Year => &self.year,
            MetaField::Rating => &self.rating,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryPlaylist {
    pub url: String,
    pub name: String,
    pub files: Vec<String>,
}

impl MemoryPlaylist {
    pub fn new(url: &str, name: &str, files: &[&str]) -> MemoryPlaylist {
        MemoryPlaylist {
            url: url.to_owned(),
            name: name.to_owned(),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Serialized form of a whole library.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryDump {
    pub files: Vec<MemoryFile>,
    pub playlists: Vec<MemoryPlaylist>,
}

struct State {
    dump: LibraryDump,
    // First file wins when the dump repeats a url.
    files_by_url: HashMap<String, usize>,
}

impl State {
    fn new(dump: LibraryDump) -> State {
        let mut files_by_url = HashMap::new();
        for (i, file) in dump.files.iter().enumerate() {
            files_by_url.entry(file.url.clone()).or_insert(i);
        }
        State { dump, files_by_url }
    }

    fn file(&self, url: &str) -> Option<&MemoryFile> {
        self.files_by_url.get(url).map(|i| &self.dump.files[*i])
    }

    fn playlist_mut(&mut self, url: &str) -> Result<&mut MemoryPlaylist> {
        match self.dump.playlists.iter_mut().find(|p| p.url == url) {
            Some(playlist) => Ok(playlist),
            None => bail!("No playlist at {}", url),
        }
    }
}

pub struct MemoryLibrary {
    state: RwLock<State>,
    file_enumerations: AtomicUsize,
    created_playlists: AtomicUsize,
}

impl MemoryLibrary {
    pub fn new(dump: LibraryDump) -> MemoryLibrary {
        MemoryLibrary {
            state: RwLock::new(State::new(dump)),
            file_enumerations: AtomicUsize::new(0),
            created_playlists: AtomicUsize::new(0),
        }
    }

    pub fn from_json(json: &str) -> Result<MemoryLibrary> {
        let dump: LibraryDump =
            serde_json::from_str(json).context("Failed to parse library dump")?;
        Ok(MemoryLibrary::new(dump))
    }

    pub fn load(path: &Path) -> Result<MemoryLibrary> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read library dump: {:?}", path))?;
        MemoryLibrary::from_json(&content).with_context(|| format!("In {:?}", path))
    }

    /// Replaces every file, keeping the playlists.
    pub fn replace_files(&self, files: Vec<MemoryFile>) {
        let mut state = self.state.write();
        let playlists = std::mem::take(&mut state.dump.playlists);
        *state = State::new(LibraryDump { files, playlists });
    }

    pub fn push_file(&self, file: MemoryFile) {
        let mut state = self.state.write();
        let index = state.dump.files.len();
        state.files_by_url.entry(file.url.clone()).or_insert(index);
        state.dump.files.push(file);
    }

    pub fn push_playlist(&self, playlist: MemoryPlaylist) {
        self.state.write().dump.playlists.push(playlist);
    }

    /// Files currently stored in the playlist at `url`.
    pub fn playlist_files(&self, url: &str) -> Option<Vec<String>> {
        self.state
            .read()
            .dump
            .playlists
            .iter()
            .find(|p| p.url == url)
            .map(|p| p.files.clone())
    }

    pub fn playlists_count(&self) -> usize {
        self.state.read().dump.playlists.len()
    }

    /// How many times a file enumeration was opened.
    pub fn file_enumerations(&self) -> usize {
        self.file_enumerations.load(Ordering::SeqCst)
    }
}

impl LibrarySource for MemoryLibrary {
    fn open_files(&self, filter: &str) -> Result<FileCursor<'_>> {
        self.file_enumerations.fetch_add(1, Ordering::SeqCst);
        let urls: Vec<String> = self
            .state
            .read()
            .dump
            .files
            .iter()
            .filter(|f| filter.is_empty() || f.url.contains(filter))
            .map(|f| f.url.clone())
            .collect();
        Ok(Box::new(urls.into_iter()))
    }

    fn tag(&self, url: &str, field: MetaField) -> String {
        self.state
            .read()
            .file(url)
            .map(|f| f.tag(field).to_owned())
            .unwrap_or_default()
    }

    fn property(&self, url: &str, property: FileProperty) -> String {
        let state = self.state.read();
        match (state.file(url), property) {
            (Some(file), FileProperty::Duration) => file.duration.clone(),
            (None, _) => String::new(),
        }
    }
}

impl PlaylistSource for MemoryLibrary {
    fn open_playlists(&self) -> Result<PlaylistCursor<'_>> {
        let entries: Vec<PlaylistEntry> = self
            .state
            .read()
            .dump
            .playlists
            .iter()
            .map(|p| PlaylistEntry {
                url: p.url.clone(),
                name: p.name.clone(),
            })
            .collect();
        Ok(Box::new(entries.into_iter()))
    }

    fn open_playlist_files(&self, url: &str) -> Result<FileCursor<'_>> {
        match self.playlist_files(url) {
            Some(files) => Ok(Box::new(files.into_iter())),
            None => bail!("No playlist at {}", url),
        }
    }

    fn create_playlist(&self, name: &str) -> Result<String> {
        let n = self.created_playlists.fetch_add(1, Ordering::SeqCst) + 1;
        let url = format!("memory://playlists/new-{}", n);
        self.push_playlist(MemoryPlaylist {
            url: url.clone(),
            name: name.to_owned(),
            files: vec![],
        });
        Ok(url)
    }

    fn delete_playlist(&self, url: &str) -> Result<()> {
        let mut state = self.state.write();
        let before = state.dump.playlists.len();
        state.dump.playlists.retain(|p| p.url != url);
        if state.dump.playlists.len() == before {
            bail!("No playlist at {}", url);
        }
        Ok(())
    }

    fn append_files(&self, url: &str, files: &[String]) -> Result<()> {
        let mut state = self.state.write();
        state.playlist_mut(url)?.files.extend_from_slice(files);
        Ok(())
    }

    fn remove_at(&self, url: &str, index: usize) -> Result<()> {
        let mut state = self.state.write();
        let playlist = state.playlist_mut(url)?;
        if index >= playlist.files.len() {
            bail!("Index {} out of range for playlist {}", index, url);
        }
        playlist.files.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_library_dump() {
        let json = r#"
        {
            "files": [
                {
                    "url": "C:\\Music\\a.mp3",
                    "album_artist": "Miles Davis",
                    "album": "Kind of Blue",
                    "title": "So What",
                    "genre": "Jazz",
                    "duration": "9:22"
                }
            ],
            "playlists": [
                { "url": "pl-1", "name": "Favourites", "files": ["C:\\Music\\a.mp3"] }
            ]
        }
        "#;
        let library = MemoryLibrary::from_json(json).unwrap();
        assert_eq!(
            library.tag("C:\\Music\\a.mp3", MetaField::Genre),
            "Jazz".to_string()
        );
        assert_eq!(
            library.property("C:\\Music\\a.mp3", FileProperty::Duration),
            "9:22".to_string()
        );
        assert_eq!(library.tag("C:\\Music\\a.mp3", MetaField::Composer), "");
        assert_eq!(library.tag("missing", MetaField::Genre), "");
        assert_eq!(
            library.playlist_files("pl-1"),
            Some(vec!["C:\\Music\\a.mp3".to_string()])
        );
    }

    #[test]
    fn filter_restricts_enumeration() {
        let library = MemoryLibrary::new(LibraryDump {
            files: vec![
                MemoryFile::new("music/a.mp3", "A", "B", "C"),
                MemoryFile::new("podcasts/b.mp3", "A", "B", "D"),
            ],
            playlists: vec![],
        });
        let urls: Vec<String> = library.open_files("music/").unwrap().collect();
        assert_eq!(urls, vec!["music/a.mp3".to_string()]);
        assert_eq!(library.open_files("").unwrap().count(), 2);
        assert_eq!(library.file_enumerations(), 2);
    }

    #[test]
    fn playlist_edits_are_applied() {
        let library = MemoryLibrary::new(LibraryDump::default());
        let url = library.create_playlist("Road trip").unwrap();
        library
            .append_files(&url, &["a".to_string(), "b".to_string()])
            .unwrap();
        library.remove_at(&url, 0).unwrap();
        assert_eq!(library.playlist_files(&url), Some(vec!["b".to_string()]));
        assert!(library.remove_at(&url, 5).is_err());
        library.delete_playlist(&url).unwrap();
        assert_eq!(library.playlists_count(), 0);
        assert!(library.delete_playlist(&url).is_err());
    }
}
