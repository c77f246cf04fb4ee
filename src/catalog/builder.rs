//! Builds the artist -> album -> track graph from a flat library enumeration.
//!
//! Rows missing one of the identity tags (album artist, album, title) are
//! skipped without consuming an id. Unparsable duration segments and ratings
//! degrade to zero and are recorded as [`BuildProblem`]s.

use super::{Album, AlbumId, Artist, ArtistId, Catalog, Track, TrackId, EMPTY_TAG};
use crate::source::{FileProperty, LibrarySource, MetaField};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Library source failed: {0}")]
    Source(#[from] anyhow::Error),

    #[error("Duplicate track url in catalog: {url}")]
    DuplicateUrl { url: String },
}

/// A non-fatal issue found while building. The affected value was zeroed.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildProblem {
    UnparsableDuration {
        url: String,
        duration: String,
        segment: String,
    },
    UnparsableRating {
        url: String,
        rating: String,
    },
}

pub struct CatalogBuild {
    pub catalog: Catalog,
    pub problems: Vec<BuildProblem>,
}

/// Parses an `[[h:]m:]s` duration into milliseconds. Each `:` separated
/// segment is folded into a base-60 accumulator; segments that are not
/// integers count as zero and are reported through `on_bad_segment`.
pub fn parse_duration_ms(duration: &str, mut on_bad_segment: impl FnMut(&str)) -> i64 {
    if duration.trim().is_empty() {
        return 0;
    }
    let seconds = duration.split(':').fold(0i64, |acc, segment| {
        let value = match segment.trim().parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                on_bad_segment(segment);
                0
            }
        };
        acc.saturating_mul(60).saturating_add(value)
    });
    seconds.saturating_mul(1000)
}

/// Leading digits of a tag as a number ("2004-03-01" -> 2004), 0 otherwise.
fn parse_leading_int(value: &str) -> i32 {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

fn or_empty_tag(value: String) -> String {
    if value.is_empty() {
        EMPTY_TAG.to_owned()
    } else {
        value
    }
}

#[derive(Default)]
struct CatalogBuilder {
    artists: Vec<Artist>,
    albums: Vec<Album>,
    tracks: Vec<Track>,
    artists_by_name: HashMap<String, ArtistId>,
    // First album inserted with a given title under an artist wins.
    albums_by_artist_title: HashMap<(ArtistId, String), AlbumId>,
    problems: Vec<BuildProblem>,
}

impl CatalogBuilder {
    fn resolve_artist(&mut self, name: String) -> ArtistId {
        match self.artists_by_name.entry(name) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let id = ArtistId(self.artists.len() as u32 + 1);
                self.artists.push(Artist {
                    id,
                    name: entry.key().clone(),
                    album_ids: vec![],
                });
                entry.insert(id);
                id
            }
        }
    }

    fn resolve_album(&mut self, artist_id: ArtistId, title: String) -> AlbumId {
        match self.albums_by_artist_title.entry((artist_id, title)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let id = AlbumId(self.albums.len() as u32 + 1);
                self.albums.push(Album {
                    id,
                    title: entry.key().1.clone(),
                    artist_id,
                    track_ids: vec![],
                });
                self.artists[artist_id.0 as usize - 1].album_ids.push(id);
                entry.insert(id);
                id
            }
        }
    }

    fn add_file(&mut self, source: &dyn LibrarySource, url: String) -> Option<TrackId> {
        let artist_name = source.tag(&url, MetaField::AlbumArtist);
        let album_title = source.tag(&url, MetaField::Album);
        let title = source.tag(&url, MetaField::TrackTitle);
        if artist_name.is_empty() || album_title.is_empty() || title.is_empty() {
            debug!("Skipping {} because of missing identity tags", url);
            return None;
        }

        let duration = source.property(&url, FileProperty::Duration);
        let duration_ms = parse_duration_ms(&duration, |segment| {
            debug!("Can not parse duration: {} ({})", duration, segment);
            self.problems.push(BuildProblem::UnparsableDuration {
                url: url.clone(),
                duration: duration.clone(),
                segment: segment.to_owned(),
            });
        });

        let rating_tag = source.tag(&url, MetaField::Rating);
        let rating = if rating_tag.trim().is_empty() {
            0.0
        } else {
            match rating_tag.trim().parse::<f32>() {
                Ok(rating) => rating,
                Err(_) => {
                    debug!("Can not parse rating: {} ({})", rating_tag, url);
                    self.problems.push(BuildProblem::UnparsableRating {
                        url: url.clone(),
                        rating: rating_tag.clone(),
                    });
                    0.0
                }
            }
        };

        let artist_id = self.resolve_artist(artist_name);
        let album_id = self.resolve_album(artist_id, album_title);
        let id = TrackId(self.tracks.len() as u32 + 1);
        self.tracks.push(Track {
            id,
            title,
            number: source.tag(&url, MetaField::TrackNo),
            year: parse_leading_int(&source.tag(&url, MetaField::Year)),
            rating,
            duration_ms,
            genre: or_empty_tag(source.tag(&url, MetaField::Genre)),
            composer: or_empty_tag(source.tag(&url, MetaField::Composer)),
            disc_number: parse_leading_int(&source.tag(&url, MetaField::DiscNo)),
            album_id,
            url,
        });
        self.albums[album_id.0 as usize - 1].track_ids.push(id);
        Some(id)
    }

    fn finish(self) -> Result<CatalogBuild, BuildError> {
        let mut tracks_by_id = HashMap::with_capacity(self.tracks.len());
        let mut tracks_by_url = HashMap::with_capacity(self.tracks.len());

        let flattened = self
            .artists
            .iter()
            .flat_map(|artist| artist.album_ids.iter())
            .flat_map(|album_id| self.albums[album_id.0 as usize - 1].track_ids.iter());
        for track_id in flattened {
            let index = track_id.0 as usize - 1;
            let track = &self.tracks[index];
            match tracks_by_url.entry(track.url.clone()) {
                Entry::Occupied(_) => {
                    return Err(BuildError::DuplicateUrl {
                        url: track.url.clone(),
                    })
                }
                Entry::Vacant(entry) => {
                    entry.insert(*track_id);
                }
            }
            tracks_by_id.insert(*track_id, index);
        }

        Ok(CatalogBuild {
            catalog: Catalog::from_parts(
                self.artists,
                self.albums,
                self.tracks,
                self.artists_by_name,
                tracks_by_id,
                tracks_by_url,
            ),
            problems: self.problems,
        })
    }
}

/// Consumes the whole file enumeration of `source` and returns the catalog
/// together with the non-fatal problems found. Only a failure of the source
/// itself or a duplicate url aborts the build.
pub fn build_catalog(source: &dyn LibrarySource, filter: &str) -> Result<CatalogBuild, BuildError> {
    let mut builder = CatalogBuilder::default();
    let files = source.open_files(filter)?;
    for url in files {
        if url.is_empty() {
            break;
        }
        builder.add_file(source, url);
    }
    builder.finish()
}
