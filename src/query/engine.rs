use super::{paginate, FieldMatcher, FilterField, Filters, Page, QueryError};
use crate::catalog::{Album, AlbumId, Artist, Catalog, Track, TrackId};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Ascending, case-insensitive first, then ordinal so the order is total.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// `false` when a media-kind filter is present and does not ask for music.
fn wants_music(filters: &Filters) -> bool {
    match filters.get(FilterField::MediaKind) {
        None => true,
        Some(kinds) => kinds.iter().any(|kind| {
            let kind = kind.trim();
            kind == "1" || kind.eq_ignore_ascii_case("music")
        }),
    }
}

fn parse_id(field: FilterField, value: &str) -> Result<u32, QueryError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| QueryError::InvalidId {
            field,
            value: value.to_owned(),
        })
}

/// Artists picked by the artist-name filter. A wildcard scans every artist;
/// exact names are looked up one by one, case-sensitively, in filter order.
fn named_artists<'a>(catalog: &'a Catalog, filters: &Filters) -> Option<Vec<&'a Artist>> {
    let names = filters.get(FilterField::ArtistName)?;
    let artists = match FieldMatcher::new(names) {
        matcher @ FieldMatcher::Contains(_) => catalog
            .iter_artists()
            .filter(|artist| matcher.matches(&artist.name))
            .collect(),
        FieldMatcher::AnyOf(_) => {
            let mut seen = HashSet::new();
            names
                .iter()
                .filter_map(|name| catalog.get_artist_by_name(name))
                .filter(|artist| seen.insert(artist.id))
                .collect()
        }
    };
    Some(artists)
}

pub fn find_artists<'a>(
    catalog: &'a Catalog,
    filters: &Filters,
    page: Option<Page>,
) -> Vec<&'a Artist> {
    debug!("find_artists {:?}", filters);
    let mut artists: Vec<&Artist> = named_artists(catalog, filters)
        .unwrap_or_else(|| catalog.iter_artists().collect());

    // Only the first track of each album is checked.
    if let Some(genres) = filters.matcher(FilterField::Genre) {
        artists.retain(|artist| {
            catalog.artist_albums(artist).any(|album| {
                catalog
                    .album_tracks(album)
                    .next()
                    .is_some_and(|track| genres.matches(&track.genre))
            })
        });
    }

    artists.sort_by(|a, b| compare_text(&a.name, &b.name));
    paginate(artists, page)
}

pub fn find_albums<'a>(
    catalog: &'a Catalog,
    filters: &Filters,
    page: Option<Page>,
) -> Vec<&'a Album> {
    debug!("find_albums {:?}", filters);
    if !wants_music(filters) {
        return vec![];
    }

    let mut albums: Vec<&Album> = match named_artists(catalog, filters) {
        Some(artists) => artists
            .into_iter()
            .flat_map(|artist| catalog.artist_albums(artist))
            .collect(),
        None => catalog.iter_albums().collect(),
    };

    if let Some(genres) = filters.matcher(FilterField::Genre) {
        albums.retain(|album| {
            catalog
                .album_tracks(album)
                .any(|track| genres.matches(&track.genre))
        });
    }
    if let Some(composers) = filters.matcher(FilterField::Composer) {
        albums.retain(|album| {
            catalog
                .album_tracks(album)
                .any(|track| composers.matches(&track.composer))
        });
    }
    if let Some(titles) = filters.matcher(FilterField::AlbumName) {
        albums.retain(|album| titles.matches(&album.title));
    }

    albums.sort_by(|a, b| compare_text(&a.title, &b.title));
    paginate(albums, page)
}

/// Distinct values of one track field, filtered by the same-named filter.
fn find_track_values<'a>(
    catalog: &'a Catalog,
    filters: &Filters,
    field: FilterField,
    value_of: impl Fn(&'a Track) -> &'a str,
    page: Option<Page>,
) -> Vec<&'a str> {
    let matcher = filters.matcher(field);
    let mut seen = HashSet::new();
    let mut values: Vec<&str> = catalog
        .iter_tracks()
        .map(value_of)
        .filter(|value| seen.insert(*value))
        .filter(|value| matcher.as_ref().map_or(true, |m| m.matches(value)))
        .collect();
    values.sort_by(|a, b| compare_text(a, b));
    paginate(values, page)
}

pub fn find_genres<'a>(
    catalog: &'a Catalog,
    filters: &Filters,
    page: Option<Page>,
) -> Vec<&'a str> {
    debug!("find_genres {:?}", filters);
    find_track_values(
        catalog,
        filters,
        FilterField::Genre,
        |track| track.genre.as_str(),
        page,
    )
}

pub fn find_composers<'a>(
    catalog: &'a Catalog,
    filters: &Filters,
    page: Option<Page>,
) -> Vec<&'a str> {
    debug!("find_composers {:?}", filters);
    find_track_values(
        catalog,
        filters,
        FilterField::Composer,
        |track| track.composer.as_str(),
        page,
    )
}

/// Puts `subset` in front of `result`, dropping duplicates.
fn union<'a>(subset: Vec<&'a Track>, result: Vec<&'a Track>) -> Vec<&'a Track> {
    let mut seen = HashSet::with_capacity(subset.len() + result.len());
    subset
        .into_iter()
        .chain(result)
        .filter(|track| seen.insert(track.id))
        .collect()
}

fn tracks_of_albums<'a>(catalog: &'a Catalog, ids: &HashSet<AlbumId>) -> Vec<&'a Track> {
    catalog
        .iter_albums()
        .filter(|album| ids.contains(&album.id))
        .flat_map(|album| catalog.album_tracks(album))
        .collect()
}

fn matching_tracks<'a>(
    catalog: &'a Catalog,
    matcher: &FieldMatcher,
    value_of: impl Fn(&'a Track) -> &'a str,
) -> Vec<&'a Track> {
    catalog
        .iter_tracks()
        .filter(|track| matcher.matches(value_of(*track)))
        .collect()
}

/// Track search. An album-id filter (ids may be comma separated) returns
/// exactly the tracks of those albums and ignores every other filter.
/// Otherwise the genre matches seed the result and the artist, composer,
/// album, title and id matches are unioned into it, in that order. Results
/// keep union order and are not sorted.
pub fn find_tracks<'a>(
    catalog: &'a Catalog,
    filters: &Filters,
    page: Option<Page>,
) -> Result<Vec<&'a Track>, QueryError> {
    debug!("find_tracks {:?}", filters);
    if filters.is_empty() {
        return Ok(vec![]);
    }
    if !wants_music(filters) {
        warn!("Search for a media kind the catalog does not contain");
        return Ok(vec![]);
    }

    if let Some(values) = filters.get(FilterField::AlbumId) {
        let ids = values
            .iter()
            .flat_map(|value| value.split(','))
            .map(|id| parse_id(FilterField::AlbumId, id).map(AlbumId))
            .collect::<Result<HashSet<_>, _>>()?;
        return Ok(paginate(tracks_of_albums(catalog, &ids), page));
    }

    let mut tracks: Vec<&Track> = match filters.matcher(FilterField::Genre) {
        Some(genres) => matching_tracks(catalog, &genres, |track| track.genre.as_str()),
        None => vec![],
    };

    if let Some(artists) = named_artists(catalog, filters) {
        let subset = artists
            .into_iter()
            .flat_map(|artist| catalog.artist_albums(artist))
            .flat_map(|album| catalog.album_tracks(album))
            .collect();
        tracks = union(subset, tracks);
    }
    if let Some(composers) = filters.matcher(FilterField::Composer) {
        let subset = matching_tracks(catalog, &composers, |track| track.composer.as_str());
        tracks = union(subset, tracks);
    }
    if let Some(titles) = filters.matcher(FilterField::AlbumName) {
        let subset = catalog
            .iter_albums()
            .filter(|album| titles.matches(&album.title))
            .flat_map(|album| catalog.album_tracks(album))
            .collect();
        tracks = union(subset, tracks);
    }
    if let Some(titles) = filters.matcher(FilterField::ItemName) {
        let subset = matching_tracks(catalog, &titles, |track| track.title.as_str());
        tracks = union(subset, tracks);
    }
    if let Some(values) = filters.get(FilterField::ItemId) {
        let mut subset = vec![];
        for value in values {
            let id = parse_id(FilterField::ItemId, value)?;
            if let Some(track) = catalog.get_track(TrackId(id)) {
                subset.push(track);
            }
        }
        tracks = union(subset, tracks);
    }

    if tracks.is_empty() {
        warn!("No tracks were found for query: {:?}", filters);
    }
    Ok(paginate(tracks, page))
}
