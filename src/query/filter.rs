use super::QueryError;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

lazy_static! {
    static ref WILDCARD: Regex = Regex::new(r"^[%*](?P<query>.*)[%*]$").unwrap();
}

/// Filterable fields. Parsed from the DMAP/DAAP query keys used by remote
/// clients, or from short names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterField {
    ArtistName,
    AlbumName,
    AlbumId,
    Genre,
    Composer,
    ItemName,
    ItemId,
    MediaKind,
}

impl FilterField {
    pub fn key(&self) -> &'static str {
        match self {
            FilterField::ArtistName => "daap.songartist",
            FilterField::AlbumName => "daap.songalbum",
            FilterField::AlbumId => "daap.songalbumid",
            FilterField::Genre => "daap.songgenre",
            FilterField::Composer => "daap.songcomposer",
            FilterField::ItemName => "dmap.itemname",
            FilterField::ItemId => "dmap.itemid",
            FilterField::MediaKind => "com.apple.itunes.mediakind",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FilterField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daap.songartist" | "artist" => Ok(FilterField::ArtistName),
            "daap.songalbum" | "album" => Ok(FilterField::AlbumName),
            "daap.songalbumid" | "album-id" => Ok(FilterField::AlbumId),
            "daap.songgenre" | "genre" => Ok(FilterField::Genre),
            "daap.songcomposer" | "composer" => Ok(FilterField::Composer),
            "dmap.itemname" | "title" => Ok(FilterField::ItemName),
            "dmap.itemid" | "id" => Ok(FilterField::ItemId),
            "com.apple.itunes.mediakind" | "media-kind" => Ok(FilterField::MediaKind),
            _ => Err(QueryError::UnknownFilter(s.to_owned())),
        }
    }
}

/// The filters of one request. Repeating a field adds values to it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filters {
    values: HashMap<FilterField, Vec<String>>,
}

impl Filters {
    pub fn new() -> Filters {
        Filters::default()
    }

    pub fn with(mut self, field: FilterField, value: &str) -> Filters {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: FilterField, value: &str) {
        self.values
            .entry(field)
            .or_default()
            .push(value.to_owned());
    }

    /// Builds filters from raw `(key, value)` query pairs. Keys that are not
    /// filterable are ignored.
    pub fn from_query_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Filters {
        let mut filters = Filters::new();
        for (key, value) in pairs {
            match key.parse::<FilterField>() {
                Ok(field) => filters.insert(field, value),
                Err(_) => debug!("Ignoring query key {}", key),
            }
        }
        filters
    }

    pub fn get(&self, field: FilterField) -> Option<&[String]> {
        self.values.get(&field).map(|v| v.as_slice())
    }

    pub fn contains(&self, field: FilterField) -> bool {
        self.values.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn matcher(&self, field: FilterField) -> Option<FieldMatcher> {
        self.get(field).map(FieldMatcher::new)
    }
}

/// Case-insensitive text matching for one filter field.
///
/// A single value wrapped in `%` or `*` (`%jazz%`) is a substring match on
/// the unwrapped text; anything else is an exact OR-set.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldMatcher {
    Contains(String),
    AnyOf(Vec<String>),
}

impl FieldMatcher {
    pub fn new(values: &[String]) -> FieldMatcher {
        if let [value] = values {
            if let Some(captures) = WILDCARD.captures(value) {
                return FieldMatcher::Contains(captures["query"].to_lowercase());
            }
        }
        FieldMatcher::AnyOf(values.iter().map(|v| v.to_lowercase()).collect())
    }

    pub fn matches(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        match self {
            FieldMatcher::Contains(needle) => value.contains(needle.as_str()),
            FieldMatcher::AnyOf(values) => values.iter().any(|v| *v == value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn wrapped_value_is_a_substring_match() {
        let matcher = FieldMatcher::new(&values(&["%jazz%"]));
        assert_eq!(matcher, FieldMatcher::Contains("jazz".to_string()));
        assert!(matcher.matches("Jazz Fusion"));
        assert!(!matcher.matches("Rock"));

        let star = FieldMatcher::new(&values(&["*FUS*"]));
        assert!(star.matches("Jazz Fusion"));
    }

    #[test]
    fn plain_values_are_an_exact_or_set() {
        let matcher = FieldMatcher::new(&values(&["Jazz", "Rock"]));
        assert!(matcher.matches("jazz"));
        assert!(matcher.matches("ROCK"));
        assert!(!matcher.matches("Jazz Fusion"));
    }

    #[test]
    fn wildcard_needs_a_single_value() {
        let matcher = FieldMatcher::new(&values(&["%jazz%", "Rock"]));
        assert!(!matcher.matches("Jazz Fusion"));
        assert!(matcher.matches("%JAZZ%"));
    }

    #[test]
    fn parses_dmap_keys_and_short_names() {
        assert_eq!(
            "daap.songgenre".parse::<FilterField>(),
            Ok(FilterField::Genre)
        );
        assert_eq!("album-id".parse::<FilterField>(), Ok(FilterField::AlbumId));
        assert_eq!(
            "daap.nonsense".parse::<FilterField>(),
            Err(QueryError::UnknownFilter("daap.nonsense".to_string()))
        );
    }

    #[test]
    fn unknown_query_keys_are_ignored() {
        let filters = Filters::from_query_pairs(vec![
            ("daap.songartist", "Miles Davis"),
            ("session-id", "42"),
            ("daap.songartist", "John Coltrane"),
        ]);
        assert_eq!(filters.get(FilterField::ArtistName).map(|v| v.len()), Some(2));
        assert!(!filters.contains(FilterField::Genre));
    }
}
