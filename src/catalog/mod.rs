mod album;
mod artist;
mod builder;
#[allow(clippy::module_inception)]
mod catalog;
mod load;
mod track;

pub use album::{Album, AlbumId};
pub use artist::{Artist, ArtistId};
pub use builder::{build_catalog, parse_duration_ms, BuildError, BuildProblem, CatalogBuild};
pub use catalog::Catalog;
pub use load::log_build_report;
pub use track::{Track, TrackId, EMPTY_TAG};
