mod index;
#[allow(clippy::module_inception)]
mod snapshot;

pub use index::{LibraryIndex, PlaylistError};
pub use snapshot::{CatalogStats, Snapshot};
