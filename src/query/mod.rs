//! Browse and search operations over a built catalog.
//!
//! Every operation is read-only. Filters map a [`FilterField`] to one or
//! more values; text fields follow the [`FieldMatcher`] wildcard-vs-exact
//! rule. Pagination is always applied last.

mod engine;
mod error;
mod filter;
mod page;

pub use engine::{find_albums, find_artists, find_composers, find_genres, find_tracks};
pub use error::QueryError;
pub use filter::{FieldMatcher, FilterField, Filters};
pub use page::{paginate, Page};
