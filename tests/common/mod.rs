//! Common test infrastructure
//!
//! Provides the fixture library shared by the end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{fixture_index, TRACK_1_ID};
//!
//! #[test]
//! fn test_track_lookup() {
//!     let (_library, index) = fixture_index();
//!     let snapshot = index.snapshot().unwrap();
//!     assert!(snapshot.track_by_id(TRACK_1_ID).is_some());
//! }
//! ```

mod constants;
mod fixtures;

// Public API - this is what tests import
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{fixture_dump, fixture_index, fixture_library, write_library_file};
