//! Build report logging

use super::{BuildProblem, Catalog};
use tracing::info;

pub fn log_build_report(catalog: &Catalog, playlists_count: usize, problems: &[BuildProblem]) {
    if !problems.is_empty() {
        info!("Found {} problems:", problems.len());
        for problem in problems.iter() {
            info!("- {:?}", problem);
        }
    }
    match problems.is_empty() {
        true => info!("Catalog built, no issues found."),
        false => info!(
            "Catalog was built, but check the {} non-fatal issues above.",
            problems.len()
        ),
    }
    info!(
        "Catalog has:\n{} artists\n{} albums\n{} tracks\n{} playlists",
        catalog.get_artists_count(),
        catalog.get_albums_count(),
        catalog.get_tracks_count(),
        playlists_count
    );
}
