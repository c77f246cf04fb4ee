mod file_config;

pub use file_config::FileConfig;

use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;

pub const DEFAULT_MAX_PLAYLIST_TRACKS: usize = 500;

pub fn default_hidden_playlist_markers() -> Vec<String> {
    vec!["Accessible Tracks".to_string(), "Imported".to_string()]
}

/// CLI arguments that can be used for config resolution.
/// The TOML config overrides any of them.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub library_path: Option<PathBuf>,
    pub file_filter: Option<String>,
    pub max_playlist_tracks: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub library_path: PathBuf,
    pub file_filter: String,
    pub hidden_playlist_markers: Vec<String>,
    pub max_playlist_tracks: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let library_path = file
            .library_path
            .map(PathBuf::from)
            .or_else(|| cli.library_path.clone())
            .ok_or_else(|| {
                anyhow!("library_path must be specified via --library or in config file")
            })?;
        if !library_path.exists() {
            bail!("Library dump does not exist: {:?}", library_path);
        }
        if !library_path.is_file() {
            bail!("library_path is not a file: {:?}", library_path);
        }

        let file_filter = file
            .file_filter
            .or_else(|| cli.file_filter.clone())
            .unwrap_or_default();

        let hidden_playlist_markers = file
            .hidden_playlist_markers
            .unwrap_or_else(default_hidden_playlist_markers);

        let max_playlist_tracks = file
            .max_playlist_tracks
            .or(cli.max_playlist_tracks)
            .unwrap_or(DEFAULT_MAX_PLAYLIST_TRACKS);
        if max_playlist_tracks == 0 {
            bail!("max_playlist_tracks must be greater than 0");
        }

        Ok(Self {
            library_path,
            file_filter,
            hidden_playlist_markers,
            max_playlist_tracks,
        })
    }
}
