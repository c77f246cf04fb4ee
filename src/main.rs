use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use media_catalog::config::{AppConfig, CliConfig, FileConfig};
use media_catalog::projection::{AlbumSummary, ArtistSummary, PlaylistSummary, TrackSummary};
use media_catalog::{
    AlbumId, FilterField, Filters, LibraryIndex, MemoryLibrary, Page, PlaylistId, Snapshot,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

/// Parses a `key=value` filter, e.g. `genre=%jazz%` or `daap.songalbumid=3,4`.
fn parse_filter(s: &str) -> Result<(FilterField, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected key=value, got: {}", s))?;
    Ok((key.parse()?, value.to_owned()))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the JSON library dump.
    #[clap(long, value_parser = parse_path)]
    pub library: Option<PathBuf>,

    /// Path to a TOML config file. Its values override the CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Only index files whose url contains this text.
    #[clap(long)]
    pub file_filter: Option<String>,

    /// Maximum number of tracks listed for a playlist.
    #[clap(long)]
    pub max_playlist_tracks: Option<usize>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// Filter as key=value, repeatable.
    #[clap(short, long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(FilterField, String)>,

    /// First index of the result window.
    #[clap(long)]
    pub start: Option<usize>,

    /// End of the result window (exclusive).
    #[clap(long)]
    pub end: Option<usize>,
}

impl QueryArgs {
    fn filters(&self) -> Filters {
        let mut filters = Filters::new();
        for (field, value) in self.filters.iter() {
            filters.insert(*field, value);
        }
        filters
    }

    fn page(&self) -> Option<Page> {
        match (self.start, self.end) {
            (None, None) => None,
            (start, end) => Some(Page::new(start.unwrap_or(0), end.unwrap_or(usize::MAX))),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Catalog counts.
    Stats,
    Artists(QueryArgs),
    Albums(QueryArgs),
    Genres(QueryArgs),
    Composers(QueryArgs),
    Tracks(QueryArgs),
    /// A single album with its tracks, null when unknown.
    Album { id: u32 },
    /// Visible playlists.
    Playlists,
    PlaylistTracks { id: u32 },
    /// Non-fatal problems found while building.
    Problems,
}

fn run_command(command: &Command, snapshot: &Snapshot, config: &AppConfig) -> Result<Value> {
    let catalog = snapshot.catalog();
    let value = match command {
        Command::Stats => serde_json::to_value(snapshot.stats())?,
        Command::Artists(args) => {
            let artists: Vec<ArtistSummary> = snapshot
                .find_artists(&args.filters(), args.page())
                .into_iter()
                .map(|artist| ArtistSummary::new(catalog, artist))
                .collect();
            serde_json::to_value(artists)?
        }
        Command::Albums(args) => {
            let albums: Vec<AlbumSummary> = snapshot
                .find_albums(&args.filters(), args.page())
                .into_iter()
                .map(|album| AlbumSummary::new(catalog, album))
                .collect();
            serde_json::to_value(albums)?
        }
        Command::Genres(args) => json!(snapshot.find_genres(&args.filters(), args.page())),
        Command::Composers(args) => {
            json!(snapshot.find_composers(&args.filters(), args.page()))
        }
        Command::Tracks(args) => {
            let tracks: Vec<TrackSummary> = snapshot
                .find_tracks(&args.filters(), args.page())?
                .into_iter()
                .map(|track| TrackSummary::new(catalog, track))
                .collect();
            serde_json::to_value(tracks)?
        }
        Command::Album { id } => match snapshot.album_by_id(AlbumId(*id)) {
            Some(album) => {
                let tracks: Vec<TrackSummary> = catalog
                    .album_tracks(album)
                    .map(|track| TrackSummary::new(catalog, track))
                    .collect();
                json!({ "album": AlbumSummary::new(catalog, album), "tracks": tracks })
            }
            None => Value::Null,
        },
        Command::Playlists => {
            let playlists: Vec<PlaylistSummary> = snapshot
                .visible_playlists(&config.hidden_playlist_markers)
                .iter()
                .map(|playlist| PlaylistSummary::from(playlist.as_ref()))
                .collect();
            serde_json::to_value(playlists)?
        }
        Command::PlaylistTracks { id } => {
            let tracks: Vec<TrackSummary> = snapshot
                .playlist_tracks(PlaylistId(*id), config.max_playlist_tracks)
                .into_iter()
                .map(|track| TrackSummary::new(catalog, track))
                .collect();
            serde_json::to_value(tracks)?
        }
        Command::Problems => {
            let problems: Vec<String> = snapshot
                .problems()
                .iter()
                .map(|problem| format!("{:?}", problem))
                .collect();
            json!(problems)
        }
    };
    Ok(value)
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    // Logs go to stderr, stdout carries the JSON output.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let cli_config = CliConfig {
        library_path: cli_args.library.clone(),
        file_filter: cli_args.file_filter.clone(),
        max_playlist_tracks: cli_args.max_playlist_tracks,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Loading library dump from {:?}...", config.library_path);
    let library = Arc::new(MemoryLibrary::load(&config.library_path)?);
    let index = LibraryIndex::new(library.clone(), library).with_file_filter(&config.file_filter);
    let snapshot = index.snapshot()?;

    let value = run_command(&cli_args.command, &snapshot, &config)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
