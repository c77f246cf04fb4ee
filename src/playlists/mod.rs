mod builder;
mod playlist;
mod set;

pub use builder::build_playlists;
pub use playlist::{Playlist, PlaylistId};
pub use set::PlaylistSet;
