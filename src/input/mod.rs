//! Reading playlists supplied by an external fetch step

pub mod playlist;

pub use playlist::{duplicate_ids, load_playlist, parse_playlist};
