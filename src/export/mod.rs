//! Export of sorted playlists

pub mod json;

pub use json::{read_export, write_json, OUTPUT_FILE_NAME};
