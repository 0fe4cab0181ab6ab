//! Playlist loading
//!
//! Accepts either a bare JSON array of entries or an object with a `tracks`
//! array, so exports from other tools can be fed in unchanged.

use crate::error::{InputContext, MixorderError, Result};
use crate::types::PlaylistEntry;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlaylistFile {
    Wrapped { tracks: Vec<PlaylistEntry> },
    Bare(Vec<PlaylistEntry>),
}

impl PlaylistFile {
    fn into_entries(self) -> Vec<PlaylistEntry> {
        match self {
            PlaylistFile::Wrapped { tracks } => tracks,
            PlaylistFile::Bare(tracks) => tracks,
        }
    }
}

/// Read a playlist file from disk
pub fn load_playlist(path: &Path) -> Result<Vec<PlaylistEntry>> {
    if !path.is_file() {
        return Err(MixorderError::InputNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let playlist: PlaylistFile = serde_json::from_reader(reader).with_input_context(path)?;
    let entries = playlist.into_entries();

    let without_features = entries.iter().filter(|e| e.features.is_none()).count();
    if without_features > 0 {
        debug!("{} tracks have no audio features", without_features);
    }

    info!("Loaded {} tracks from {}", entries.len(), path.display());

    Ok(entries)
}

/// Parse a playlist from an in-memory JSON string
pub fn parse_playlist(json: &str) -> std::result::Result<Vec<PlaylistEntry>, serde_json::Error> {
    serde_json::from_str::<PlaylistFile>(json).map(PlaylistFile::into_entries)
}

/// Identifiers that appear more than once
///
/// Statistics match tracks by identifier, so duplicates make the moved-track
/// count meaningless. Callers are warned; the sort itself is unaffected.
pub fn duplicate_ids(entries: &[PlaylistEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for entry in entries {
        let id = entry.track.id.as_str();
        if !seen.insert(id) && !duplicates.iter().any(|d: &String| d == id) {
            duplicates.push(id.to_string());
        }
    }

    if !duplicates.is_empty() {
        warn!(
            "Playlist contains {} duplicate track ids; moved-track statistics are unreliable",
            duplicates.len()
        );
    }

    duplicates
}
