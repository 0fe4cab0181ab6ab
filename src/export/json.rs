//! JSON export of a sorted playlist

use crate::error::{MixorderError, Result};
use crate::key;
use crate::sequencing::{transition_scores, SortOptions};
use crate::types::{AnnotatedTrack, SortReport};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info};

/// JSON output schema version
const SCHEMA_VERSION: &str = "1.0";

/// File name written inside the output directory
pub const OUTPUT_FILE_NAME: &str = "mixorder.json";

/// Top-level JSON output structure
#[derive(Debug, Serialize, Deserialize)]
pub struct MixorderJson {
    /// Schema version for forward compatibility
    pub version: String,
    pub metadata: ExportMetadata,
    pub report: SortReport,
    /// Tracks in mix order
    pub tracks: Vec<TrackJson>,
}

/// Export metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// mixorder version that generated this file
    pub generator_version: String,
    /// Timestamp of export
    pub exported_at: String,
    pub track_count: usize,
    pub bucket_size: f64,
    pub ascending: bool,
}

/// JSON representation of a sorted track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackJson {
    /// Index in the sorted playlist
    pub position: usize,
    /// Index in the source playlist
    pub original_position: usize,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempo: Option<f64>,
    pub key: KeyJson,
    /// Compatibility score of the transition into this track
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_score: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyJson {
    /// Readable name (e.g., "A Minor"), or "Unknown"
    pub name: String,
    /// Short notation (e.g., "Am", "C#")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,
    /// Wheel notation (e.g., "5A")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camelot: Option<String>,
    /// Display colour for the wheel number
    pub color: String,
}

/// Write a sorted playlist and its report to a JSON file
///
/// Uses atomic write pattern: writes to a temp file first, then renames.
/// An existing file is only replaced when `overwrite` is set.
pub fn write_json(
    sorted: &[AnnotatedTrack],
    report: &SortReport,
    options: &SortOptions,
    output_path: &Path,
    overwrite: bool,
) -> Result<()> {
    if output_path.exists() && !overwrite {
        return Err(MixorderError::output_error(
            output_path,
            std::io::Error::from(std::io::ErrorKind::AlreadyExists),
        ));
    }

    // Same directory keeps the rename on one filesystem
    let temp_path = output_path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| MixorderError::output_error(output_path, e))?;
    let writer = BufWriter::new(file);

    let output = MixorderJson {
        version: SCHEMA_VERSION.to_string(),
        metadata: ExportMetadata {
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: chrono::Utc::now().to_rfc3339(),
            track_count: sorted.len(),
            bucket_size: options.bucket_size,
            ascending: options.ascending,
        },
        report: report.clone(),
        tracks: tracks_to_json(sorted),
    };

    serde_json::to_writer_pretty(writer, &output).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        MixorderError::OutputError {
            path: output_path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    std::fs::rename(&temp_path, output_path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        MixorderError::OutputError {
            path: output_path.to_path_buf(),
            reason: format!("Failed to finalize file: {}", e),
        }
    })?;

    info!("Wrote {} tracks to {}", sorted.len(), output_path.display());

    Ok(())
}

/// Build the per-track JSON records in sorted order
pub fn tracks_to_json(sorted: &[AnnotatedTrack]) -> Vec<TrackJson> {
    sorted
        .iter()
        .zip(transition_scores(sorted))
        .enumerate()
        .map(|(position, (track, transition_score))| TrackJson {
            position,
            original_position: track.original_position,
            id: track.track.id.clone(),
            title: track.track.metadata.title.clone(),
            artist: track.track.metadata.artist.clone(),
            album: track.track.metadata.album.clone(),
            tempo: Some(track.tempo()).filter(|&bpm| bpm > 0.0),
            key: KeyJson {
                name: track
                    .features
                    .as_ref()
                    .and_then(|f| key::key_name(f.key, f.mode))
                    .unwrap_or_else(|| "Unknown".to_string()),
                standard: track.key.map(|k| k.standard_notation()),
                camelot: key::to_display_string(track.wheel),
                color: key::color(track.wheel).to_string(),
            },
            transition_score,
        })
        .collect()
}

/// Read a previously exported playlist
///
/// Returns `None` if the file doesn't exist or can't be parsed.
pub fn read_export(json_path: &Path) -> Option<MixorderJson> {
    let file = match File::open(json_path) {
        Ok(f) => f,
        Err(e) => {
            debug!("Could not open existing export: {}", e);
            return None;
        }
    };

    match serde_json::from_reader(BufReader::new(file)) {
        Ok(json) => Some(json),
        Err(e) => {
            debug!("Could not parse existing export: {}", e);
            None
        }
    }
}
