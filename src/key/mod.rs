//! Key handling: wheel conversion, compatibility scoring and track annotation

pub mod camelot;
pub mod compatibility;

pub use camelot::{
    color, compatible_positions, key_name, sort_value, to_display_string, to_musical_key,
    to_wheel_position, ParseWheelError, UNKNOWN_KEY_COLOR,
};
pub use compatibility::{compatibility, is_good_transition, GOOD_TRANSITION_SCORE};

use crate::types::{AnnotatedTrack, PlaylistEntry};
use tracing::debug;

/// Derive the key and wheel position for one playlist entry
pub fn annotate_entry(entry: PlaylistEntry, original_position: usize) -> AnnotatedTrack {
    let key = entry
        .features
        .as_ref()
        .and_then(|f| to_musical_key(f.key, f.mode));

    if key.is_none() {
        debug!("No usable key for track {}", entry.track.id);
    }

    AnnotatedTrack {
        track: entry.track,
        features: entry.features,
        key,
        wheel: key.map(|k| k.wheel_position()),
        original_position,
    }
}

/// Annotate a whole playlist, recording each entry's source index
pub fn annotate(entries: Vec<PlaylistEntry>) -> Vec<AnnotatedTrack> {
    entries
        .into_iter()
        .enumerate()
        .map(|(position, entry)| annotate_entry(entry, position))
        .collect()
}
