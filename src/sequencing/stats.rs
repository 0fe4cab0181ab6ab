//! Transition-quality statistics for a produced ordering

use crate::key;
use crate::types::{AnnotatedTrack, BpmRange, SortReport};
use std::collections::HashMap;

/// Measure `sorted` against the ordering it was produced from
///
/// Tracks are matched by identifier. Identifiers are expected to be unique;
/// with duplicates the last occurrence in `original` is used, and the moved
/// count is not meaningful.
pub fn calculate_report(original: &[AnnotatedTrack], sorted: &[AnnotatedTrack]) -> SortReport {
    let total_transitions = sorted.len().saturating_sub(1);

    let good_transitions = sorted
        .windows(2)
        .filter(|pair| key::is_good_transition(pair[0].wheel, pair[1].wheel))
        .count();

    let harmonic_score_percent = if total_transitions > 0 {
        (good_transitions as f64 / total_transitions as f64 * 100.0).round() as u32
    } else {
        0
    };

    let original_positions: HashMap<&str, usize> = original
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id(), i))
        .collect();

    let moved_tracks = sorted
        .iter()
        .enumerate()
        .filter(|(i, t)| original_positions.get(t.id()) != Some(i))
        .count();

    SortReport {
        total_tracks: sorted.len(),
        good_transitions,
        total_transitions,
        harmonic_score_percent,
        moved_tracks,
        bpm_range: bpm_range(sorted),
    }
}

/// Rounded min/max over tracks with a positive tempo
pub fn bpm_range(tracks: &[AnnotatedTrack]) -> Option<BpmRange> {
    let (min, max) = tracks
        .iter()
        .map(AnnotatedTrack::tempo)
        .filter(|&bpm| bpm > 0.0)
        .fold(None, |range: Option<(f64, f64)>, bpm| match range {
            None => Some((bpm, bpm)),
            Some((lo, hi)) => Some((lo.min(bpm), hi.max(bpm))),
        })?;

    Some(BpmRange {
        min: min.round() as u32,
        max: max.round() as u32,
    })
}

/// Score of the transition into each track; `None` for the opening track
pub fn transition_scores(sorted: &[AnnotatedTrack]) -> Vec<Option<u8>> {
    sorted
        .iter()
        .enumerate()
        .map(|(i, track)| {
            i.checked_sub(1)
                .map(|prev| key::compatibility(sorted[prev].wheel, track.wheel))
        })
        .collect()
}
