//! Bucketed tempo + key sequencing
//!
//! The sequencer keeps tempo changes gradual and key changes harmonic:
//!
//! 1. Stable sort of all tracks by tempo (unknown tempo = 0)
//! 2. Partition into fixed-width tempo buckets
//! 3. Within each bucket, stable sort by wheel position
//! 4. Walk buckets in tempo order; each bucket after the first is rotated so
//!    that its opening track mixes best out of the previous bucket's last track
//!
//! Output is always a permutation of the input.

pub mod buckets;
pub mod stats;

pub use buckets::{group_into_buckets, TempoBucket};
pub use stats::{calculate_report, transition_scores};

use crate::error::{MixorderError, Result};
use crate::key;
use crate::types::AnnotatedTrack;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default width of a tempo bucket in BPM
pub const DEFAULT_BUCKET_SIZE: f64 = 5.0;

/// Sequencing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SortOptions {
    /// Width of each tempo bucket in BPM
    pub bucket_size: f64,
    /// Tempo direction, applied to both the track sort and the bucket order
    pub ascending: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            bucket_size: DEFAULT_BUCKET_SIZE,
            ascending: true,
        }
    }
}

impl SortOptions {
    /// Reject unusable bucket sizes before any sorting happens
    pub fn validate(&self) -> Result<()> {
        if !self.bucket_size.is_finite() || self.bucket_size <= 0.0 {
            return Err(MixorderError::InvalidBucketSize(self.bucket_size));
        }
        Ok(())
    }
}

/// Reorder tracks for mixing
///
/// The input is left untouched; the returned vector holds the same tracks in
/// mix order.
pub fn sort_tracks(tracks: &[AnnotatedTrack], options: &SortOptions) -> Result<Vec<AnnotatedTrack>> {
    let buckets = plan_buckets(tracks, options)?;
    Ok(chain_buckets(buckets))
}

/// Run steps 1-3 and return the buckets in enumeration order, unrotated
pub fn plan_buckets(tracks: &[AnnotatedTrack], options: &SortOptions) -> Result<Vec<TempoBucket>> {
    options.validate()?;

    let mut tempo_sorted = tracks.to_vec();
    if options.ascending {
        tempo_sorted.sort_by(|a, b| a.tempo().total_cmp(&b.tempo()));
    } else {
        tempo_sorted.sort_by(|a, b| b.tempo().total_cmp(&a.tempo()));
    }

    let mut buckets = group_into_buckets(tempo_sorted, options.bucket_size, options.ascending);
    buckets::sort_buckets_by_wheel(&mut buckets);

    debug!(
        "Planned {} tempo buckets of {} BPM for {} tracks",
        buckets.len(),
        options.bucket_size,
        tracks.len()
    );

    Ok(buckets)
}

/// Concatenate buckets, rotating each one to open on the best match for the
/// track placed before it
pub fn chain_buckets(buckets: Vec<TempoBucket>) -> Vec<AnnotatedTrack> {
    let total = buckets.iter().map(TempoBucket::len).sum();
    let mut result: Vec<AnnotatedTrack> = Vec::with_capacity(total);

    for mut bucket in buckets {
        if let Some(last) = result.last() {
            let best = best_entry_index(last, &bucket.tracks);
            if best > 0 {
                debug!(
                    "Bucket {} BPM opens on {} (index {}) after {}",
                    bucket.floor,
                    bucket.tracks[best].id(),
                    best,
                    last.id()
                );
            }
            bucket.tracks.rotate_left(best);
        }
        result.extend(bucket.tracks);
    }

    result
}

/// Index of the candidate that mixes best out of `last`
///
/// Only a strictly greater score replaces the current best, so ties go to the
/// earliest candidate. Returns 0 for an empty slice.
pub fn best_entry_index(last: &AnnotatedTrack, candidates: &[AnnotatedTrack]) -> usize {
    let mut best_index = 0;
    let mut best_score: Option<u8> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let score = key::compatibility(last.wheel, candidate.wheel);
        if best_score.map_or(true, |best| score > best) {
            best_score = Some(score);
            best_index = index;
        }
    }

    best_index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AudioFeatures, PlaylistEntry, Track};
    use std::collections::HashMap;

    fn track(id: &str, tempo: f64, key: i32, mode: i32) -> PlaylistEntry {
        PlaylistEntry {
            track: Track::new(id),
            features: Some(AudioFeatures::new(tempo, key, mode)),
        }
    }

    fn featureless(id: &str) -> PlaylistEntry {
        PlaylistEntry {
            track: Track::new(id),
            features: None,
        }
    }

    fn ids(tracks: &[AnnotatedTrack]) -> Vec<&str> {
        tracks.iter().map(|t| t.id()).collect()
    }

    fn sorted_ids(entries: Vec<PlaylistEntry>, options: SortOptions) -> Vec<String> {
        let annotated = key::annotate(entries);
        sort_tracks(&annotated, &options)
            .unwrap()
            .into_iter()
            .map(|t| t.track.id)
            .collect()
    }

    #[test]
    fn test_single_bucket_orders_by_wheel() {
        // A = C major (5B), B = G major (6B), C = A minor (5A)
        let order = sorted_ids(
            vec![
                track("A", 120.0, 0, 1),
                track("B", 122.0, 7, 1),
                track("C", 121.0, 9, 0),
            ],
            SortOptions::default(),
        );
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_empty_input() {
        let sorted = sort_tracks(&[], &SortOptions::default()).unwrap();
        assert!(sorted.is_empty());
    }

    #[test]
    fn test_invalid_bucket_size_rejected() {
        let annotated = key::annotate(vec![track("a", 120.0, 0, 1)]);
        for size in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let options = SortOptions {
                bucket_size: size,
                ascending: true,
            };
            let err = sort_tracks(&annotated, &options).unwrap_err();
            assert!(matches!(err, MixorderError::InvalidBucketSize(_)));
        }
    }

    #[test]
    fn test_next_bucket_rotates_to_best_match() {
        // Bucket 120: [5A, 5B] -> last placed is 5B.
        // Bucket 125: wheel order [1A, 6A, 6B]; 6B scores 7 against 5B and wins.
        let order = sorted_ids(
            vec![
                track("c_major", 120.0, 0, 1),  // 5B
                track("a_minor", 121.0, 9, 0),  // 5A
                track("g_major", 126.0, 7, 1),  // 6B
                track("f_minor", 127.0, 5, 0),  // 1A
                track("e_minor", 128.0, 4, 0),  // 6A
            ],
            SortOptions::default(),
        );
        assert_eq!(order, vec!["a_minor", "c_major", "g_major", "f_minor", "e_minor"]);
    }

    #[test]
    fn test_rotation_ties_keep_earliest_candidate() {
        // Last placed is 5B; 4B and 6B both score 7, 4B comes first in wheel order.
        let order = sorted_ids(
            vec![
                track("c_major", 100.0, 0, 1), // 5B
                track("g_major", 110.0, 7, 1), // 6B
                track("f_major", 111.0, 5, 1), // 4B
                track("d_minor", 112.0, 2, 0), // 4A
            ],
            SortOptions::default(),
        );
        assert_eq!(order, vec!["c_major", "f_major", "g_major", "d_minor"]);
    }

    #[test]
    fn test_unknown_previous_key_leaves_bucket_unrotated() {
        let order = sorted_ids(
            vec![
                track("no_key", 100.0, -1, 1),
                track("b", 110.0, 7, 1),
                track("a", 111.0, 9, 0),
            ],
            SortOptions::default(),
        );
        assert_eq!(order, vec!["no_key", "a", "b"]);
    }

    #[test]
    fn test_descending_direction() {
        let order = sorted_ids(
            vec![
                track("slow", 90.0, 0, 1),
                track("fast", 140.0, 0, 1),
                track("mid", 120.0, 0, 1),
            ],
            SortOptions {
                bucket_size: 5.0,
                ascending: false,
            },
        );
        assert_eq!(order, vec!["fast", "mid", "slow"]);
    }

    #[test]
    fn test_missing_tempo_sorts_as_zero() {
        let order = sorted_ids(
            vec![track("known", 100.0, 0, 1), featureless("unknown")],
            SortOptions::default(),
        );
        assert_eq!(order, vec!["unknown", "known"]);
    }

    #[test]
    fn test_result_is_permutation() {
        let entries: Vec<PlaylistEntry> = (0..60)
            .map(|i| {
                if i % 7 == 0 {
                    featureless(&format!("t{i}"))
                } else {
                    track(
                        &format!("t{i}"),
                        80.0 + ((i * 37) % 90) as f64 + 0.3,
                        (i * 5) % 13 - 1,
                        i % 2,
                    )
                }
            })
            .collect();
        let annotated = key::annotate(entries);

        for size in [0.5, 1.0, 3.0, 5.0, 12.5, 1000.0] {
            for ascending in [true, false] {
                let sorted = sort_tracks(
                    &annotated,
                    &SortOptions {
                        bucket_size: size,
                        ascending,
                    },
                )
                .unwrap();
                assert_eq!(sorted.len(), annotated.len());

                let mut counts: HashMap<&str, i32> = HashMap::new();
                for t in &annotated {
                    *counts.entry(t.id()).or_default() += 1;
                }
                for t in &sorted {
                    *counts.entry(t.id()).or_default() -= 1;
                }
                assert!(counts.values().all(|&c| c == 0));
            }
        }
    }

    #[test]
    fn test_sorting_twice_is_stable() {
        let entries: Vec<PlaylistEntry> = (0..40)
            .map(|i| {
                track(
                    &format!("t{i}"),
                    100.0 + ((i * 13) % 30) as f64,
                    (i * 7) % 12,
                    (i / 3) % 2,
                )
            })
            .collect();
        let options = SortOptions::default();

        let first = sort_tracks(&key::annotate(entries), &options).unwrap();
        let second = sort_tracks(&first, &options).unwrap();

        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_best_entry_index_empty_candidates() {
        let last = key::annotate(vec![track("x", 120.0, 0, 1)]).remove(0);
        assert_eq!(best_entry_index(&last, &[]), 0);
    }
}
