//! Tempo buckets
//!
//! Tracks are grouped by `floor(tempo / bucket_size) * bucket_size`. Buckets
//! are held in a map keyed by bucket index, so enumeration order comes from
//! the key and never from insertion order.

use crate::key;
use crate::types::AnnotatedTrack;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// A run of tracks sharing a tempo range of fixed width
#[derive(Debug, Clone, PartialEq)]
pub struct TempoBucket {
    /// Lower bound of the bucket in BPM (`index * bucket_size`)
    pub floor: f64,
    pub tracks: Vec<AnnotatedTrack>,
}

impl TempoBucket {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Stable sort by wheel sort value; tracks with no key come first
    pub fn sort_by_wheel(&mut self) {
        self.tracks.sort_by_key(|t| key::sort_value(t.wheel));
    }
}

/// Bucket index for a tempo; `bucket_size` must already be validated
pub fn bucket_index(tempo: f64, bucket_size: f64) -> i64 {
    (tempo / bucket_size).floor() as i64
}

/// Partition tempo-sorted tracks into buckets
///
/// Track order inside each bucket follows the input order. Buckets come back
/// in ascending tempo order, or descending when `ascending` is false.
pub fn group_into_buckets(
    tempo_sorted: Vec<AnnotatedTrack>,
    bucket_size: f64,
    ascending: bool,
) -> Vec<TempoBucket> {
    let mut by_index: BTreeMap<i64, Vec<AnnotatedTrack>> = BTreeMap::new();
    for track in tempo_sorted {
        by_index
            .entry(bucket_index(track.tempo(), bucket_size))
            .or_default()
            .push(track);
    }

    let mut buckets: Vec<TempoBucket> = by_index
        .into_iter()
        .map(|(index, tracks)| TempoBucket {
            floor: index as f64 * bucket_size,
            tracks,
        })
        .collect();

    if !ascending {
        buckets.reverse();
    }
    buckets
}

/// Sort every bucket by wheel position; buckets are independent, so this runs in parallel
pub fn sort_buckets_by_wheel(buckets: &mut [TempoBucket]) {
    buckets.par_iter_mut().for_each(TempoBucket::sort_by_wheel);
}
