//! mixorder - Playlist sequencing for harmonic DJ mixing
//!
//! Reorders a playlist so that adjacent tracks are close in tempo and
//! compatible in key. Tempo and key come from an external audio-analysis
//! source; nothing here decodes audio.
//!
//! # Architecture
//!
//! - `key`: key wheel conversion and compatibility scoring
//! - `sequencing`: tempo buckets, wheel ordering, bucket rotation, statistics
//! - `input`: playlist JSON loading
//! - `export`: sorted playlist JSON output
//! - `pipeline`: load → annotate → sort → report → export
//! - `config`: CLI argument parsing and runtime settings
//!
//! # Example
//!
//! ```
//! use mixorder::key;
//! use mixorder::sequencing::{calculate_report, sort_tracks, SortOptions};
//! use mixorder::types::{AudioFeatures, PlaylistEntry, Track};
//!
//! let tracks = key::annotate(vec![
//!     PlaylistEntry { track: Track::new("a"), features: Some(AudioFeatures::new(120.0, 0, 1)) },
//!     PlaylistEntry { track: Track::new("b"), features: Some(AudioFeatures::new(122.0, 7, 1)) },
//!     PlaylistEntry { track: Track::new("c"), features: Some(AudioFeatures::new(121.0, 9, 0)) },
//! ]);
//!
//! let sorted = sort_tracks(&tracks, &SortOptions::default()).expect("valid options");
//! let order: Vec<&str> = sorted.iter().map(|t| t.id()).collect();
//! assert_eq!(order, ["c", "a", "b"]);
//!
//! let report = calculate_report(&tracks, &sorted);
//! assert_eq!(report.good_transitions, 2);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod key;
pub mod pipeline;
pub mod sequencing;
pub mod types;

// Re-export key types at crate root
pub use error::{MixorderError, Result};
pub use types::{AnnotatedTrack, AudioFeatures, PlaylistEntry, SortReport, Track, WheelPosition};
