//! Core data types for mixorder
//!
//! These types represent the domain model and flow through the pipeline.
//! Everything here is a plain value built fresh per sort request.

use serde::{Deserialize, Serialize};

// =============================================================================
// Musical primitives
// =============================================================================

/// The 12 pitch classes in Western music
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    Cs, // C#/Db
    D,
    Ds, // D#/Eb
    E,
    F,
    Fs, // F#/Gb
    G,
    Gs, // G#/Ab
    A,
    As, // A#/Bb
    B,
}

impl PitchClass {
    /// All pitch classes in index order
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Convert from numeric index (0 = C, 1 = C#, ..., 11 = B)
    ///
    /// Anything outside 0..=11, including the -1 "no key detected" sentinel,
    /// yields `None`.
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Convert to numeric index (0 = C, 1 = C#, ..., 11 = B)
    pub fn to_index(self) -> u8 {
        match self {
            PitchClass::C => 0,
            PitchClass::Cs => 1,
            PitchClass::D => 2,
            PitchClass::Ds => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::Fs => 6,
            PitchClass::G => 7,
            PitchClass::Gs => 8,
            PitchClass::A => 9,
            PitchClass::As => 10,
            PitchClass::B => 11,
        }
    }

    /// Standard notation (e.g., "C", "F#")
    pub fn to_standard_notation(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }
}

/// Major or Minor scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Minor,
    Major,
}

impl Mode {
    /// Interpret an audio-features mode flag: 0 is minor, anything else major
    pub fn from_flag(flag: i32) -> Self {
        if flag == 0 {
            Mode::Minor
        } else {
            Mode::Major
        }
    }

    /// Wheel letter: 'A' for minor, 'B' for major
    pub fn letter(self) -> char {
        match self {
            Mode::Minor => 'A',
            Mode::Major => 'B',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Minor => "Minor",
            Mode::Major => "Major",
        }
    }

    /// The opposite quality (relative major/minor)
    pub fn relative(self) -> Self {
        match self {
            Mode::Minor => Mode::Major,
            Mode::Major => Mode::Minor,
        }
    }
}

/// A tonal centre: pitch class plus mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MusicalKey {
    pub pitch_class: PitchClass,
    pub mode: Mode,
}

impl MusicalKey {
    /// Short notation used in DJ software (e.g., "Am", "C#")
    pub fn standard_notation(self) -> String {
        format!(
            "{}{}",
            self.pitch_class.to_standard_notation(),
            match self.mode {
                Mode::Major => "",
                Mode::Minor => "m",
            }
        )
    }
}

/// Position on the 12-step key wheel (1-12) with its quality
///
/// Minor positions carry the letter A, major positions the letter B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WheelPosition {
    number: u8,
    mode: Mode,
}

impl WheelPosition {
    /// Build a position; `number` must be in 1..=12
    pub fn new(number: u8, mode: Mode) -> Option<Self> {
        (1..=12).contains(&number).then_some(Self { number, mode })
    }

    pub fn number(self) -> u8 {
        self.number
    }

    pub fn mode(self) -> Mode {
        self.mode
    }
}

// =============================================================================
// Track representation
// =============================================================================

/// Display metadata carried through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// An opaque playlist item; only `id` is ever inspected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Stable unique identifier
    pub id: String,
    #[serde(flatten)]
    pub metadata: TrackMetadata,
}

impl Track {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: TrackMetadata::default(),
        }
    }
}

fn no_key() -> i32 {
    -1
}

fn major_flag() -> i32 {
    1
}

/// Tempo and key as supplied by an external audio-analysis service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    /// Beats per minute; absent or zero means unknown
    #[serde(default)]
    pub tempo: Option<f64>,
    /// Pitch class 0-11, or -1 when no key was detected
    #[serde(default = "no_key")]
    pub key: i32,
    /// 0 = minor, 1 = major
    #[serde(default = "major_flag")]
    pub mode: i32,
}

impl AudioFeatures {
    pub fn new(tempo: f64, key: i32, mode: i32) -> Self {
        Self {
            tempo: Some(tempo),
            key,
            mode,
        }
    }

    /// Tempo used for ordering; unknown, negative or non-finite values read as 0
    pub fn effective_tempo(&self) -> f64 {
        match self.tempo {
            Some(bpm) if bpm.is_finite() && bpm > 0.0 => bpm,
            _ => 0.0,
        }
    }
}

/// One record of an input playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    #[serde(flatten)]
    pub track: Track,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<AudioFeatures>,
}

/// A track with its derived key annotations, ready for sequencing
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedTrack {
    pub track: Track,
    pub features: Option<AudioFeatures>,
    /// Key derived from the features (None when unknown)
    pub key: Option<MusicalKey>,
    /// Wheel position derived from the key
    pub wheel: Option<WheelPosition>,
    /// Index in the source ordering
    pub original_position: usize,
}

impl AnnotatedTrack {
    pub fn id(&self) -> &str {
        &self.track.id
    }

    /// Tempo for sorting and bucketing (0 when unknown)
    pub fn tempo(&self) -> f64 {
        self.features
            .as_ref()
            .map(AudioFeatures::effective_tempo)
            .unwrap_or(0.0)
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Rounded tempo range over tracks with a known tempo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpmRange {
    pub min: u32,
    pub max: u32,
}

/// Quality summary of a produced ordering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortReport {
    pub total_tracks: usize,
    /// Adjacent pairs scoring at least the good-transition threshold
    pub good_transitions: usize,
    pub total_transitions: usize,
    /// Share of good transitions, 0-100
    pub harmonic_score_percent: u32,
    /// Tracks whose index differs from the source ordering
    pub moved_tracks: usize,
    /// None when no track has a positive tempo
    pub bpm_range: Option<BpmRange>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_rejects_out_of_range() {
        assert_eq!(PitchClass::from_index(-1), None);
        assert_eq!(PitchClass::from_index(12), None);
        assert_eq!(PitchClass::from_index(0), Some(PitchClass::C));
        assert_eq!(PitchClass::from_index(11), Some(PitchClass::B));
    }

    #[test]
    fn test_pitch_class_index_roundtrip() {
        for (i, pc) in PitchClass::ALL.iter().enumerate() {
            assert_eq!(pc.to_index() as usize, i);
        }
    }

    #[test]
    fn test_mode_flag() {
        assert_eq!(Mode::from_flag(0), Mode::Minor);
        assert_eq!(Mode::from_flag(1), Mode::Major);
        assert_eq!(Mode::from_flag(7), Mode::Major);
    }

    #[test]
    fn test_wheel_position_bounds() {
        assert!(WheelPosition::new(0, Mode::Minor).is_none());
        assert!(WheelPosition::new(13, Mode::Major).is_none());
        assert_eq!(WheelPosition::new(12, Mode::Major).map(|p| p.number()), Some(12));
    }

    #[test]
    fn test_effective_tempo() {
        assert_eq!(AudioFeatures::new(124.5, 0, 1).effective_tempo(), 124.5);
        assert_eq!(AudioFeatures::new(0.0, 0, 1).effective_tempo(), 0.0);
        assert_eq!(AudioFeatures::new(f64::NAN, 0, 1).effective_tempo(), 0.0);
        assert_eq!(AudioFeatures::new(-90.0, 0, 1).effective_tempo(), 0.0);
    }

    #[test]
    fn test_playlist_entry_defaults() {
        let entry: PlaylistEntry =
            serde_json::from_str(r#"{"id":"t1","title":"Song","features":{"tempo":120.0}}"#)
                .unwrap();
        assert_eq!(entry.track.id, "t1");
        assert_eq!(entry.track.metadata.title.as_deref(), Some("Song"));
        let features = entry.features.unwrap();
        assert_eq!(features.key, -1);
        assert_eq!(features.mode, 1);
    }

    #[test]
    fn test_standard_notation() {
        let key = MusicalKey {
            pitch_class: PitchClass::A,
            mode: Mode::Minor,
        };
        assert_eq!(key.standard_notation(), "Am");
    }
}
