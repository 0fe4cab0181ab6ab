//! Key wheel mapping
//!
//! The wheel arranges the 24 keys so that harmonically compatible keys are
//! numerically adjacent:
//!
//! - Numbers 1-12 represent positions on the wheel (circle of fifths)
//! - 'A' suffix = minor key, 'B' suffix = major key
//! - Adjacent numbers are a perfect fifth apart
//! - Same number, different letter = relative major/minor
//!
//! This numbering starts at Ab major / F minor (1B / 1A), so C major is 5B
//! and A minor is 5A.

use crate::types::{Mode, MusicalKey, PitchClass, WheelPosition};
use std::fmt;
use std::str::FromStr;

/// Colour shown for tracks with no usable key
pub const UNKNOWN_KEY_COLOR: &str = "#666666";

/// Wheel number for a (PitchClass, Mode) pair
///
/// ```text
///   minor (A)                 major (B)
///   1A Fm    7A Bm            1B Ab    7B D
///   2A Cm    8A F#m           2B Eb    8B A
///   3A Gm    9A C#m           3B Bb    9B E
///   4A Dm   10A G#m           4B F    10B B
///   5A Am   11A D#m           5B C    11B F#
///   6A Em   12A A#m           6B G    12B C#
/// ```
fn wheel_number(pitch: PitchClass, mode: Mode) -> u8 {
    match (pitch, mode) {
        // Minor keys (A)
        (PitchClass::F, Mode::Minor) => 1,
        (PitchClass::C, Mode::Minor) => 2,
        (PitchClass::G, Mode::Minor) => 3,
        (PitchClass::D, Mode::Minor) => 4,
        (PitchClass::A, Mode::Minor) => 5,
        (PitchClass::E, Mode::Minor) => 6,
        (PitchClass::B, Mode::Minor) => 7,
        (PitchClass::Fs, Mode::Minor) => 8,
        (PitchClass::Cs, Mode::Minor) => 9,
        (PitchClass::Gs, Mode::Minor) => 10,
        (PitchClass::Ds, Mode::Minor) => 11,
        (PitchClass::As, Mode::Minor) => 12,

        // Major keys (B)
        (PitchClass::Gs, Mode::Major) => 1,
        (PitchClass::Ds, Mode::Major) => 2,
        (PitchClass::As, Mode::Major) => 3,
        (PitchClass::F, Mode::Major) => 4,
        (PitchClass::C, Mode::Major) => 5,
        (PitchClass::G, Mode::Major) => 6,
        (PitchClass::D, Mode::Major) => 7,
        (PitchClass::A, Mode::Major) => 8,
        (PitchClass::E, Mode::Major) => 9,
        (PitchClass::B, Mode::Major) => 10,
        (PitchClass::Fs, Mode::Major) => 11,
        (PitchClass::Cs, Mode::Major) => 12,
    }
}

impl MusicalKey {
    /// Position of this key on the wheel
    pub fn wheel_position(self) -> WheelPosition {
        WheelPosition::from_key(self)
    }
}

impl WheelPosition {
    fn from_key(key: MusicalKey) -> Self {
        match WheelPosition::new(wheel_number(key.pitch_class, key.mode), key.mode) {
            Some(pos) => pos,
            // wheel_number only ever returns 1..=12
            None => unreachable!("wheel table produced an out-of-range number"),
        }
    }

    /// Inverse lookup: the key sitting at this wheel position
    pub fn key(self) -> MusicalKey {
        let pitch_class = PitchClass::ALL
            .into_iter()
            .find(|&pc| wheel_number(pc, self.mode()) == self.number())
            .unwrap_or_else(|| unreachable!("wheel table is a bijection onto 1..=12"));
        MusicalKey {
            pitch_class,
            mode: self.mode(),
        }
    }

    /// Plain numeric ordering key: minor 0-11, then major 12-23
    pub fn sort_value(self) -> i32 {
        let base = match self.mode() {
            Mode::Minor => 0,
            Mode::Major => 12,
        };
        base + i32::from(self.number()) - 1
    }

    /// One step clockwise (12 wraps to 1), same quality
    pub fn next(self) -> Self {
        let number = if self.number() == 12 { 1 } else { self.number() + 1 };
        Self::at(number, self.mode())
    }

    /// One step counter-clockwise (1 wraps to 12), same quality
    pub fn previous(self) -> Self {
        let number = if self.number() == 1 { 12 } else { self.number() - 1 };
        Self::at(number, self.mode())
    }

    /// Same number, opposite quality
    pub fn relative(self) -> Self {
        Self::at(self.number(), self.mode().relative())
    }

    /// Display colour, roughly following a colour wheel
    pub fn color(self) -> &'static str {
        match self.number() {
            1 => "#FF6B6B",
            2 => "#FF8E53",
            3 => "#FFB347",
            4 => "#FFD93D",
            5 => "#6BCB77",
            6 => "#4ECDC4",
            7 => "#45B7D1",
            8 => "#4A90D9",
            9 => "#7B68EE",
            10 => "#9B59B6",
            11 => "#E056FD",
            12 => "#FF6B9D",
            _ => UNKNOWN_KEY_COLOR,
        }
    }

    fn at(number: u8, mode: Mode) -> Self {
        WheelPosition::new(number, mode)
            .unwrap_or_else(|| unreachable!("wheel arithmetic stays within 1..=12"))
    }
}

impl fmt::Display for WheelPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number(), self.mode().letter())
    }
}

/// Error returned when a string is not a wheel code like "8A" or "12B"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWheelError(String);

impl fmt::Display for ParseWheelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid wheel code '{}' (expected 1A-12B)", self.0)
    }
}

impl std::error::Error for ParseWheelError {}

impl FromStr for WheelPosition {
    type Err = ParseWheelError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let err = || ParseWheelError(code.to_string());
        let code_trimmed = code.trim();
        let letter = code_trimmed.chars().last().ok_or_else(err)?;
        let mode = match letter.to_ascii_uppercase() {
            'A' => Mode::Minor,
            'B' => Mode::Major,
            _ => return Err(err()),
        };
        let digits = &code_trimmed[..code_trimmed.len() - letter.len_utf8()];
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }
        let number: u8 = digits.parse().map_err(|_| err())?;
        WheelPosition::new(number, mode).ok_or_else(err)
    }
}

/// Convert an audio-features (pitch class, mode) pair to a wheel position
///
/// Returns `None` for pitch classes outside 0..=11, which includes the -1
/// "no key detected" sentinel. Mode 0 is minor, any other value major.
pub fn to_wheel_position(pitch_class: i32, mode: i32) -> Option<WheelPosition> {
    to_musical_key(pitch_class, mode).map(MusicalKey::wheel_position)
}

/// Convert an audio-features (pitch class, mode) pair to a key
pub fn to_musical_key(pitch_class: i32, mode: i32) -> Option<MusicalKey> {
    Some(MusicalKey {
        pitch_class: PitchClass::from_index(pitch_class)?,
        mode: Mode::from_flag(mode),
    })
}

/// Canonical string form ("8B"), or `None` for an unknown key
pub fn to_display_string(position: Option<WheelPosition>) -> Option<String> {
    position.map(|p| p.to_string())
}

/// Total ordering value for plain numeric sorting; unknown keys sort first (-1)
pub fn sort_value(position: Option<WheelPosition>) -> i32 {
    position.map_or(-1, WheelPosition::sort_value)
}

/// Keys that are safe to mix into from `position`
///
/// Order: same key, relative major/minor, one step up, one step down.
pub fn compatible_positions(position: WheelPosition) -> [WheelPosition; 4] {
    [
        position,
        position.relative(),
        position.next(),
        position.previous(),
    ]
}

/// Human-readable key name ("C Major", "A Minor")
pub fn key_name(pitch_class: i32, mode: i32) -> Option<String> {
    to_musical_key(pitch_class, mode)
        .map(|k| format!("{} {}", k.pitch_class.to_standard_notation(), k.mode.name()))
}

/// Display colour for an optional position
pub fn color(position: Option<WheelPosition>) -> &'static str {
    position.map_or(UNKNOWN_KEY_COLOR, WheelPosition::color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pos(code: &str) -> WheelPosition {
        code.parse().unwrap()
    }

    #[test]
    fn test_wheel_mapping_is_bijection() {
        let mut seen = HashSet::new();
        for pc in 0..12 {
            for mode in [0, 1] {
                let position = to_wheel_position(pc, mode).expect("valid key must map");
                assert!(seen.insert(position), "Duplicate position: {}", position);
            }
        }
        assert_eq!(seen.len(), 24);

        for mode in [Mode::Minor, Mode::Major] {
            let numbers: HashSet<u8> = seen
                .iter()
                .filter(|p| p.mode() == mode)
                .map(|p| p.number())
                .collect();
            assert_eq!(numbers, (1..=12).collect::<HashSet<u8>>());
        }
    }

    #[test]
    fn test_display_reference_points() {
        assert_eq!(to_display_string(to_wheel_position(8, 1)).as_deref(), Some("1B"));
        assert_eq!(to_display_string(to_wheel_position(5, 0)).as_deref(), Some("1A"));
        assert_eq!(to_display_string(to_wheel_position(0, 1)).as_deref(), Some("5B"));
        assert_eq!(to_display_string(to_wheel_position(9, 0)).as_deref(), Some("5A"));
        assert_eq!(to_display_string(to_wheel_position(1, 1)).as_deref(), Some("12B"));
        assert_eq!(to_display_string(to_wheel_position(10, 0)).as_deref(), Some("12A"));
    }

    #[test]
    fn test_out_of_range_pitch_class_is_absent() {
        assert_eq!(to_wheel_position(-1, 1), None);
        assert_eq!(to_wheel_position(12, 0), None);
        assert_eq!(to_display_string(None), None);
    }

    #[test]
    fn test_nonzero_mode_is_major() {
        assert_eq!(to_wheel_position(0, 5), to_wheel_position(0, 1));
    }

    #[test]
    fn test_sort_values() {
        assert_eq!(sort_value(None), -1);
        assert_eq!(sort_value(Some(pos("1A"))), 0);
        assert_eq!(sort_value(Some(pos("12A"))), 11);
        assert_eq!(sort_value(Some(pos("1B"))), 12);
        assert_eq!(sort_value(Some(pos("5B"))), 16);
        assert_eq!(sort_value(Some(pos("12B"))), 23);
    }

    #[test]
    fn test_inverse_lookup() {
        for pc in 0..12 {
            for mode in [0, 1] {
                let key = to_musical_key(pc, mode).unwrap();
                assert_eq!(key.wheel_position().key(), key);
            }
        }
    }

    #[test]
    fn test_compatible_positions() {
        let compatible = compatible_positions(pos("8A"));
        assert_eq!(compatible, [pos("8A"), pos("8B"), pos("9A"), pos("7A")]);
    }

    #[test]
    fn test_compatible_positions_wrap() {
        let compatible = compatible_positions(pos("12A"));
        assert!(compatible.contains(&pos("1A")));
        assert!(compatible.contains(&pos("11A")));

        let compatible = compatible_positions(pos("1B"));
        assert!(compatible.contains(&pos("12B")));
        assert!(compatible.contains(&pos("2B")));
    }

    #[test]
    fn test_parse_wheel_codes() {
        assert_eq!(pos("10b"), WheelPosition::new(10, Mode::Major).unwrap());
        assert!("0A".parse::<WheelPosition>().is_err());
        assert!("13B".parse::<WheelPosition>().is_err());
        assert!("8C".parse::<WheelPosition>().is_err());
        assert!("B".parse::<WheelPosition>().is_err());
        assert!("".parse::<WheelPosition>().is_err());
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(0, 1).as_deref(), Some("C Major"));
        assert_eq!(key_name(9, 0).as_deref(), Some("A Minor"));
        assert_eq!(key_name(-1, 0), None);
    }

    #[test]
    fn test_colors() {
        assert_eq!(color(None), UNKNOWN_KEY_COLOR);
        assert_eq!(color(Some(pos("5A"))), "#6BCB77");
        assert_eq!(color(Some(pos("5B"))), "#6BCB77");
        assert_eq!(color(Some(pos("12B"))), "#FF6B9D");
    }
}
