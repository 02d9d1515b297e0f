//! Relative motion between two voices
//!
//! Each voice moves up, down or not at all from one beat to the next,
//! judged by staff position (octave and letter) rather than by pitch. The
//! pair of directions, together with whether the harmonic interval size is
//! kept, gives the classical motion types.

use crate::parser::error::TheoryError;
use crate::types::note::{distance, Note};
use anyhow::{bail, Result};
use std::fmt;

/// Which way a single voice moves between two beats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    None,
}

impl Direction {
    /// Compare staff positions, so `C4 -> C#4` does not move
    pub fn from_notes(from: &Note, to: &Note) -> Direction {
        let before = (from.octave(), from.letter());
        let after = (to.octave(), to.letter());
        match after.cmp(&before) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less => Direction::Down,
            std::cmp::Ordering::Equal => Direction::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Motion {
    /// Same direction, same interval size
    Parallel,
    /// Opposite directions, same interval size (e.g. fifth to twelfth)
    Antiparallel,
    Similar,
    Contrary,
    /// One voice holds while the other moves
    Oblique,
    None,
}

impl Motion {
    /// Classify the motion from one beat to the next. Each beat is a pair
    /// of simultaneous notes, first voice then second voice.
    pub fn from_beats(first: (&Note, &Note), second: (&Note, &Note)) -> Result<Motion> {
        let upper = Direction::from_notes(first.0, second.0);
        let lower = Direction::from_notes(first.1, second.1);
        let parallel = distance(first.0, first.1)?.size() == distance(second.0, second.1)?.size();

        let motion = match (upper, lower) {
            (Direction::None, Direction::None) => Motion::None,
            (Direction::None, _) | (_, Direction::None) => Motion::Oblique,
            (a, b) if a == b => {
                if parallel {
                    Motion::Parallel
                } else {
                    Motion::Similar
                }
            }
            _ => {
                if parallel {
                    Motion::Antiparallel
                } else {
                    Motion::Contrary
                }
            }
        };

        Ok(motion)
    }

    pub fn name(self) -> &'static str {
        match self {
            Motion::Parallel => "parallel",
            Motion::Antiparallel => "antiparallel",
            Motion::Similar => "similar",
            Motion::Contrary => "contrary",
            Motion::Oblique => "oblique",
            Motion::None => "none",
        }
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Motion between each pair of adjacent beats of two voices.
///
/// The voices must have the same number of notes; fewer than two beats
/// yields no motions.
pub fn analyze_motion(voice1: &[Note], voice2: &[Note]) -> Result<Vec<Motion>> {
    if voice1.len() != voice2.len() {
        bail!(TheoryError::invalid(format!(
            "voices have different lengths ({} and {})",
            voice1.len(),
            voice2.len()
        )));
    }

    let motions = voice1
        .windows(2)
        .zip(voice2.windows(2))
        .map(|(upper, lower)| Motion::from_beats((&upper[0], &lower[0]), (&upper[1], &lower[1])))
        .collect::<Result<Vec<_>>>()?;

    log::trace!("analyzed {} beats: {:?}", voice1.len(), motions);
    Ok(motions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(s: &str) -> Note {
        s.parse().unwrap()
    }

    fn notes(s: &str) -> Vec<Note> {
        s.split_whitespace().map(n).collect()
    }

    #[test]
    fn test_direction() {
        assert_eq!(Direction::from_notes(&n("C4"), &n("D4")), Direction::Up);
        assert_eq!(Direction::from_notes(&n("C4"), &n("B3")), Direction::Down);
        assert_eq!(Direction::from_notes(&n("C4"), &n("C#4")), Direction::None);
        assert_eq!(Direction::from_notes(&n("B#3"), &n("C4")), Direction::Up);
    }

    #[test]
    fn test_from_beats() {
        let cases = [
            (("F3", "Ab4"), ("E3", "G4"), Motion::Parallel),
            (("F3", "Ab4"), ("E3", "G5"), Motion::Antiparallel),
            (("F3", "Ab4"), ("E3", "C4"), Motion::Similar),
            (("F3", "Ab4"), ("E3", "C5"), Motion::Contrary),
            (("F3", "G4"), ("E3", "G4"), Motion::Oblique),
            (("F3", "G4"), ("F3", "G4"), Motion::None),
        ];

        for ((a1, b1), (a2, b2), expected) in cases {
            let motion =
                Motion::from_beats((&n(a1), &n(b1)), (&n(a2), &n(b2))).unwrap();
            assert_eq!(motion, expected, "{} {} -> {} {}", a1, b1, a2, b2);
        }
    }

    #[test]
    fn test_analyze_motion() {
        let voice1 = notes("C5  C#5 D5 B4  C5 D5 E5 F5 C6 A4 E5 E5");
        let voice2 = notes("F#4 F#4 G4 G#4 A4 E4 E4 A4 E4 D4 A3 A3");

        let expected = vec![
            Motion::None,
            Motion::Parallel,
            Motion::Oblique,
            Motion::Parallel,
            Motion::Contrary,
            Motion::Oblique,
            Motion::Similar,
            Motion::Antiparallel,
            Motion::Similar,
            Motion::Antiparallel,
            Motion::None,
        ];

        assert_eq!(analyze_motion(&voice1, &voice2).unwrap(), expected);
    }

    #[test]
    fn test_analyze_motion_short_voices() {
        assert!(analyze_motion(&[], &[]).unwrap().is_empty());
        assert!(analyze_motion(&notes("D2"), &notes("F5")).unwrap().is_empty());
    }

    #[test]
    fn test_analyze_motion_unequal_voices() {
        let err = analyze_motion(&notes("C4 D4"), &notes("E4")).unwrap_err();
        assert!(err.downcast_ref::<TheoryError>().unwrap().is_invalid_value());
    }

    #[test]
    fn test_display() {
        assert_eq!(Motion::Antiparallel.to_string(), "antiparallel");
    }
}
