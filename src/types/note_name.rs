use crate::parser::error::TheoryError;
use crate::types::interval::Interval;
use crate::types::note::{distance, Note};
use crate::types::pitch::{Accidental, LetterName};
use anyhow::{anyhow, Result};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A spelled pitch class: letter plus accidental, no octave.
///
/// Equality is spelling-exact (`C#` != `Db`) but hashing uses the pitch
/// class, so enharmonic spellings share a bucket in hashed containers and
/// are told apart by equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteName {
    letter: LetterName,
    accidental: Accidental,
}

impl NoteName {
    pub fn new(letter: LetterName, accidental: Accidental) -> Self {
        NoteName { letter, accidental }
    }

    /// Parse a letter followed by an optional accidental (`C`, `Bbb`, `F♯`)
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        let first = chars
            .next()
            .ok_or_else(|| anyhow!(TheoryError::parse("missing letter name", "", input)))?;
        let letter = LetterName::from_char(first).ok_or_else(|| {
            anyhow!(TheoryError::parse(
                "unrecognized letter name",
                &first.to_string(),
                input
            ))
        })?;
        let symbol = chars.as_str();
        let accidental = Accidental::parse(symbol)
            .map_err(|_| anyhow!(TheoryError::parse("unrecognized accidental", symbol, input)))?;

        Ok(NoteName::new(letter, accidental))
    }

    pub fn letter(&self) -> LetterName {
        self.letter
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    /// Pitch class, 0-11
    pub fn pitch(&self) -> i32 {
        (self.letter.semitones_above_c() + self.accidental.offset()).rem_euclid(12)
    }

    pub fn with_octave(self, octave: i32) -> Note {
        Note::new(self.letter, self.accidental, octave)
    }

    /// Spell the note name `interval` above this one.
    ///
    /// The letter steps forward by the interval size; the accidental makes
    /// up whatever semitones the natural letter misses, taken the short way
    /// round the octave.
    pub fn transpose_up(&self, interval: &Interval) -> Result<NoteName> {
        let letter =
            LetterName::from_index((self.letter.index() + interval.size().index()) as i64);
        let natural_distance = letter.semitones_above_c() - self.pitch();
        let offset = (interval.steps() - natural_distance).rem_euclid(12);
        let offset = if offset.abs() <= (offset - 12).abs() {
            offset
        } else {
            offset - 12
        };
        Ok(NoteName::new(letter, Accidental::from_offset(offset)?))
    }

    /// Spell the note name `interval` below this one
    pub fn transpose_down(&self, interval: &Interval) -> Result<NoteName> {
        self.transpose_up(&interval.invert())
    }

    /// Interval from `lower` up to this note name
    pub fn interval_above(&self, lower: &NoteName) -> Result<Interval> {
        let low = lower.with_octave(0);
        let mut high = self.with_octave(0);
        if high < low {
            high = self.with_octave(1);
        }
        distance(&high, &low)
    }
}

impl Hash for NoteName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pitch().hash(state);
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.accidental)
    }
}

impl FromStr for NoteName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        NoteName::parse(s)
    }
}

impl From<Note> for NoteName {
    fn from(note: Note) -> Self {
        note.note_name()
    }
}

impl Add<Interval> for NoteName {
    type Output = Result<NoteName>;

    fn add(self, interval: Interval) -> Self::Output {
        self.transpose_up(&interval)
    }
}

impl Sub<Interval> for NoteName {
    type Output = Result<NoteName>;

    fn sub(self, interval: Interval) -> Self::Output {
        self.transpose_down(&interval)
    }
}

// Interval from `other` up to `self`
impl Sub<NoteName> for NoteName {
    type Output = Result<Interval>;

    fn sub(self, other: NoteName) -> Self::Output {
        self.interval_above(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn nn(s: &str) -> NoteName {
        s.parse().unwrap()
    }

    fn iv(s: &str) -> Interval {
        s.parse().unwrap()
    }

    #[test]
    fn test_parsing() {
        assert_eq!(nn("A#"), NoteName::new(LetterName::A, Accidental::Sharp));
        assert_eq!(nn("bbb"), NoteName::new(LetterName::B, Accidental::DoubleFlat));
        assert_eq!(nn("C"), NoteName::new(LetterName::C, Accidental::Natural));
        assert_eq!(nn("E♮"), NoteName::new(LetterName::E, Accidental::Natural));
        assert_eq!(nn(" G♭ "), NoteName::new(LetterName::G, Accidental::Flat));
    }

    #[test]
    fn test_parse_errors() {
        let err = NoteName::parse("H").unwrap_err();
        assert!(err.downcast_ref::<TheoryError>().unwrap().is_parse());
        let err = NoteName::parse("C?").unwrap_err();
        assert!(err.to_string().contains("\"?\""));
        assert!(NoteName::parse("").is_err());
    }

    #[test]
    fn test_pitch() {
        let cases = [("C", 0), ("D", 2), ("Cx", 2), ("Ab", 8), ("Bx", 1), ("Cb", 11)];
        for (name, pitch) in cases {
            assert_eq!(nn(name).pitch(), pitch, "{}", name);
        }
    }

    #[test]
    fn test_display() {
        for name in ["C", "F#", "Bb", "Ebb", "Gx"] {
            assert_eq!(nn(name).to_string(), name);
        }
        assert_eq!(nn("F♯").to_string(), "F#");
    }

    #[test]
    fn test_equality_is_spelling_exact_hash_is_pitch() {
        assert_ne!(nn("C#"), nn("Db"));

        let mut set = HashSet::new();
        set.insert(nn("C#"));
        set.insert(nn("Db"));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&nn("Db")));
        assert!(!set.contains(&nn("Bx")));
    }

    #[test]
    fn test_addition() {
        let cases = [
            ("C", "d1", "Cb"),
            ("G", "d1", "Gb"),
            ("Bx", "d1", "B#"),
            ("Ab", "d1", "Abb"),
            ("Dbb", "P1", "Dbb"),
            ("Bx", "P1", "Bx"),
            ("B", "A1", "B#"),
            ("D#", "A1", "Dx"),
            ("F", "A1", "F#"),
            ("F", "d2", "Gbb"),
            ("C#", "d2", "Db"),
            ("B", "d2", "Cb"),
            ("D", "m2", "Eb"),
            ("B", "m2", "C"),
            ("Gb", "m2", "Abb"),
            ("Gb", "M2", "Ab"),
            ("Bb", "M2", "C"),
            ("Bb", "A2", "C#"),
            ("C#", "A2", "Dx"),
            ("Eb", "d3", "Gbb"),
            ("Eb", "m3", "Gb"),
            ("Bb", "M3", "D"),
            ("Bb", "A3", "D#"),
            ("E", "A3", "Gx"),
            ("E", "d4", "Ab"),
            ("Cb", "d4", "Fbb"),
            ("G", "d4", "Cb"),
            ("F#", "P4", "B"),
            ("F#", "A4", "B#"),
            ("Dbb", "A4", "Gb"),
            ("G#", "d5", "D"),
            ("Bb", "d5", "Fb"),
            ("Bb", "P5", "F"),
            ("F", "P5", "C"),
            ("B", "P5", "F#"),
            ("F#", "A5", "Cx"),
            ("B", "d6", "Gb"),
            ("C#", "d6", "Ab"),
            ("A", "m6", "F"),
            ("B", "M6", "G#"),
            ("Cbb", "M6", "Abb"),
            ("Cbb", "A6", "Ab"),
            ("C", "d7", "Bbb"),
            ("B#", "d7", "A"),
            ("E", "m7", "D"),
            ("F#", "m7", "E"),
            ("D#", "M7", "Cx"),
            ("B", "M7", "A#"),
            ("B#", "M7", "Ax"),
            ("C", "A7", "B#"),
            ("Cb", "A7", "B"),
            ("B", "A7", "Ax"),
            ("G", "d8", "Gb"),
            ("C", "d8", "Cb"),
            ("Bx", "d8", "B#"),
            ("Cb", "P8", "Cb"),
            ("B#", "P8", "B#"),
            ("C", "P8", "C"),
            ("E", "A8", "E#"),
            ("Fbb", "A8", "Fb"),
            ("B#", "A8", "Bx"),
        ];

        for (a, b, c) in cases {
            assert_eq!((nn(a) + iv(b)).unwrap(), nn(c), "{} + {}", a, b);
        }
    }

    #[test]
    fn test_interval_subtraction() {
        let cases = [
            ("D", "d1", "D#"),
            ("Gb", "d1", "G"),
            ("B", "d1", "B#"),
            ("Dbb", "P1", "Dbb"),
            ("C", "P1", "C"),
            ("B", "A1", "Bb"),
            ("D#", "A1", "D"),
            ("F", "d2", "E#"),
            ("C#", "d2", "Bx"),
            ("D", "m2", "C#"),
            ("C", "m2", "B"),
            ("Fb", "M2", "Ebb"),
            ("Bx", "A2", "A#"),
            ("C#", "A2", "Bb"),
            ("Eb", "d3", "C#"),
            ("D", "m3", "B"),
            ("Bb", "M3", "Gb"),
            ("Bb", "A3", "Gbb"),
            ("E", "A3", "Cb"),
            ("E", "d4", "B#"),
            ("Cb", "d4", "G"),
            ("F#", "P4", "C#"),
            ("F#", "A4", "C"),
            ("D", "A4", "Ab"),
            ("G#", "d5", "Cx"),
            ("Bb", "d5", "E"),
            ("F", "P5", "Bb"),
            ("F#", "A5", "Bb"),
            ("B", "d6", "Dx"),
            ("C#", "d6", "Ex"),
            ("A", "m6", "C#"),
            ("B", "M6", "D"),
            ("Cb", "M6", "Ebb"),
            ("Eb", "d7", "F#"),
            ("Cb", "d7", "D"),
            ("E", "m7", "F#"),
            ("F#", "m7", "G#"),
            ("D#", "M7", "E"),
            ("B", "M7", "C"),
            ("C", "A7", "Dbb"),
            ("C#", "A7", "Db"),
            ("G", "d8", "G#"),
            ("C", "d8", "C#"),
            ("Cb", "P8", "Cb"),
            ("B#", "P8", "B#"),
            ("E", "A8", "Eb"),
            ("Fx", "A8", "F#"),
        ];

        for (a, b, c) in cases {
            assert_eq!((nn(a) - iv(b)).unwrap(), nn(c), "{} - {}", a, b);
        }
    }

    #[test]
    fn test_note_name_difference() {
        let cases = [
            ("C", "B", "m2"),
            ("C#", "C", "A1"),
            ("Db", "Ab", "P4"),
            ("Eb", "F#", "d7"),
            ("F", "D", "m3"),
            ("G", "G#", "d8"),
            ("Ab", "C", "m6"),
            ("A", "Ab", "A1"),
            ("B", "E", "P5"),
            ("B", "C#", "m7"),
        ];

        for (a, b, c) in cases {
            assert_eq!((nn(a) - nn(b)).unwrap(), iv(c), "{} - {}", a, b);
        }
    }

    #[test]
    fn test_addition_past_double_sharp_fails() {
        let err = (nn("Bx") + iv("A8")).map(|_| ()).unwrap_err();
        let err = (err.downcast_ref::<TheoryError>()).unwrap().clone();
        assert!(err.is_invalid_value());
        // a plain A8 still works from a single sharp
        assert_eq!((nn("B#") + iv("A8")).unwrap(), nn("Bx"));
    }
}
