use crate::parser::error::TheoryError;
use crate::types::interval::Interval;
use crate::types::note_name::NoteName;
use crate::types::pitch::{Accidental, LetterName};
use anyhow::{anyhow, Result};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A spelled pitch with an octave, in scientific pitch notation (C4 = middle C).
///
/// Notes order by spelling, not by sounding pitch: octave first, then letter,
/// then accidental. `B#3 < Cb4` even though B#3 sounds higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    letter: LetterName,
    accidental: Accidental,
    octave: i32,
}

impl Note {
    pub fn new(letter: LetterName, accidental: Accidental, octave: i32) -> Self {
        Note {
            letter,
            accidental,
            octave,
        }
    }

    /// Parse letter, accidental and octave (`C4`, `d#4`, `Ebb-20`).
    ///
    /// Everything between the letter and the first sign or digit is the
    /// accidental; the rest is the (possibly negative) octave.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        let first = chars
            .next()
            .ok_or_else(|| anyhow!(TheoryError::parse("missing letter name", "", input)))?;
        let letter = LetterName::from_char(first).ok_or_else(|| {
            anyhow!(TheoryError::parse(
                "couldn't find letter name",
                &first.to_string(),
                input
            ))
        })?;

        let rest = chars.as_str();
        let split = rest
            .find(|c: char| c == '+' || c == '-' || c.is_ascii_digit())
            .ok_or_else(|| anyhow!(TheoryError::parse("missing octave number", rest, input)))?;
        let (symbol, octave_text) = rest.split_at(split);

        let accidental = Accidental::parse(symbol)
            .map_err(|_| anyhow!(TheoryError::parse("unrecognized accidental", symbol, input)))?;
        let octave = octave_text
            .parse::<i32>()
            .map_err(|_| anyhow!(TheoryError::parse("invalid octave", octave_text, input)))?;

        let note = Note::new(letter, accidental, octave);
        log::trace!("parsed note {:?} as {}", input, note);
        Ok(note)
    }

    pub fn letter(&self) -> LetterName {
        self.letter
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    pub fn note_name(&self) -> NoteName {
        NoteName::new(self.letter, self.accidental)
    }

    /// MIDI note number; C-1 is 0 and C4 is 60. Wide enough for every
    /// `i32` octave.
    pub fn pitch(&self) -> i64 {
        (i64::from(self.octave) + 1) * 12
            + i64::from(self.letter.semitones_above_c() + self.accidental.offset())
    }

    /// Natural note `letter_index` letters above C of `octave`, carrying
    /// whole octaves out of the index.
    fn natural(letter_index: i64, octave: i32) -> Result<Note> {
        let octave = i32::try_from(letter_index.div_euclid(7))
            .ok()
            .and_then(|carry| octave.checked_add(carry))
            .ok_or_else(|| {
                anyhow!(TheoryError::invalid(format!(
                    "octave {} out of range after transposition",
                    octave
                )))
            })?;
        Ok(Note::new(
            LetterName::from_index(letter_index),
            Accidental::Natural,
            octave,
        ))
    }

    /// Respell `natural` with the accidental `offset` semitones away
    fn altered(natural: Note, offset: i64) -> Result<Note> {
        let accidental = i32::try_from(offset)
            .map_err(|_| {
                anyhow!(TheoryError::invalid(format!(
                    "no accidental spans {} semitones",
                    offset
                )))
            })
            .and_then(Accidental::from_offset)?;
        Ok(Note::new(natural.letter, accidental, natural.octave))
    }

    /// Spell the note `interval` above this one, carrying into the next
    /// octave when the letter wraps past B.
    pub fn transpose_up(&self, interval: &Interval) -> Result<Note> {
        let steps = self.letter.index() as i64 + interval.size().index() as i64;
        let target = Self::natural(steps, self.octave)?;
        let offset = i64::from(interval.steps()) - (target.pitch() - self.pitch());
        Self::altered(target, offset)
    }

    /// Spell the note `interval` below this one
    pub fn transpose_down(&self, interval: &Interval) -> Result<Note> {
        let steps = self.letter.index() as i64 - interval.size().index() as i64;
        let target = Self::natural(steps, self.octave)?;
        let offset = (self.pitch() - target.pitch()) - i64::from(interval.steps());
        Self::altered(target, offset)
    }

    fn spelling_key(&self) -> (i32, LetterName, Accidental) {
        (self.octave, self.letter, self.accidental)
    }
}

/// Simple interval between two notes, in either order.
///
/// Compound distances are reduced (a tenth comes back as a third), while a
/// unison and an octave stay distinct.
pub fn distance(a: &Note, b: &Note) -> Result<Interval> {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };

    let mut letters = high.letter.index() as i64 - low.letter.index() as i64;
    if low.octave != high.octave {
        letters += 7;
    }

    // Qualities only depend on the semitone span mod 12
    let semitones = (high.pitch() - low.pitch()).rem_euclid(12) as i32;
    Interval::from_distance(letters as usize, semitones)
}

impl PartialOrd for Note {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Note {
    fn cmp(&self, other: &Self) -> Ordering {
        self.spelling_key().cmp(&other.spelling_key())
    }
}

impl Hash for Note {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pitch().hash(state);
    }
}

impl FromStr for Note {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Note::parse(s)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.letter, self.accidental, self.octave)
    }
}

impl Add<Interval> for Note {
    type Output = Result<Note>;

    fn add(self, interval: Interval) -> Self::Output {
        self.transpose_up(&interval)
    }
}

impl Sub<Interval> for Note {
    type Output = Result<Note>;

    fn sub(self, interval: Interval) -> Self::Output {
        self.transpose_down(&interval)
    }
}

// Simple interval between the two notes
impl Sub<Note> for Note {
    type Output = Result<Interval>;

    fn sub(self, other: Note) -> Self::Output {
        distance(&self, &other)
    }
}
