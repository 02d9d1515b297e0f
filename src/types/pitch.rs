//! Letter names and accidentals, the spelling vocabulary shared by
//! [`NoteName`](crate::types::NoteName) and [`Note`](crate::types::Note).

use crate::parser::error::TheoryError;
use crate::parser::symbols::ACCIDENTAL_SYMBOLS;
use anyhow::{anyhow, Result};
use std::fmt;

/// One of the seven natural note letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LetterName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl LetterName {
    /// Letters in stepping order. Interval sizes count positions in this array.
    pub const ALL: [LetterName; 7] = [
        LetterName::C,
        LetterName::D,
        LetterName::E,
        LetterName::F,
        LetterName::G,
        LetterName::A,
        LetterName::B,
    ];

    /// Semitones from C up to this letter (C=0 ... B=11)
    pub fn semitones_above_c(self) -> i32 {
        match self {
            LetterName::C => 0,
            LetterName::D => 2,
            LetterName::E => 4,
            LetterName::F => 5,
            LetterName::G => 7,
            LetterName::A => 9,
            LetterName::B => 11,
        }
    }

    /// Position in [`LetterName::ALL`]
    pub fn index(self) -> usize {
        match self {
            LetterName::C => 0,
            LetterName::D => 1,
            LetterName::E => 2,
            LetterName::F => 3,
            LetterName::G => 4,
            LetterName::A => 5,
            LetterName::B => 6,
        }
    }

    /// Letter at a cyclic position; any integer wraps around the seven letters.
    pub fn from_index(index: i64) -> LetterName {
        Self::ALL[index.rem_euclid(7) as usize]
    }

    /// Case-insensitive letter lookup
    pub fn from_char(c: char) -> Option<LetterName> {
        match c.to_ascii_uppercase() {
            'C' => Some(LetterName::C),
            'D' => Some(LetterName::D),
            'E' => Some(LetterName::E),
            'F' => Some(LetterName::F),
            'G' => Some(LetterName::G),
            'A' => Some(LetterName::A),
            'B' => Some(LetterName::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            LetterName::C => 'C',
            LetterName::D => 'D',
            LetterName::E => 'E',
            LetterName::F => 'F',
            LetterName::G => 'G',
            LetterName::A => 'A',
            LetterName::B => 'B',
        }
    }
}

impl fmt::Display for LetterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Chromatic alteration of a letter, from double flat to double sharp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    pub const ALL: [Accidental; 5] = [
        Accidental::DoubleFlat,
        Accidental::Flat,
        Accidental::Natural,
        Accidental::Sharp,
        Accidental::DoubleSharp,
    ];

    /// Semitone offset applied to the letter (-2..=2)
    pub fn offset(self) -> i32 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    /// Accidental spelling a semitone offset. Offsets beyond a double
    /// sharp or double flat have no spelling.
    pub fn from_offset(offset: i32) -> Result<Accidental> {
        match offset {
            -2 => Ok(Accidental::DoubleFlat),
            -1 => Ok(Accidental::Flat),
            0 => Ok(Accidental::Natural),
            1 => Ok(Accidental::Sharp),
            2 => Ok(Accidental::DoubleSharp),
            _ => Err(anyhow!(TheoryError::invalid(format!(
                "no accidental alters a letter by {} semitones",
                offset
            )))),
        }
    }

    /// Parse an accidental symbol. The empty string is a natural.
    pub fn parse(symbol: &str) -> Result<Accidental> {
        let trimmed = symbol.trim();
        ACCIDENTAL_SYMBOLS
            .iter()
            .find(|(text, _)| *text == trimmed)
            .map(|(_, accidental)| *accidental)
            .ok_or_else(|| {
                anyhow!(TheoryError::parse(
                    "unrecognized accidental",
                    trimmed,
                    symbol
                ))
            })
    }

    /// Single-character symbol lookup, used when scanning chord and key symbols
    pub fn from_char(c: char) -> Option<Accidental> {
        let mut buf = [0u8; 4];
        let text: &str = c.encode_utf8(&mut buf);
        ACCIDENTAL_SYMBOLS
            .iter()
            .find(|(symbol, _)| !symbol.is_empty() && *symbol == text)
            .map(|(_, accidental)| *accidental)
    }

    /// ASCII spelling used by `Display`
    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "x",
        }
    }

    /// Unicode music glyph
    pub fn glyph(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "𝄫",
            Accidental::Flat => "♭",
            Accidental::Natural => "♮",
            Accidental::Sharp => "♯",
            Accidental::DoubleSharp => "𝄪",
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
