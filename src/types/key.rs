//! Keys, modes and scale degrees

use crate::parser::error::TheoryError;
use crate::parser::scan::scan_root;
use crate::parser::symbols::MODE_NAMES;
use crate::types::interval::{Interval, IntervalQuality as Q, IntervalSize as S};
use crate::types::note_name::NoteName;
use anyhow::{anyhow, bail, Result};
use std::fmt;
use std::str::FromStr;

/// The seven diatonic modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Ionian
    Major,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    /// Aeolian
    Minor,
    Locrian,
}

const fn iv(quality: Q, size: S) -> Interval {
    Interval::known(quality, size)
}

const MAJOR: [Interval; 7] = [
    iv(Q::Perfect, S::Unison),
    iv(Q::Major, S::Second),
    iv(Q::Major, S::Third),
    iv(Q::Perfect, S::Fourth),
    iv(Q::Perfect, S::Fifth),
    iv(Q::Major, S::Sixth),
    iv(Q::Major, S::Seventh),
];

const DORIAN: [Interval; 7] = [
    iv(Q::Perfect, S::Unison),
    iv(Q::Major, S::Second),
    iv(Q::Minor, S::Third),
    iv(Q::Perfect, S::Fourth),
    iv(Q::Perfect, S::Fifth),
    iv(Q::Major, S::Sixth),
    iv(Q::Minor, S::Seventh),
];

const PHRYGIAN: [Interval; 7] = [
    iv(Q::Perfect, S::Unison),
    iv(Q::Minor, S::Second),
    iv(Q::Minor, S::Third),
    iv(Q::Perfect, S::Fourth),
    iv(Q::Perfect, S::Fifth),
    iv(Q::Minor, S::Sixth),
    iv(Q::Minor, S::Seventh),
];

const LYDIAN: [Interval; 7] = [
    iv(Q::Perfect, S::Unison),
    iv(Q::Major, S::Second),
    iv(Q::Major, S::Third),
    iv(Q::Augmented, S::Fourth),
    iv(Q::Perfect, S::Fifth),
    iv(Q::Major, S::Sixth),
    iv(Q::Major, S::Seventh),
];

const MIXOLYDIAN: [Interval; 7] = [
    iv(Q::Perfect, S::Unison),
    iv(Q::Major, S::Second),
    iv(Q::Major, S::Third),
    iv(Q::Perfect, S::Fourth),
    iv(Q::Perfect, S::Fifth),
    iv(Q::Major, S::Sixth),
    iv(Q::Minor, S::Seventh),
];

const MINOR: [Interval; 7] = [
    iv(Q::Perfect, S::Unison),
    iv(Q::Major, S::Second),
    iv(Q::Minor, S::Third),
    iv(Q::Perfect, S::Fourth),
    iv(Q::Perfect, S::Fifth),
    iv(Q::Minor, S::Sixth),
    iv(Q::Minor, S::Seventh),
];

const LOCRIAN: [Interval; 7] = [
    iv(Q::Perfect, S::Unison),
    iv(Q::Minor, S::Second),
    iv(Q::Minor, S::Third),
    iv(Q::Perfect, S::Fourth),
    iv(Q::Diminished, S::Fifth),
    iv(Q::Minor, S::Sixth),
    iv(Q::Minor, S::Seventh),
];

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Major,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Minor,
        Mode::Locrian,
    ];

    /// Intervals from the tonic to each of the seven degrees
    pub fn intervals(self) -> &'static [Interval; 7] {
        match self {
            Mode::Major => &MAJOR,
            Mode::Dorian => &DORIAN,
            Mode::Phrygian => &PHRYGIAN,
            Mode::Lydian => &LYDIAN,
            Mode::Mixolydian => &MIXOLYDIAN,
            Mode::Minor => &MINOR,
            Mode::Locrian => &LOCRIAN,
        }
    }

    /// Case-insensitive mode name (`dorian`, `Aeolian`, `MAJOR`)
    pub fn from_name(name: &str) -> Option<Mode> {
        let lowered = name.trim().to_lowercase();
        MODE_NAMES
            .iter()
            .find(|(text, _)| *text == lowered)
            .map(|(_, mode)| *mode)
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Dorian => "dorian",
            Mode::Phrygian => "phrygian",
            Mode::Lydian => "lydian",
            Mode::Mixolydian => "mixolydian",
            Mode::Minor => "minor",
            Mode::Locrian => "locrian",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A scale degree, by function name or by number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Degree {
    Tonic,
    Supertonic,
    Mediant,
    Subdominant,
    Dominant,
    Submediant,
    /// The seventh note of the mode, whatever its quality
    Seventh,
    /// A minor second below the tonic, in every mode
    LeadingTone,
    /// A major second below the tonic, in every mode
    Subtonic,
}

impl Degree {
    /// Degree for a number from 1 (tonic) to 7 (seventh)
    pub fn from_number(number: u8) -> Result<Degree> {
        match number {
            1 => Ok(Degree::Tonic),
            2 => Ok(Degree::Supertonic),
            3 => Ok(Degree::Mediant),
            4 => Ok(Degree::Subdominant),
            5 => Ok(Degree::Dominant),
            6 => Ok(Degree::Submediant),
            7 => Ok(Degree::Seventh),
            _ => Err(anyhow!(TheoryError::invalid(format!(
                "invalid scale degree ({})",
                number
            )))),
        }
    }
}

/// A tonic and a mode. The seven scale members are spelled once, when the
/// key is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    tonic: NoteName,
    mode: Mode,
    scale: [NoteName; 7],
}

impl Key {
    /// Fails only when a scale member would need more than a double accidental
    pub fn new(tonic: NoteName, mode: Mode) -> Result<Self> {
        let mut scale = [tonic; 7];
        for (slot, interval) in scale.iter_mut().zip(mode.intervals()) {
            *slot = tonic.transpose_up(interval)?;
        }
        Ok(Key { tonic, mode, scale })
    }

    /// Parse a tonic with an optional mode: `C`, `d#`, `ebbM`, `gm`,
    /// `Ab dorian`, `C#-minor`.
    ///
    /// Without a mode an upper-case tonic is major and a lower-case one minor.
    pub fn parse(input: &str) -> Result<Self> {
        let root = scan_root(input)?;
        let rest = root.rest.trim_start();
        let rest = rest.strip_prefix('-').unwrap_or(rest).trim();

        let mode = match rest {
            "" if root.lowercase => Mode::Minor,
            "" => Mode::Major,
            "M" => Mode::Major,
            "m" => Mode::Minor,
            name => Mode::from_name(name)
                .ok_or_else(|| anyhow!(TheoryError::parse("invalid mode", name, input)))?,
        };

        let key = Key::new(root.name, mode)?;
        log::trace!("parsed key {:?} as {}", input, key);
        Ok(key)
    }

    pub fn tonic(&self) -> NoteName {
        self.tonic
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The seven scale members, tonic first
    pub fn note_names(&self) -> &[NoteName; 7] {
        &self.scale
    }

    /// Whether the pitch class of `name` is one of the scale members.
    /// Spelling is ignored: `Db` counts as diatonic to D major.
    pub fn contains(&self, name: &NoteName) -> bool {
        self.scale.iter().any(|member| member.pitch() == name.pitch())
    }

    pub fn degree(&self, degree: Degree) -> Result<NoteName> {
        let index = match degree {
            Degree::Tonic => 0,
            Degree::Supertonic => 1,
            Degree::Mediant => 2,
            Degree::Subdominant => 3,
            Degree::Dominant => 4,
            Degree::Submediant => 5,
            Degree::Seventh => 6,
            Degree::LeadingTone => {
                return self.tonic.transpose_down(&iv(Q::Minor, S::Second));
            }
            Degree::Subtonic => {
                return self.tonic.transpose_down(&iv(Q::Major, S::Second));
            }
        };
        Ok(self.scale[index])
    }

    /// Degree by number, 1-7
    pub fn nth(&self, number: u8) -> Result<NoteName> {
        if number == 0 || number > 7 {
            bail!(TheoryError::invalid(format!(
                "invalid scale degree ({})",
                number
            )));
        }
        Ok(self.scale[number as usize - 1])
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.mode)
    }
}

impl FromStr for Key {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Key::parse(s)
    }
}
