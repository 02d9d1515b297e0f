//! Quality + size intervals
//!
//! Sizes are simple (unison through octave); compound sizes collapse to
//! their simple equivalent when parsed or summed, so a tenth is a third.

use crate::parser::error::TheoryError;
use anyhow::{anyhow, bail, Result};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntervalQuality {
    Diminished,
    Minor,
    Perfect,
    Major,
    Augmented,
}

impl IntervalQuality {
    /// Quality for a semitone count measured against the size's baseline
    /// (perfect or major), taken mod 12.
    fn from_offset(size: IntervalSize, offset: i32) -> Option<IntervalQuality> {
        match (offset.rem_euclid(12), size.is_perfect_class()) {
            (1, _) => Some(IntervalQuality::Augmented),
            (0, true) => Some(IntervalQuality::Perfect),
            (0, false) => Some(IntervalQuality::Major),
            (11, true) => Some(IntervalQuality::Diminished),
            (11, false) => Some(IntervalQuality::Minor),
            (10, false) => Some(IntervalQuality::Diminished),
            _ => None,
        }
    }

    /// Quality of the inverted interval
    pub fn invert(self) -> IntervalQuality {
        match self {
            IntervalQuality::Diminished => IntervalQuality::Augmented,
            IntervalQuality::Minor => IntervalQuality::Major,
            IntervalQuality::Perfect => IntervalQuality::Perfect,
            IntervalQuality::Major => IntervalQuality::Minor,
            IntervalQuality::Augmented => IntervalQuality::Diminished,
        }
    }

    fn symbol(self) -> char {
        match self {
            IntervalQuality::Diminished => 'd',
            IntervalQuality::Minor => 'm',
            IntervalQuality::Perfect => 'P',
            IntervalQuality::Major => 'M',
            IntervalQuality::Augmented => 'A',
        }
    }

    fn from_symbol(c: char) -> Option<IntervalQuality> {
        match c {
            'P' | 'p' => Some(IntervalQuality::Perfect),
            'M' => Some(IntervalQuality::Major),
            'm' => Some(IntervalQuality::Minor),
            'd' | 'D' => Some(IntervalQuality::Diminished),
            'A' | 'a' => Some(IntervalQuality::Augmented),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IntervalQuality::Diminished => "diminished",
            IntervalQuality::Minor => "minor",
            IntervalQuality::Perfect => "perfect",
            IntervalQuality::Major => "major",
            IntervalQuality::Augmented => "augmented",
        }
    }
}

/// Simple interval size, 0-based internally (unison = 0, octave = 7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntervalSize {
    Unison,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Octave,
}

impl IntervalSize {
    pub const ALL: [IntervalSize; 8] = [
        IntervalSize::Unison,
        IntervalSize::Second,
        IntervalSize::Third,
        IntervalSize::Fourth,
        IntervalSize::Fifth,
        IntervalSize::Sixth,
        IntervalSize::Seventh,
        IntervalSize::Octave,
    ];

    /// Size for a 0-based letter distance. Anything past an octave is
    /// reduced to its simple equivalent; exact octave multiples stay octaves.
    pub fn from_index(index: usize) -> IntervalSize {
        let reduced = if index <= 7 {
            index
        } else {
            match index % 7 {
                0 => 7,
                r => r,
            }
        };
        Self::ALL[reduced]
    }

    pub fn index(self) -> usize {
        match self {
            IntervalSize::Unison => 0,
            IntervalSize::Second => 1,
            IntervalSize::Third => 2,
            IntervalSize::Fourth => 3,
            IntervalSize::Fifth => 4,
            IntervalSize::Sixth => 5,
            IntervalSize::Seventh => 6,
            IntervalSize::Octave => 7,
        }
    }

    /// 1-based interval number
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Unisons, fourths, fifths and octaves
    pub fn is_perfect_class(self) -> bool {
        matches!(
            self,
            IntervalSize::Unison | IntervalSize::Fourth | IntervalSize::Fifth | IntervalSize::Octave
        )
    }

    pub fn invert(self) -> IntervalSize {
        Self::ALL[7 - self.index()]
    }

    /// Semitones of the perfect or major interval of this size
    fn baseline_steps(self) -> i32 {
        match self {
            IntervalSize::Unison => 0,
            IntervalSize::Second => 2,
            IntervalSize::Third => 4,
            IntervalSize::Fourth => 5,
            IntervalSize::Fifth => 7,
            IntervalSize::Sixth => 9,
            IntervalSize::Seventh => 11,
            IntervalSize::Octave => 12,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IntervalSize::Unison => "unison",
            IntervalSize::Second => "second",
            IntervalSize::Third => "third",
            IntervalSize::Fourth => "fourth",
            IntervalSize::Fifth => "fifth",
            IntervalSize::Sixth => "sixth",
            IntervalSize::Seventh => "seventh",
            IntervalSize::Octave => "octave",
        }
    }
}

/// Distance between two spelled pitches, e.g. a perfect fifth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    quality: IntervalQuality,
    size: IntervalSize,
}

impl Interval {
    /// Build an interval, rejecting major/minor perfect-class sizes and
    /// perfect imperfect-class sizes.
    pub fn new(quality: IntervalQuality, size: IntervalSize) -> Result<Self> {
        let legal = match quality {
            IntervalQuality::Perfect => size.is_perfect_class(),
            IntervalQuality::Major | IntervalQuality::Minor => !size.is_perfect_class(),
            IntervalQuality::Diminished | IntervalQuality::Augmented => true,
        };
        if !legal {
            bail!(TheoryError::invalid(format!(
                "there is no {} {}",
                quality.name(),
                size.name()
            )));
        }
        Ok(Interval { quality, size })
    }

    /// Table constructor for combinations known to be legal
    pub(crate) const fn known(quality: IntervalQuality, size: IntervalSize) -> Self {
        Interval { quality, size }
    }

    /// Parse `quality size`, e.g. `P5`, `m3`, `d10`, `A4`.
    ///
    /// Quality letters: `P`/`p` perfect, `M` major, `m` minor, `d`/`D`
    /// diminished, `A`/`a` augmented. The size is a positive integer.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        let quality_char = chars
            .next()
            .ok_or_else(|| anyhow!(TheoryError::parse("missing interval quality", "", input)))?;
        let size_text = chars.as_str();

        let number: i64 = size_text.parse().map_err(|_| {
            anyhow!(TheoryError::parse(
                "invalid interval size",
                size_text,
                input
            ))
        })?;
        if number <= 0 {
            bail!(TheoryError::parse(
                "interval size must be positive, got",
                size_text,
                input
            ));
        }

        let quality = IntervalQuality::from_symbol(quality_char).ok_or_else(|| {
            anyhow!(TheoryError::parse(
                "unrecognized interval quality",
                &quality_char.to_string(),
                input
            ))
        })?;
        let size = IntervalSize::from_index(number as usize - 1);

        let interval = Interval::new(quality, size)?;
        log::trace!("parsed interval {:?} as {}", input, interval);
        Ok(interval)
    }

    pub fn quality(&self) -> IntervalQuality {
        self.quality
    }

    pub fn size(&self) -> IntervalSize {
        self.size
    }

    /// 1-based size number
    pub fn number(&self) -> u8 {
        self.size.number()
    }

    /// Semitone span, from -1 (diminished unison) to 13 (augmented octave)
    pub fn steps(&self) -> i32 {
        let baseline = self.size.baseline_steps();
        let adjustment = match (self.quality, self.size.is_perfect_class()) {
            (IntervalQuality::Perfect, _) | (IntervalQuality::Major, _) => 0,
            (IntervalQuality::Minor, _) => -1,
            (IntervalQuality::Augmented, _) => 1,
            (IntervalQuality::Diminished, true) => -1,
            (IntervalQuality::Diminished, false) => -2,
        };
        baseline + adjustment
    }

    /// Interval that completes this one to an octave
    pub fn invert(self) -> Interval {
        Interval {
            quality: self.quality.invert(),
            size: self.size.invert(),
        }
    }

    /// Interval between two spellings whose letters are `letters` apart
    /// and whose pitches are `semitones` apart.
    pub(crate) fn from_distance(letters: usize, semitones: i32) -> Result<Interval> {
        let size = IntervalSize::from_index(letters);
        let quality = IntervalQuality::from_offset(size, semitones - size.baseline_steps())
            .ok_or_else(|| {
                anyhow!(TheoryError::invalid(format!(
                    "no interval quality spans {} semitones over a {}",
                    semitones.rem_euclid(12),
                    size.name()
                )))
            })?;
        Ok(Interval { quality, size })
    }

    /// Stack two intervals. Fails when the combined span has no quality
    /// between diminished and augmented (e.g. two augmented seconds).
    pub fn combine(self, other: Interval) -> Result<Interval> {
        let letters = self.size.index() + other.size.index();
        let steps = self.steps() + other.steps();
        Self::from_distance(letters, steps).map_err(|_| {
            anyhow!(TheoryError::invalid(format!(
                "{} plus {} has no simple quality",
                self, other
            )))
        })
    }

    /// Long form, e.g. "perfect fifth"
    pub fn name(&self) -> String {
        format!("{} {}", self.quality.name(), self.size.name())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.quality.symbol(), self.size.number())
    }
}

impl FromStr for Interval {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Interval::parse(s)
    }
}

impl Add for Interval {
    type Output = Result<Interval>;

    fn add(self, other: Interval) -> Self::Output {
        self.combine(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(s: &str) -> Interval {
        s.parse().unwrap()
    }

    #[test]
    fn test_parsing() {
        let cases = [
            ("P5", IntervalQuality::Perfect, IntervalSize::Fifth),
            (" d10", IntervalQuality::Diminished, IntervalSize::Third),
            ("m3  ", IntervalQuality::Minor, IntervalSize::Third),
            ("M3", IntervalQuality::Major, IntervalSize::Third),
            ("a8", IntervalQuality::Augmented, IntervalSize::Octave),
            ("A11", IntervalQuality::Augmented, IntervalSize::Fourth),
            ("P15", IntervalQuality::Perfect, IntervalSize::Octave),
            ("D2", IntervalQuality::Diminished, IntervalSize::Second),
        ];

        for (text, quality, size) in cases {
            assert_eq!(iv(text), Interval::new(quality, size).unwrap(), "{}", text);
        }
    }

    #[test]
    fn test_compound_reduces_to_simple() {
        assert_eq!(iv("d10"), iv("d3"));
        assert_eq!(iv("M9"), iv("M2"));
        assert_eq!(iv("P12"), iv("P5"));
    }

    #[test]
    fn test_parse_errors() {
        let err = Interval::parse("Z5").unwrap_err();
        let err = err.downcast_ref::<TheoryError>().unwrap();
        assert!(err.is_parse());
        assert!(err.message().contains("quality"));

        let err = Interval::parse("P0").unwrap_err();
        assert!(err.downcast_ref::<TheoryError>().unwrap().message().contains("size"));

        assert!(Interval::parse("P-4").is_err());
        assert!(Interval::parse("M3.5").is_err());
        assert!(Interval::parse("M").is_err());
        assert!(Interval::parse("").is_err());
    }

    #[test]
    fn test_illegal_combinations() {
        for text in ["M5", "m4", "P3", "P6", "M1", "m8"] {
            let err = Interval::parse(text).unwrap_err();
            assert!(
                err.downcast_ref::<TheoryError>().unwrap().is_invalid_value(),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["P1", "d1", "A1", "m2", "M2", "d3", "A4", "d5", "P5", "m6", "M7", "d8", "P8", "A8"] {
            assert_eq!(iv(text).to_string(), text);
        }
        assert_eq!(iv("d10").to_string(), "d3");
        assert_eq!(iv("P5").name(), "perfect fifth");
    }

    #[test]
    fn test_steps_table() {
        let cases = [
            ("d1", -1),
            ("P1", 0),
            ("A1", 1),
            ("d2", 0),
            ("m2", 1),
            ("M2", 2),
            ("A2", 3),
            ("d3", 2),
            ("m3", 3),
            ("M3", 4),
            ("A3", 5),
            ("d4", 4),
            ("P4", 5),
            ("A4", 6),
            ("d5", 6),
            ("P5", 7),
            ("A5", 8),
            ("d6", 7),
            ("m6", 8),
            ("M6", 9),
            ("A6", 10),
            ("d7", 9),
            ("m7", 10),
            ("M7", 11),
            ("A7", 12),
            ("d8", 11),
            ("P8", 12),
            ("A8", 13),
        ];
        for (text, steps) in cases {
            assert_eq!(iv(text).steps(), steps, "{}", text);
        }
    }

    #[test]
    fn test_inversion() {
        let cases = [
            ("P1", "P8"),
            ("d1", "A8"),
            ("m2", "M7"),
            ("M3", "m6"),
            ("A4", "d5"),
            ("P5", "P4"),
            ("d7", "A2"),
        ];
        for (a, b) in cases {
            assert_eq!(iv(a).invert(), iv(b));
            assert_eq!(iv(b).invert(), iv(a));
            assert_eq!(iv(a).invert().invert(), iv(a));
        }
    }

    #[test]
    fn test_addition() {
        let cases = [
            ("P1", "P1", "P1"),
            ("m3", "P5", "m7"),
            ("d1", "P8", "d8"),
            ("M3", "m3", "P5"),
            ("m3", "m3", "d5"),
            ("P5", "P5", "M2"),
            ("P8", "P8", "P8"),
            ("A4", "A4", "A7"),
            ("d5", "d5", "d2"),
            ("M2", "M2", "M3"),
        ];
        for (a, b, sum) in cases {
            assert_eq!((iv(a) + iv(b)).unwrap(), iv(sum), "{} + {}", a, b);
        }
    }

    #[test]
    fn test_interval_plus_inversion_is_octave_class() {
        for text in ["P1", "P4", "P5", "P8"] {
            let sum = (iv(text) + iv(text).invert()).unwrap();
            assert_eq!(sum, iv("P8"));
        }
        assert_eq!((iv("M3") + iv("m6")).unwrap(), iv("P8"));
        assert_eq!((iv("A4") + iv("d5")).unwrap(), iv("P8"));
    }

    #[test]
    fn test_addition_without_quality_fails() {
        let err = (iv("A2") + iv("A2")).unwrap_err();
        assert!(err.downcast_ref::<TheoryError>().unwrap().is_invalid_value());
        assert!((iv("d2") + iv("d2")).is_err());
    }
}
