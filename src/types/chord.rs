use crate::parser::error::TheoryError;
use crate::parser::scan::scan_root;
use crate::parser::symbols::CHORD_QUALITY_ALIASES;
use crate::types::interval::{Interval, IntervalQuality as Q, IntervalSize as S};
use crate::types::key::Key;
use crate::types::note_name::NoteName;
use crate::types::pitch::Accidental;
use anyhow::{anyhow, bail, Result};
use std::fmt;
use std::str::FromStr;

/// The named triad and seventh-chord qualities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    /// Major triad with a minor seventh
    DominantSeventh,
    MajorSeventh,
    MinorSeventh,
    MinorMajorSeventh,
    DiminishedSeventh,
    HalfDiminishedSeventh,
}

const fn iv(quality: Q, size: S) -> Interval {
    Interval::known(quality, size)
}

const P1: Interval = iv(Q::Perfect, S::Unison);
const M3: Interval = iv(Q::Major, S::Third);
const M3_MINOR: Interval = iv(Q::Minor, S::Third);
const P5: Interval = iv(Q::Perfect, S::Fifth);
const D5: Interval = iv(Q::Diminished, S::Fifth);
const A5: Interval = iv(Q::Augmented, S::Fifth);
const MAJ7: Interval = iv(Q::Major, S::Seventh);
const MIN7: Interval = iv(Q::Minor, S::Seventh);
const DIM7: Interval = iv(Q::Diminished, S::Seventh);

impl ChordQuality {
    pub const ALL: [ChordQuality; 10] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::DominantSeventh,
        ChordQuality::MajorSeventh,
        ChordQuality::MinorSeventh,
        ChordQuality::MinorMajorSeventh,
        ChordQuality::DiminishedSeventh,
        ChordQuality::HalfDiminishedSeventh,
    ];

    /// Intervals above the root, starting with the unison
    pub fn intervals(self) -> &'static [Interval] {
        match self {
            ChordQuality::Major => &[P1, M3, P5],
            ChordQuality::Minor => &[P1, M3_MINOR, P5],
            ChordQuality::Diminished => &[P1, M3_MINOR, D5],
            ChordQuality::Augmented => &[P1, M3, A5],
            ChordQuality::DominantSeventh => &[P1, M3, P5, MIN7],
            ChordQuality::MajorSeventh => &[P1, M3, P5, MAJ7],
            ChordQuality::MinorSeventh => &[P1, M3_MINOR, P5, MIN7],
            ChordQuality::MinorMajorSeventh => &[P1, M3_MINOR, P5, MAJ7],
            ChordQuality::DiminishedSeventh => &[P1, M3_MINOR, D5, DIM7],
            ChordQuality::HalfDiminishedSeventh => &[P1, M3_MINOR, D5, MIN7],
        }
    }

    /// Look up a quality token (`m7b5`, `Δ7`, `-`, `o` ...)
    pub fn parse(symbol: &str) -> Result<ChordQuality> {
        let trimmed = symbol.trim();
        CHORD_QUALITY_ALIASES
            .iter()
            .find(|(text, _)| *text == trimmed)
            .map(|(_, quality)| *quality)
            .ok_or_else(|| {
                anyhow!(TheoryError::parse(
                    "invalid chord quality",
                    trimmed,
                    symbol
                ))
            })
    }

    /// Quality whose interval list is exactly `intervals`
    pub fn from_intervals(intervals: &[Interval]) -> Option<ChordQuality> {
        Self::ALL
            .iter()
            .copied()
            .find(|quality| quality.intervals() == intervals)
    }

    /// Symbol written after the root when displaying a chord. Major triads
    /// are written bare.
    pub fn symbol(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::DominantSeventh => "7",
            ChordQuality::MajorSeventh => "maj7",
            ChordQuality::MinorSeventh => "m7",
            ChordQuality::MinorMajorSeventh => "mM7",
            ChordQuality::DiminishedSeventh => "dim7",
            ChordQuality::HalfDiminishedSeventh => "m7b5",
        }
    }
}

/// One figured-bass figure: an interval number above the bass, with the
/// accidental to print beside it when one is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Figure {
    pub accidental: Option<Accidental>,
    pub number: u8,
}

impl Figure {
    pub fn new(accidental: Option<Accidental>, number: u8) -> Self {
        Figure { accidental, number }
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.accidental {
            Some(accidental) => write!(f, "{}{}", accidental.glyph(), self.number),
            None => write!(f, "{}", self.number),
        }
    }
}

/// Conventional abbreviations: a full figure stack (top down) and the
/// figures that remain once the implied ones are dropped.
const ABBREVIATIONS: &[(&[u8], &[u8])] = &[
    (&[5, 3], &[]),
    (&[6, 3], &[6]),
    (&[7, 5, 3], &[7]),
    (&[6, 5, 3], &[6, 5]),
    (&[6, 4, 3], &[4, 3]),
    (&[6, 4, 2], &[4, 2]),
];

/// Drop implied figures. A figure carrying an accidental is never implied,
/// so a stack that would lose one is left whole.
fn abbreviate(figures: Vec<Figure>) -> Vec<Figure> {
    let numbers: Vec<u8> = figures.iter().map(|f| f.number).collect();

    for (full, kept) in ABBREVIATIONS {
        if numbers != *full {
            continue;
        }
        let droppable = figures
            .iter()
            .filter(|f| !kept.contains(&f.number))
            .all(|f| f.accidental.is_none());
        if droppable {
            return figures
                .into_iter()
                .filter(|f| kept.contains(&f.number))
                .collect();
        }
        break;
    }

    figures
}

/// A chord: root, intervals above the root, and which member is in the bass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    root: NoteName,
    quality: Vec<Interval>,
    inversion: usize,
    members: Vec<NoteName>, // Root position spelling, root first
}

impl Chord {
    /// Build a chord from one of the named qualities
    pub fn new(root: NoteName, quality: ChordQuality, inversion: usize) -> Result<Self> {
        Self::from_parts(root, quality.intervals().to_vec(), inversion)
    }

    /// Build a chord from an arbitrary interval list.
    ///
    /// Fails when `inversion` is not below the member count, or when a
    /// member cannot be spelled within double accidentals.
    pub fn from_parts(root: NoteName, quality: Vec<Interval>, inversion: usize) -> Result<Self> {
        if inversion >= quality.len() {
            bail!(TheoryError::invalid(format!(
                "inversion {} is out of range for a chord of {} notes",
                inversion,
                quality.len()
            )));
        }

        let members = quality
            .iter()
            .map(|interval| root.transpose_up(interval))
            .collect::<Result<Vec<_>>>()?;

        Ok(Chord {
            root,
            quality,
            inversion,
            members,
        })
    }

    /// Parse a chord symbol: root, optional quality token, optional `/bass`.
    ///
    /// A bare root is major when written upper case and minor when lower
    /// case (`D`, `d`). The bass must be one of the chord's own members.
    pub fn parse(input: &str) -> Result<Self> {
        let root = scan_root(input)?;
        let (token, bass) = match root.rest.split_once('/') {
            Some((token, bass)) => (token, Some(bass)),
            None => (root.rest, None),
        };

        let quality = if token.trim().is_empty() {
            if root.lowercase {
                ChordQuality::Minor
            } else {
                ChordQuality::Major
            }
        } else {
            ChordQuality::parse(token)
                .map_err(|_| anyhow!(TheoryError::parse("invalid chord quality", token, input)))?
        };

        let mut chord = Chord::new(root.name, quality, 0)?;

        if let Some(bass) = bass {
            let bass = NoteName::parse(bass)
                .map_err(|_| anyhow!(TheoryError::parse("invalid bass note", bass, input)))?;
            chord.inversion = chord
                .members
                .iter()
                .position(|member| *member == bass)
                .ok_or_else(|| {
                    anyhow!(TheoryError::invalid(format!(
                        "bass {} is not a member of {}",
                        bass, input
                    )))
                })?;
        }

        log::trace!("parsed chord {:?} as {}", input, chord);
        Ok(chord)
    }

    pub fn root(&self) -> NoteName {
        self.root
    }

    /// Intervals above the root, in root position order
    pub fn quality(&self) -> &[Interval] {
        &self.quality
    }

    /// The named quality, if the interval list matches one
    pub fn chord_quality(&self) -> Option<ChordQuality> {
        ChordQuality::from_intervals(&self.quality)
    }

    pub fn inversion(&self) -> usize {
        self.inversion
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members with the bass first: root position rotated left by the inversion
    pub fn note_names(&self) -> Vec<NoteName> {
        let mut names = self.members.clone();
        names.rotate_left(self.inversion);
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = NoteName> + '_ {
        self.members[self.inversion..]
            .iter()
            .chain(&self.members[..self.inversion])
            .copied()
    }

    pub fn bass(&self) -> NoteName {
        self.members[self.inversion]
    }

    /// Exact spelling match against the members
    pub fn contains(&self, name: &NoteName) -> bool {
        self.members.contains(name)
    }

    /// Same chord with another member in the bass
    pub fn with_inversion(&self, inversion: usize) -> Result<Chord> {
        Chord::from_parts(self.root, self.quality.clone(), inversion)
    }

    /// Move the root by `interval`, keeping quality and inversion
    pub fn transpose(&self, interval: &Interval) -> Result<Chord> {
        Chord::from_parts(
            self.root.transpose_up(interval)?,
            self.quality.clone(),
            self.inversion,
        )
    }

    /// Interval from the bass up to each other member, lowest first
    pub fn intervals(&self) -> Result<Vec<Interval>> {
        let bass = self.bass();
        self.iter()
            .skip(1)
            .map(|name| name.interval_above(&bass))
            .collect()
    }

    /// Figured-bass figures, top voice first.
    ///
    /// Without a key every figure carries its accidental. With a key only
    /// members outside the key do. With `shorthand`, the implied figures of
    /// the six standard triad and seventh-chord positions are dropped.
    pub fn figures(&self, key: Option<&Key>, shorthand: bool) -> Result<Vec<Figure>> {
        let bass = self.bass();
        let mut figures = Vec::with_capacity(self.len().saturating_sub(1));

        for name in self.note_names().iter().skip(1).rev() {
            let number = name.interval_above(&bass)?.number();
            let marked = key.map_or(true, |key| !key.contains(name));
            figures.push(Figure::new(marked.then(|| name.accidental()), number));
        }

        Ok(if shorthand {
            abbreviate(figures)
        } else {
            figures
        })
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.chord_quality() {
            Some(quality) => write!(f, "{}{}", self.root, quality.symbol())?,
            None => {
                let names: Vec<String> = self.members.iter().map(|n| n.to_string()).collect();
                write!(f, "[{}]", names.join(" "))?;
            }
        }
        if self.inversion > 0 {
            write!(f, "/{}", self.bass())?;
        }
        Ok(())
    }
}

impl FromStr for Chord {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Chord::parse(s)
    }
}
