//! Alias tables for the notation grammars
//!
//! Each table maps every accepted spelling to its value. Lookups are exact
//! (case-sensitive) unless the caller normalizes first.

use crate::types::chord::ChordQuality;
use crate::types::key::Mode;
use crate::types::pitch::Accidental;

/// Accidental spellings, ASCII and Unicode
pub const ACCIDENTAL_SYMBOLS: &[(&str, Accidental)] = &[
    ("𝄫", Accidental::DoubleFlat),
    ("bb", Accidental::DoubleFlat),
    ("♭", Accidental::Flat),
    ("b", Accidental::Flat),
    ("♮", Accidental::Natural),
    ("", Accidental::Natural),
    ("♯", Accidental::Sharp),
    ("#", Accidental::Sharp),
    ("𝄪", Accidental::DoubleSharp),
    ("x", Accidental::DoubleSharp),
];

/// Chord-quality tokens as they appear after the root of a chord symbol
pub const CHORD_QUALITY_ALIASES: &[(&str, ChordQuality)] = &[
    ("M", ChordQuality::Major),
    ("maj", ChordQuality::Major),
    ("m", ChordQuality::Minor),
    ("min", ChordQuality::Minor),
    ("-", ChordQuality::Minor),
    ("dim", ChordQuality::Diminished),
    ("º", ChordQuality::Diminished),
    ("°", ChordQuality::Diminished),
    ("o", ChordQuality::Diminished),
    ("aug", ChordQuality::Augmented),
    ("+", ChordQuality::Augmented),
    ("7", ChordQuality::DominantSeventh),
    ("Mm7", ChordQuality::DominantSeventh),
    ("maj7", ChordQuality::MajorSeventh),
    ("M7", ChordQuality::MajorSeventh),
    ("Δ", ChordQuality::MajorSeventh),
    ("Δ7", ChordQuality::MajorSeventh),
    ("min7", ChordQuality::MinorSeventh),
    ("m7", ChordQuality::MinorSeventh),
    ("-7", ChordQuality::MinorSeventh),
    ("mM7", ChordQuality::MinorMajorSeventh),
    ("-M7", ChordQuality::MinorMajorSeventh),
    ("-Δ7", ChordQuality::MinorMajorSeventh),
    ("minmaj7", ChordQuality::MinorMajorSeventh),
    ("o7", ChordQuality::DiminishedSeventh),
    ("º7", ChordQuality::DiminishedSeventh),
    ("°7", ChordQuality::DiminishedSeventh),
    ("dim7", ChordQuality::DiminishedSeventh),
    ("ø", ChordQuality::HalfDiminishedSeventh),
    ("ø7", ChordQuality::HalfDiminishedSeventh),
    ("m7b5", ChordQuality::HalfDiminishedSeventh),
    ("m7♭5", ChordQuality::HalfDiminishedSeventh),
    ("min7b5", ChordQuality::HalfDiminishedSeventh),
    ("min7♭5", ChordQuality::HalfDiminishedSeventh),
];

/// Mode names in lower case; `M` and `m` are handled by the key parser
/// because they are case-sensitive.
pub const MODE_NAMES: &[(&str, Mode)] = &[
    ("major", Mode::Major),
    ("ionian", Mode::Major),
    ("dorian", Mode::Dorian),
    ("phrygian", Mode::Phrygian),
    ("lydian", Mode::Lydian),
    ("mixolydian", Mode::Mixolydian),
    ("minor", Mode::Minor),
    ("aeolian", Mode::Minor),
    ("locrian", Mode::Locrian),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_aliases_are_unique() {
        let accidentals: HashSet<&str> = ACCIDENTAL_SYMBOLS.iter().map(|(s, _)| *s).collect();
        assert_eq!(accidentals.len(), ACCIDENTAL_SYMBOLS.len());

        let qualities: HashSet<&str> = CHORD_QUALITY_ALIASES.iter().map(|(s, _)| *s).collect();
        assert_eq!(qualities.len(), CHORD_QUALITY_ALIASES.len());

        let modes: HashSet<&str> = MODE_NAMES.iter().map(|(s, _)| *s).collect();
        assert_eq!(modes.len(), MODE_NAMES.len());
    }

    #[test]
    fn test_every_chord_quality_has_an_alias() {
        for quality in ChordQuality::ALL {
            assert!(CHORD_QUALITY_ALIASES.iter().any(|(_, q)| *q == quality));
        }
    }

    #[test]
    fn test_every_mode_is_named() {
        for mode in Mode::ALL {
            assert!(MODE_NAMES.iter().any(|(_, m)| *m == mode));
        }
    }
}
