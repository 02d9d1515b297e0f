//! Prefix scanning shared by chord and key symbols.

use crate::parser::error::TheoryError;
use crate::types::note_name::NoteName;
use crate::types::pitch::{Accidental, LetterName};
use anyhow::{anyhow, Result};

/// A root spelling read from the front of a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSymbol<'a> {
    pub name: NoteName,
    /// Whether the letter was written in lower case
    pub lowercase: bool,
    /// Everything after the accidental, untrimmed
    pub rest: &'a str,
}

/// Read a letter and an optional accidental from the start of `symbol`.
///
/// A leading `bb` is taken as a double flat. Otherwise at most one
/// accidental character is consumed, and a character that is not an
/// accidental leaves the root natural.
pub fn scan_root(symbol: &str) -> Result<RootSymbol<'_>> {
    let trimmed = symbol.trim();
    let mut chars = trimmed.chars();

    let first = chars
        .next()
        .ok_or_else(|| anyhow!(TheoryError::parse("missing letter name", "", symbol)))?;
    let letter = LetterName::from_char(first).ok_or_else(|| {
        anyhow!(TheoryError::parse(
            "unrecognized letter name",
            &first.to_string(),
            symbol
        ))
    })?;

    let rest = chars.as_str();
    let (accidental, rest) = if let Some(after) = rest.strip_prefix("bb") {
        (Accidental::DoubleFlat, after)
    } else {
        match rest.chars().next() {
            Some(c) => match Accidental::from_char(c) {
                Some(accidental) => (accidental, &rest[c.len_utf8()..]),
                None => (Accidental::Natural, rest),
            },
            None => (Accidental::Natural, rest),
        }
    };

    Ok(RootSymbol {
        name: NoteName::new(letter, accidental),
        lowercase: first.is_lowercase(),
        rest,
    })
}
