//! # Tonal Core
//!
//! Symbolic music theory: spelled notes and intervals, chords with
//! figured-bass analysis, keys and modes, two-voice motion, and exact
//! rational durations mapped onto measures and beats.
//!
//! Everything is a plain value. Parsing and arithmetic that can fail return
//! [`anyhow::Result`] carrying a [`TheoryError`].
//!
//! ## Features
//!
//! - **serde**: Serialize/Deserialize for the value types
//!
//! ## Example
//!
//! ```
//! use tonal_core::{Chord, Interval, Key, Note};
//!
//! let c4: Note = "C4".parse()?;
//! let fifth: Interval = "P5".parse()?;
//! assert_eq!((c4 + fifth)?, "G4".parse::<Note>()?);
//!
//! let chord: Chord = "G7/F".parse()?;
//! let key: Key = "C".parse()?;
//! let figures: Vec<String> = chord
//!     .figures(Some(&key), true)?
//!     .iter()
//!     .map(|f| f.to_string())
//!     .collect();
//! assert_eq!(figures, ["4", "2"]);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod parser;
pub mod types;

// Re-export commonly used types
pub use parser::TheoryError;
pub use types::{
    analyze_motion, distance, Accidental, Chord, ChordQuality, Clock, Degree, Direction,
    Duration, Figure, Interval, IntervalQuality, IntervalSize, Key, LetterName, Meter, Mode,
    Motion, Note, NoteName, Time,
};
