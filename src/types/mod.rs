// src/types/mod.rs

pub mod chord;
pub mod duration;
pub mod interval;
pub mod key;
pub mod motion;
pub mod note;
pub mod note_name;
pub mod pitch;
pub mod time;

pub use chord::{Chord, ChordQuality, Figure};
pub use duration::Duration;
pub use interval::{Interval, IntervalQuality, IntervalSize};
pub use key::{Degree, Key, Mode};
pub use motion::{analyze_motion, Direction, Motion};
pub use note::{distance, Note};
pub use note_name::NoteName;
pub use pitch::{Accidental, LetterName};
pub use time::{Clock, Meter, Time};
