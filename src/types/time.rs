//! Metric positions: meters, score times and the clock that maps elapsed
//! duration onto them
//!
//! All positions are exact. A clock never accumulates drift because the
//! elapsed total is a rational number of whole notes.

use crate::parser::error::TheoryError;
use crate::types::duration::Duration;
use anyhow::{anyhow, bail, Result};
use num_rational::Ratio;
use num_traits::Zero;
use std::fmt;
use std::str::FromStr;

/// Time signature: `beats` notes of length `1/division` per measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    beats: i64,
    division: i64,
}

impl Meter {
    pub fn new(beats: i64, division: i64) -> Result<Self> {
        if beats <= 0 || division <= 0 {
            bail!(TheoryError::invalid(format!(
                "meter {}/{} must have a positive number of beats and division",
                beats, division
            )));
        }
        Ok(Meter { beats, division })
    }

    /// Parse `"beats/division"`, e.g. `"6/8"`
    pub fn parse(input: &str) -> Result<Self> {
        let (beats, division) = input
            .split_once('/')
            .ok_or_else(|| anyhow!(TheoryError::parse("expected beats/division", input, input)))?;

        let number = |text: &str| {
            text.trim()
                .parse::<i64>()
                .map_err(|_| anyhow!(TheoryError::parse("invalid meter number", text, input)))
        };

        let meter = Meter::new(number(beats)?, number(division)?)?;
        log::trace!("parsed meter {:?} as {}", input, meter);
        Ok(meter)
    }

    pub fn beats(&self) -> i64 {
        self.beats
    }

    pub fn division(&self) -> i64 {
        self.division
    }

    /// Length of one beat
    pub fn beat_length(&self) -> Duration {
        Duration::new(1, self.division)
    }

    /// Length of one full measure
    pub fn measure_length(&self) -> Duration {
        Duration::new(self.beats, self.division)
    }
}

impl Default for Meter {
    fn default() -> Self {
        Meter {
            beats: 4,
            division: 4,
        }
    }
}

impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats, self.division)
    }
}

impl FromStr for Meter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Meter::parse(s)
    }
}

/// A metric position. Measure and beat count from 1; `pulse` is the
/// fraction of a beat past the beat's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time {
    pub measure: i64,
    pub beat: i64,
    pub pulse: Ratio<i64>,
}

impl Time {
    /// Position on a beat
    pub fn new(measure: i64, beat: i64) -> Self {
        Time {
            measure,
            beat,
            pulse: Ratio::zero(),
        }
    }

    pub fn with_pulse(measure: i64, beat: i64, pulse: Ratio<i64>) -> Self {
        Time {
            measure,
            beat,
            pulse,
        }
    }

    /// Whether the position falls exactly on a beat
    pub fn is_on_beat(&self) -> bool {
        self.pulse.is_zero()
    }

    /// Position of `elapsed` whole notes from the start under `meter`
    pub fn at(elapsed: Duration, meter: &Meter) -> Time {
        let (measures, remainder) = elapsed.div_rem(meter.measure_length());
        let beats = remainder.as_ratio() * meter.division();

        Time {
            measure: measures + 1,
            beat: beats.floor().to_integer() + 1,
            pulse: beats.fract(),
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.measure, self.beat)?;
        if !self.pulse.is_zero() {
            write!(f, "+{}", self.pulse)?;
        }
        Ok(())
    }
}

/// Running position in a piece. Only `tick` advances it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clock {
    meter: Meter,
    elapsed: Duration,
}

impl Clock {
    pub fn new(meter: Meter) -> Self {
        Clock {
            meter,
            elapsed: Duration::zero(),
        }
    }

    /// Advance by `duration` and return the new position.
    ///
    /// Panics if the elapsed total overflows `Ratio<i64>`; see
    /// [`Clock::try_tick`].
    pub fn tick(&mut self, duration: Duration) -> Time {
        self.elapsed = self.elapsed + duration;
        let time = self.time();
        log::trace!("clock +{} -> {} ({} elapsed)", duration, time, self.elapsed);
        time
    }

    /// Like [`Clock::tick`], but leaves the clock unchanged and fails when
    /// the elapsed total would overflow.
    pub fn try_tick(&mut self, duration: Duration) -> Result<Time> {
        let elapsed = self.elapsed;
        self.elapsed = elapsed.checked_add(duration).ok_or_else(|| {
            anyhow!(TheoryError::invalid(format!(
                "elapsed time {} + {} overflows",
                elapsed, duration
            )))
        })?;
        Ok(self.time())
    }

    pub fn time(&self) -> Time {
        Time::at(self.elapsed, &self.meter)
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn meter(&self) -> Meter {
        self.meter
    }
}
