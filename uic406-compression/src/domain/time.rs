//! Timetable time text handling.
//!
//! The core works on plain integer times. Data files may carry either those
//! integers directly or wall-clock text (`HH:MM` / `HH:MM:SS`), which is
//! mapped to seconds since midnight. Compressed times start at zero and can
//! exceed one day, so clock output lets the hour field grow past 23.

use chrono::{Duration, NaiveTime, Timelike};
use serde::Deserialize;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// How times are represented in data and solution files.
///
/// # Examples
///
/// ```
/// use uic406_compression::domain::TimeFormat;
///
/// assert_eq!(TimeFormat::Seconds.parse("125").unwrap(), 125);
/// assert_eq!(TimeFormat::Clock.parse("01:02:05").unwrap(), 3725);
/// assert_eq!(TimeFormat::Clock.format(3725), "01:02:05");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// Plain integers.
    #[default]
    Seconds,
    /// `HH:MM[:SS]` text, stored as seconds since midnight.
    Clock,
}

impl TimeFormat {
    /// Parse a non-empty time field.
    pub fn parse(&self, s: &str) -> Result<i64, TimeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimeError::new(s, "empty time"));
        }

        match self {
            TimeFormat::Seconds => s
                .parse::<i64>()
                .map_err(|_| TimeError::new(s, "expected an integer")),
            TimeFormat::Clock => {
                let time = NaiveTime::parse_from_str(s, "%H:%M:%S")
                    .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
                    .map_err(|_| TimeError::new(s, "expected HH:MM or HH:MM:SS"))?;
                Ok(i64::from(time.num_seconds_from_midnight()))
            }
        }
    }

    /// Parse an optional field: blank text means "no time".
    pub fn parse_optional(&self, s: &str) -> Result<Option<i64>, TimeError> {
        if s.trim().is_empty() {
            Ok(None)
        } else {
            self.parse(s).map(Some)
        }
    }

    /// Render a time for output.
    pub fn format(&self, value: i64) -> String {
        match self {
            TimeFormat::Seconds => value.to_string(),
            TimeFormat::Clock => {
                let d = Duration::seconds(value.abs());
                let sign = if value < 0 { "-" } else { "" };
                format!(
                    "{sign}{:02}:{:02}:{:02}",
                    d.num_hours(),
                    d.num_minutes() % 60,
                    d.num_seconds() % 60
                )
            }
        }
    }

    /// Render an optional time; `None` becomes an empty field.
    pub fn format_optional(&self, value: Option<i64>) -> String {
        value.map(|v| self.format(v)).unwrap_or_default()
    }
}

/// Turns clock times read in travel order into a non-decreasing sequence.
///
/// Clock text only covers one day, so a time earlier than the one before it
/// is taken to be on the following day.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayRollover {
    last: Option<i64>,
    offset: i64,
}

impl DayRollover {
    pub fn next(&mut self, time: i64) -> i64 {
        let mut time = time + self.offset;
        if let Some(last) = self.last {
            while time < last {
                self.offset += SECONDS_PER_DAY;
                time += SECONDS_PER_DAY;
            }
        }
        self.last = Some(time);
        time
    }

    /// Number of midnights crossed so far.
    pub fn days(&self) -> i64 {
        self.offset / SECONDS_PER_DAY
    }
}
