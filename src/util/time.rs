//! Frame timestamps: frequency aliases and date ranges.

use crate::error::{FloodVizError, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

/// Unit of a frequency alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyUnit {
    /// `S` / `s`
    Second,
    /// `T` / `min`
    Minute,
    /// `H` / `h`
    Hour,
    /// `D`
    Day,
    /// `W`, anchored on Sunday.
    Week,
}

impl FrequencyUnit {
    fn alias(self) -> &'static str {
        match self {
            Self::Second => "S",
            Self::Minute => "T",
            Self::Hour => "H",
            Self::Day => "D",
            Self::Week => "W",
        }
    }

    fn seconds(self) -> i64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 3_600,
            Self::Day => 86_400,
            Self::Week => 604_800,
        }
    }
}

/// Spacing between consecutive frames, e.g. `D`, `6H`, `15min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frequency {
    /// Multiplier applied to the unit.
    pub count: u32,
    /// Base unit.
    pub unit: FrequencyUnit,
}

impl Frequency {
    /// Parse a pandas-style offset alias.
    pub fn parse(alias: &str) -> Result<Self> {
        let invalid = || FloodVizError::InvalidFrequency {
            freq: alias.to_string(),
        };

        let trimmed = alias.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (digits, unit) = trimmed.split_at(split);

        let count = if digits.is_empty() {
            1
        } else {
            digits.parse::<u32>().map_err(|_| invalid())?
        };
        if count == 0 {
            return Err(invalid());
        }

        let unit = match unit {
            "S" | "s" => FrequencyUnit::Second,
            "T" | "min" => FrequencyUnit::Minute,
            "H" | "h" => FrequencyUnit::Hour,
            "D" => FrequencyUnit::Day,
            "W" | "W-SUN" => FrequencyUnit::Week,
            _ => return Err(invalid()),
        };
        Ok(Self { count, unit })
    }

    /// Step between consecutive timestamps.
    pub fn step(&self) -> Duration {
        Duration::seconds(i64::from(self.count) * self.unit.seconds())
    }

    /// First timestamp on or after `start` that lies on this frequency's anchor.
    fn anchor(&self, start: NaiveDateTime) -> Result<NaiveDateTime> {
        match self.unit {
            FrequencyUnit::Week => {
                let ahead = (7 - start.weekday().num_days_from_sunday()) % 7;
                start
                    .checked_add_signed(Duration::days(i64::from(ahead)))
                    .ok_or(FloodVizError::DateOverflow)
            }
            _ => Ok(start),
        }
    }
}

impl FromStr for Frequency {
    type Err = FloodVizError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 1 {
            f.write_str(self.unit.alias())
        } else {
            write!(f, "{}{}", self.count, self.unit.alias())
        }
    }
}

/// `periods` timestamps starting at `start` (after anchoring) spaced by `freq`.
///
/// Fails with `DateOverflow` before allocating when the last timestamp
/// falls outside the representable range.
pub fn date_range(start: NaiveDateTime, periods: usize, freq: Frequency) -> Result<Vec<NaiveDateTime>> {
    let first = freq.anchor(start)?;
    let step = freq.step();
    if let Some(last_offset) = periods.checked_sub(1) {
        i64::try_from(last_offset)
            .ok()
            .and_then(|n| step.num_seconds().checked_mul(n))
            .and_then(Duration::try_seconds)
            .and_then(|span| first.checked_add_signed(span))
            .ok_or(FloodVizError::DateOverflow)?;
    }

    let mut dates = Vec::new();
    let mut current = first;
    for i in 0..periods {
        if i > 0 {
            current = current
                .checked_add_signed(step)
                .ok_or(FloodVizError::DateOverflow)?;
        }
        dates.push(current);
    }
    Ok(dates)
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS`.
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime> {
    let s = input.trim();
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| FloodVizError::InvalidDate {
            input: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn is_sunday(dt: NaiveDateTime) -> bool {
        dt.weekday() == Weekday::Sun
    }

    fn dt(s: &str) -> NaiveDateTime {
        parse_datetime(s).unwrap()
    }

    #[test]
    fn daily_range() {
        let dates = date_range(dt("2019-01-01"), 5, Frequency::parse("D").unwrap()).unwrap();
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], dt("2019-01-01"));
        assert_eq!(dates[4], dt("2019-01-05"));
    }

    #[test]
    fn multiplied_hours_keep_time_of_day() {
        let freq = Frequency::parse("6H").unwrap();
        assert_eq!(freq.to_string(), "6H");
        let dates = date_range(dt("2019-01-01T10:30:00"), 3, freq).unwrap();
        assert_eq!(dates[2], dt("2019-01-02 22:30:00"));
    }

    #[test]
    fn minute_aliases() {
        assert_eq!(Frequency::parse("15min").unwrap().step(), Duration::minutes(15));
        assert_eq!(Frequency::parse("T").unwrap().step(), Duration::minutes(1));
    }

    #[test]
    fn weekly_rolls_forward_to_sunday() {
        // 2019-01-02 is a Wednesday.
        let dates = date_range(dt("2019-01-02T06:00:00"), 2, Frequency::parse("W").unwrap()).unwrap();
        assert!(is_sunday(dates[0]));
        assert_eq!(dates[0], dt("2019-01-06T06:00:00"));
        assert_eq!(dates[1], dt("2019-01-13T06:00:00"));
    }

    #[test]
    fn zero_periods_is_empty() {
        assert!(date_range(dt("2019-01-01"), 0, Frequency::parse("D").unwrap()).unwrap().is_empty());
    }

    #[test]
    fn range_past_calendar_end_overflows() {
        let err = date_range(dt("2019-01-01"), usize::MAX, Frequency::parse("D").unwrap()).unwrap_err();
        assert!(matches!(err, FloodVizError::DateOverflow));
        let err = date_range(dt("2019-01-01"), 200_000_000, Frequency::parse("W").unwrap()).unwrap_err();
        assert!(matches!(err, FloodVizError::DateOverflow));
    }

    #[test]
    fn rejects_unknown_aliases() {
        for bad in ["", "0D", "M", "2", "D2", "days"] {
            assert!(Frequency::parse(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(matches!(parse_datetime("01/02/2019"), Err(FloodVizError::InvalidDate { .. })));
    }
}
