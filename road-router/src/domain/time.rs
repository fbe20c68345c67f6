//! Wall-clock time handling for itineraries.
//!
//! Travel requests give a departure as a bare clock time ("8:00AM" or
//! "08:00"). This module anchors such times to a calendar date so that
//! arrivals after midnight still compare and subtract correctly.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

/// Seconds in one hour of travel cost.
const SECS_PER_HOUR: f64 = 3600.0;

const KITCHEN_SHAPE: &str = "expected H:MMAM or H:MMPM format";
const HHMM_SHAPE: &str = "expected HH:MM format";

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A date-aware wall-clock time.
///
/// Road trips can run past midnight, so a bare time of day is not enough
/// to order departures and arrivals. `ClockTime` keeps the date alongside;
/// ordering compares the date first.
///
/// # Examples
///
/// ```
/// use road_router::domain::ClockTime;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let time = ClockTime::parse_kitchen("3:04PM", date).unwrap();
/// assert_eq!(time.to_string(), "3:04PM");
/// assert_eq!(time.hour(), 15);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    date: NaiveDate,
    time: NaiveTime,
}

impl ClockTime {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    fn from_datetime(dt: NaiveDateTime) -> Self {
        Self::new(dt.date(), dt.time())
    }

    fn at(date: NaiveDate, hour: u32, minute: u32) -> Result<Self, TimeError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(|time| Self::new(date, time))
            .ok_or_else(|| TimeError::new("time of day out of range"))
    }

    /// Parse a departure in either kitchen form (`3:04PM`) or 24-hour form
    /// (`15:04`). Surrounding whitespace and letter case are ignored.
    pub fn parse(s: &str, date: NaiveDate) -> Result<Self, TimeError> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        if lower.ends_with("am") || lower.ends_with("pm") {
            Self::parse_kitchen(s, date)
        } else {
            Self::parse_hhmm(s, date)
        }
    }

    /// Parse a 12-hour "kitchen" time such as `3:04PM` on `date`.
    ///
    /// The hour is 1-12 with one or two digits, the minute always has two
    /// digits, and the `AM`/`PM` suffix may be either case.
    ///
    /// # Examples
    ///
    /// ```
    /// use road_router::domain::ClockTime;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    ///
    /// assert!(ClockTime::parse_kitchen("8:00AM", date).is_ok());
    /// assert!(ClockTime::parse_kitchen("12:30pm", date).is_ok());
    ///
    /// assert!(ClockTime::parse_kitchen("13:00PM", date).is_err());
    /// assert!(ClockTime::parse_kitchen("8:00", date).is_err());
    /// ```
    pub fn parse_kitchen(s: &str, date: NaiveDate) -> Result<Self, TimeError> {
        let meridiem_at = s.len().checked_sub(2).filter(|&i| s.is_char_boundary(i));
        let Some((clock, meridiem)) = meridiem_at.map(|i| s.split_at(i)) else {
            return Err(TimeError::new(KITCHEN_SHAPE));
        };
        let afternoon = if meridiem.eq_ignore_ascii_case("pm") {
            true
        } else if meridiem.eq_ignore_ascii_case("am") {
            false
        } else {
            return Err(TimeError::new("expected AM or PM suffix"));
        };

        let (hour, minute) = split_clock(clock, KITCHEN_SHAPE)?;
        if !(1..=12).contains(&hour) {
            return Err(TimeError::new("hour must be 1-12"));
        }

        // 12AM is midnight and 12PM is noon
        let hour = hour % 12 + if afternoon { 12 } else { 0 };
        Self::at(date, hour, minute)
    }

    /// Parse a 24-hour time such as `15:04` on `date`.
    ///
    /// A single-digit hour (`8:05`) is accepted as well.
    pub fn parse_hhmm(s: &str, date: NaiveDate) -> Result<Self, TimeError> {
        let (hour, minute) = split_clock(s, HHMM_SHAPE)?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        Self::at(date, hour, minute)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Hour of the day, 0-23.
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    pub fn to_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Add a duration, rolling the date forward past midnight.
    ///
    /// Returns `None` when the result falls outside the calendar.
    ///
    /// # Examples
    ///
    /// ```
    /// use road_router::domain::ClockTime;
    /// use chrono::{Duration, NaiveDate};
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let time = ClockTime::parse_hhmm("23:30", date).unwrap();
    ///
    /// let later = time.checked_add(Duration::hours(1)).unwrap();
    /// assert_eq!(later.to_string(), "12:30AM");
    /// assert_eq!(later.date(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    /// ```
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        self.to_datetime()
            .checked_add_signed(duration)
            .map(Self::from_datetime)
    }

    /// The clock time after `hours` of travel, rounded to the nearest second.
    ///
    /// Negative, non-finite or off-calendar offsets give `None`.
    pub fn after_hours(&self, hours: f64) -> Option<Self> {
        if !hours.is_finite() || hours < 0.0 {
            return None;
        }
        let secs = (hours * SECS_PER_HOUR).round();
        if secs >= i64::MAX as f64 {
            return None;
        }
        self.checked_add(Duration::try_seconds(secs as i64)?)
    }

    /// Time elapsed from `earlier` to `self`; negative if `earlier` is later.
    pub fn signed_duration_since(&self, earlier: Self) -> Duration {
        self.to_datetime().signed_duration_since(earlier.to_datetime())
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({})", self.to_datetime())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (afternoon, hour) = self.time.hour12();
        let meridiem = if afternoon { "PM" } else { "AM" };
        write!(f, "{hour}:{:02}{meridiem}", self.minute())
    }
}

/// Split `H:MM` or `HH:MM` into its hour and minute.
///
/// Any other shape is reported with `shape`. The hour range is left to the
/// caller since the two formats disagree on it.
fn split_clock(clock: &str, shape: &'static str) -> Result<(u32, u32), TimeError> {
    let malformed = || TimeError::new(shape);
    let (hour, minute) = clock.split_once(':').ok_or_else(malformed)?;
    if !matches!(hour.len(), 1 | 2) || minute.len() != 2 {
        return Err(malformed());
    }

    let number = |digits: &str| {
        digits.bytes().try_fold(0u32, |acc, b| {
            b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
        })
    };
    let hour = number(hour).ok_or_else(malformed)?;
    let minute = number(minute).ok_or_else(malformed)?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }
    Ok((hour, minute))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_date()(
            year in 2000i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
        ) -> NaiveDate {
            NaiveDate::from_ymd_opt(year, month, day).unwrap()
        }
    }

    proptest! {
        /// Display output always parses back to the same time
        #[test]
        fn kitchen_display_roundtrip(hour in 0u32..24, minute in 0u32..60, date in valid_date()) {
            let t = ClockTime::new(date, NaiveTime::from_hms_opt(hour, minute, 0).unwrap());
            let parsed = ClockTime::parse_kitchen(&t.to_string(), date).unwrap();
            prop_assert_eq!(parsed, t);
        }

        /// Both accepted formats agree on the same instant
        #[test]
        fn formats_agree(hour in 0u32..24, minute in 0u32..60, date in valid_date()) {
            let hhmm = format!("{:02}:{:02}", hour, minute);
            let t = ClockTime::parse(&hhmm, date).unwrap();
            prop_assert_eq!(ClockTime::parse(&t.to_string(), date).unwrap(), t);
        }

        /// Travel offsets never move time backwards
        #[test]
        fn after_hours_monotonic(a in 0.0f64..100.0, b in 0.0f64..100.0, date in valid_date()) {
            let start = ClockTime::new(date, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(start.after_hours(lo).unwrap() <= start.after_hours(hi).unwrap());
        }
    }
}
