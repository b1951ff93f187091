//! Civil instants and the astronomical time scales derived from them.
//!
//! A birth time is naive local time with no zone attached. It is taken to be
//! UT as-is: sidereal time reads it directly, and the ephemeris adds ΔT to
//! reach Terrestrial Time.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Day of the Unix epoch.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// First and last civil years the ephemeris is fitted for.
pub const MIN_YEAR: i32 = 1800;
pub const MAX_YEAR: i32 = 2199;

/// Birth time used when none is known.
pub const DEFAULT_TIME: &str = "12:00";

/// A point in civil time, timezone-naive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "NaiveDateTime", into = "NaiveDateTime")]
pub struct Instant(NaiveDateTime);

impl TryFrom<NaiveDateTime> for Instant {
    type Error = ChartError;

    fn try_from(datetime: NaiveDateTime) -> Result<Self, Self::Error> {
        Self::new(datetime)
    }
}

impl From<Instant> for NaiveDateTime {
    fn from(instant: Instant) -> Self {
        instant.0
    }
}

impl Instant {
    pub fn new(datetime: NaiveDateTime) -> Result<Self, ChartError> {
        let year = datetime.year();
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ChartError::invalid(format!(
                "year {year} is outside the supported range {MIN_YEAR}..={MAX_YEAR}"
            )));
        }
        Ok(Self(datetime))
    }

    /// Combine a `YYYY-MM-DD` date with an optional `HH:MM` (or `HH:MM:SS`) time.
    ///
    /// A missing or blank time means noon.
    pub fn parse(date: &str, time: Option<&str>) -> Result<Self, ChartError> {
        let date_str = date.trim();
        let day = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|e| ChartError::invalid(format!("birth date '{date_str}': {e}")))?;

        Self::new(day.and_time(parse_clock(time)?))
    }

    pub fn from_ymd_hm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<Self, ChartError> {
        let datetime = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .ok_or_else(|| {
                ChartError::invalid(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02} is not a valid date/time"
                ))
            })?;
        Self::new(datetime)
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Shift by whole days; `None` when the result leaves the supported range.
    pub fn plus_days(&self, days: i64) -> Option<Self> {
        self.0
            .checked_add_signed(Duration::days(days))
            .and_then(|dt| Self::new(dt).ok())
    }

    /// Julian Day on the UT scale.
    pub fn julian_day_ut(&self) -> f64 {
        julian_day(self.0)
    }

    /// Julian Day on the TT scale (UT + ΔT).
    pub fn julian_day_tt(&self) -> f64 {
        self.julian_day_ut() + delta_t_seconds(self.decimal_year()) / 86_400.0
    }

    /// Year with the month folded in, as the ΔT fits expect.
    pub fn decimal_year(&self) -> f64 {
        f64::from(self.0.year()) + (f64::from(self.0.month()) - 0.5) / 12.0
    }
}

/// `HH:MM` or `HH:MM:SS`; a missing or blank time means noon.
pub fn parse_clock(time: Option<&str>) -> Result<NaiveTime, ChartError> {
    let time_str = match time.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_TIME,
    };
    NaiveTime::parse_from_str(time_str, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time_str, "%H:%M:%S"))
        .map_err(|e| ChartError::invalid(format!("birth time '{time_str}': {e}")))
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M"))
    }
}

/// Julian Day of a naive date-time read as UT.
pub fn julian_day(datetime: NaiveDateTime) -> f64 {
    let millis = datetime.and_utc().timestamp_millis() as f64;
    millis / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// Julian centuries elapsed since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / 36_525.0
}

/// ΔT = TT − UT in seconds (Espenak & Meeus polynomial fit).
pub fn delta_t_seconds(year: f64) -> f64 {
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };

    if year < 1800.0 {
        long_term(year)
    } else if year < 1860.0 {
        let t = year - 1800.0;
        13.72 - 0.332447 * t + 0.0068612 * t.powi(2) + 0.0041116 * t.powi(3)
            - 0.00037436 * t.powi(4)
            + 0.0000121272 * t.powi(5)
            - 0.0000001699 * t.powi(6)
            + 0.000000000875 * t.powi(7)
    } else if year < 1900.0 {
        let t = year - 1860.0;
        7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
            - 0.0004473624 * t.powi(4)
            + t.powi(5) / 233_174.0
    } else if year < 1920.0 {
        let t = year - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3) - 0.000197 * t.powi(4)
    } else if year < 1941.0 {
        let t = year - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
    } else if year < 1961.0 {
        let t = year - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else if year < 1986.0 {
        let t = year - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if year < 2005.0 {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if year < 2050.0 {
        let t = year - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t.powi(2)
    } else if year < 2150.0 {
        long_term(year) - 0.5628 * (2150.0 - year)
    } else {
        long_term(year)
    }
}
