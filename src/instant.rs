// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Point-in-time representation.
//!
//! [`Timestamp`] stores an instant as whole POSIX seconds plus a
//! nanosecond remainder. Every other representation (TAI, GPS, Julian
//! Date, decimal year) is derived on demand:
//!
//! ```text
//! Timestamp ──► POSIX seconds ──► S::from_posix ──► seconds on scale S
//! ```
//!
//! Scale-specific conversions are generic over the [`TimeScale`] markers;
//! the `to_utc_seconds` / `to_tai_seconds` / `to_gps_seconds` helpers are
//! thin wrappers using the built-in [`LeapSecondTable`].

use super::decimal_year::YearTable;
use super::error::GeomagResult;
use super::leap_seconds::LeapSecondTable;
use super::scales::{TimeScale, GPS, TAI, UTC};
use chrono::{DateTime, SecondsFormat, Utc};
use qtty::Seconds;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// An instant: POSIX seconds plus a nanosecond remainder in `[0, 1e9)`.
///
/// Seconds may be negative (before 1970); the remainder never is, so
/// `-0.25 s` is stored as `(-1, 750_000_000)`. Ordering is chronological.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    seconds: i64,
    nanoseconds: u32,
}

impl Timestamp {
    // ── constructors ──────────────────────────────────────────────────

    /// The current instant from the system clock.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Exact construction; any nanosecond excess or deficit is carried into
    /// the seconds field.
    pub const fn from_posix_seconds(seconds: i64, nanoseconds: i64) -> Self {
        Self {
            seconds: seconds + nanoseconds.div_euclid(NANOS_PER_SECOND),
            nanoseconds: nanoseconds.rem_euclid(NANOS_PER_SECOND) as u32,
        }
    }

    /// Split a floating POSIX timestamp into seconds and nanoseconds.
    ///
    /// `value` must be finite.
    pub fn from_posix_timestamp(value: f64) -> Self {
        let seconds = value.floor();
        let nanoseconds = (1e9 * (value - seconds)).min(999_999_999.0);
        Self::from_posix_seconds(seconds as i64, nanoseconds as i64)
    }

    /// Build from seconds on scale `S`, using the built-in leap-second table.
    #[inline]
    pub fn from_seconds<S: TimeScale>(value: Seconds) -> Self {
        Self::from_seconds_with::<S>(value, LeapSecondTable::builtin())
    }

    /// Build from seconds on scale `S` with an explicit leap-second table.
    #[inline]
    pub fn from_seconds_with<S: TimeScale>(value: Seconds, leaps: &LeapSecondTable) -> Self {
        Self::from_posix_timestamp(S::to_posix(value, leaps).value())
    }

    /// Build from a decimal year using the built-in `[1970, 2030)` table.
    #[inline]
    pub fn from_decimal_year(decimal_year: f64) -> GeomagResult<Self> {
        Self::from_decimal_year_with(decimal_year, YearTable::builtin())
    }

    /// Build from a decimal year using an explicit year table.
    pub fn from_decimal_year_with(decimal_year: f64, years: &YearTable) -> GeomagResult<Self> {
        years
            .posix_from_decimal_year(decimal_year)
            .map(Self::from_posix_timestamp)
    }

    /// Build from a `chrono::DateTime<Utc>`.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self::from_posix_seconds(
            datetime.timestamp(),
            datetime.timestamp_subsec_nanos() as i64,
        )
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Whole POSIX seconds (floor).
    #[inline]
    pub const fn posix_seconds(&self) -> i64 {
        self.seconds
    }

    /// Sub-second remainder in nanoseconds.
    #[inline]
    pub const fn subsec_nanos(&self) -> u32 {
        self.nanoseconds
    }

    // ── scale conversions ─────────────────────────────────────────────

    /// Seconds on scale `S`, using the built-in leap-second table.
    #[inline]
    pub fn to_seconds<S: TimeScale>(&self) -> Seconds {
        self.to_seconds_with::<S>(LeapSecondTable::builtin())
    }

    /// Seconds on scale `S` with an explicit leap-second table.
    #[inline]
    pub fn to_seconds_with<S: TimeScale>(&self, leaps: &LeapSecondTable) -> Seconds {
        S::from_posix(self.posix(), leaps)
    }

    /// POSIX (UTC) seconds including the fractional part.
    #[inline]
    pub fn to_utc_seconds(&self) -> Seconds {
        self.to_seconds::<UTC>()
    }

    /// TAI seconds since the POSIX epoch instant.
    #[inline]
    pub fn to_tai_seconds(&self) -> Seconds {
        self.to_seconds::<TAI>()
    }

    /// GPS seconds since the GPS epoch.
    #[inline]
    pub fn to_gps_seconds(&self) -> Seconds {
        self.to_seconds::<GPS>()
    }

    /// Fractional calendar year using the built-in `[1970, 2030)` table.
    #[inline]
    pub fn to_decimal_year(&self) -> GeomagResult<f64> {
        self.to_decimal_year_with(YearTable::builtin())
    }

    /// Fractional calendar year using an explicit year table.
    #[inline]
    pub fn to_decimal_year_with(&self, years: &YearTable) -> GeomagResult<f64> {
        years.decimal_year_from_posix(self.posix().value())
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    #[inline]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.seconds, self.nanoseconds)
    }

    #[inline]
    fn posix(&self) -> Seconds {
        Seconds::new(self.seconds as f64 + self.nanoseconds as f64 / 1e9)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Generic trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Display ───────────────────────────────────────────────────────────────

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(datetime) => f.write_str(&datetime.to_rfc3339_opts(SecondsFormat::Nanos, true)),
            None => write!(f, "POSIX {} s + {} ns", self.seconds, self.nanoseconds),
        }
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for Timestamp {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Timestamp", 2)?;
        s.serialize_field("seconds", &self.seconds)?;
        s.serialize_field("nanoseconds", &self.nanoseconds)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            seconds: i64,
            #[serde(default)]
            nanoseconds: i64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Self::from_posix_seconds(raw.seconds, raw.nanoseconds))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Seconds> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Seconds) -> Self::Output {
        let whole = rhs.value().floor();
        let nanos = ((rhs.value() - whole) * 1e9).round() as i64;
        Self::from_posix_seconds(
            self.seconds + whole as i64,
            self.nanoseconds as i64 + nanos,
        )
    }
}

impl Sub<Seconds> for Timestamp {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Seconds) -> Self::Output {
        self + Seconds::new(-rhs.value())
    }
}

impl Sub for Timestamp {
    type Output = Seconds;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        let seconds = (self.seconds - rhs.seconds) as f64;
        let nanos = (self.nanoseconds as i64 - rhs.nanoseconds as i64) as f64;
        Seconds::new(seconds + nanos / 1e9)
    }
}

// ── From/Into chrono ──────────────────────────────────────────────────────

impl From<DateTime<Utc>> for Timestamp {
    #[inline]
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_datetime(datetime)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
