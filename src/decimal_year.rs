// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Decimal-year ↔ POSIX mapping.
//!
//! A decimal year is the calendar year plus the elapsed fraction of that
//! year, `year + (t − start) / (end − start)`, where `start` and `end` are
//! the POSIX seconds of 1 January 00:00 UTC of `year` and `year + 1`.
//! Leap years are therefore longer, and leap seconds are ignored (POSIX).
//!
//! [`YearTable`] holds the `(year, start, end)` boundaries for a closed,
//! contiguous span of years. The built-in table spans `[1970, 2030)`;
//! other spans are generated from the calendar with
//! [`YearTable::spanning`].

use crate::error::{GeomagError, GeomagResult};
use chrono::NaiveDate;
use std::sync::OnceLock;

/// First year of the built-in table.
pub const BUILTIN_FIRST_YEAR: i32 = 1970;
/// Exclusive upper bound of the built-in table.
pub const BUILTIN_END_YEAR: i32 = 2030;

/// POSIX seconds of the first instant of `year` and of `year + 1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct YearBoundary {
    pub year: i32,
    pub start: i64,
    pub end: i64,
}

impl YearBoundary {
    /// Boundary of a proleptic Gregorian year, from the calendar.
    pub fn of_year(year: i32) -> GeomagResult<Self> {
        Ok(Self {
            year,
            start: new_year_posix(year)?,
            end: new_year_posix(year + 1)?,
        })
    }

    #[inline]
    fn length(&self) -> f64 {
        (self.end - self.start) as f64
    }

    #[inline]
    fn contains(&self, posix_seconds: f64) -> bool {
        self.start as f64 <= posix_seconds && posix_seconds < self.end as f64
    }
}

fn new_year_posix(year: i32) -> GeomagResult<i64> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc().timestamp())
        .ok_or_else(|| GeomagError::InvalidTable(format!("year {year} is not representable")))
}

/// Contiguous ascending sequence of [`YearBoundary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearTable {
    boundaries: Vec<YearBoundary>,
}

impl YearTable {
    /// Build a table from explicit boundaries.
    ///
    /// The boundaries must be non-empty, consecutive in `year`, and each
    /// must start where the previous one ended.
    pub fn new(boundaries: Vec<YearBoundary>) -> GeomagResult<Self> {
        if boundaries.is_empty() {
            return Err(GeomagError::InvalidTable(
                "year table must contain at least one year".into(),
            ));
        }
        if let Some(bad) = boundaries.iter().find(|b| b.end <= b.start) {
            return Err(GeomagError::InvalidTable(format!(
                "year {} ends before it starts",
                bad.year
            )));
        }
        if let Some(pair) = boundaries
            .windows(2)
            .find(|pair| pair[1].year != pair[0].year + 1 || pair[1].start != pair[0].end)
        {
            return Err(GeomagError::InvalidTable(format!(
                "years {} and {} are not contiguous",
                pair[0].year, pair[1].year
            )));
        }
        Ok(Self { boundaries })
    }

    /// Table covering `[first, end)` computed from the calendar.
    pub fn spanning(first: i32, end: i32) -> GeomagResult<Self> {
        let boundaries = (first..end)
            .map(YearBoundary::of_year)
            .collect::<GeomagResult<Vec<_>>>()?;
        Self::new(boundaries)
    }

    /// The `[1970, 2030)` table shipped with the crate.
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<YearTable> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let boundaries = (BUILTIN_FIRST_YEAR..BUILTIN_END_YEAR)
                .filter_map(|year| YearBoundary::of_year(year).ok())
                .collect();
            Self { boundaries }
        })
    }

    /// Grow the table with calendar years up to (excluding) `end`.
    pub fn extend_to(&mut self, end: i32) -> GeomagResult<()> {
        for year in self.end_year()..end {
            self.boundaries.push(YearBoundary::of_year(year)?);
        }
        Ok(())
    }

    #[inline]
    pub fn boundaries(&self) -> &[YearBoundary] {
        &self.boundaries
    }

    /// First covered year.
    #[inline]
    pub fn first_year(&self) -> i32 {
        self.boundaries[0].year
    }

    /// Exclusive upper bound of the covered years.
    #[inline]
    pub fn end_year(&self) -> i32 {
        self.boundaries[self.boundaries.len() - 1].year + 1
    }

    /// Boundary entry for `year`, if covered.
    pub fn boundary(&self, year: i32) -> Option<&YearBoundary> {
        let index = year.checked_sub(self.first_year())?;
        usize::try_from(index)
            .ok()
            .and_then(|index| self.boundaries.get(index))
    }

    /// POSIX seconds (fractional) of a decimal year.
    pub fn posix_from_decimal_year(&self, decimal_year: f64) -> GeomagResult<f64> {
        let out_of_range = || GeomagError::YearOutOfRange {
            year: decimal_year,
            first: self.first_year(),
            end: self.end_year(),
        };
        if !decimal_year.is_finite() {
            return Err(out_of_range());
        }
        let whole = decimal_year.floor();
        if whole < self.first_year() as f64 || whole >= self.end_year() as f64 {
            return Err(out_of_range());
        }
        let boundary = self.boundary(whole as i32).ok_or_else(out_of_range)?;
        Ok(boundary.start as f64 + boundary.length() * (decimal_year - whole))
    }

    /// Decimal year of a POSIX instant given in (fractional) seconds.
    pub fn decimal_year_from_posix(&self, posix_seconds: f64) -> GeomagResult<f64> {
        self.boundaries
            .iter()
            .find(|boundary| boundary.contains(posix_seconds))
            .map(|boundary| {
                boundary.year as f64 + (posix_seconds - boundary.start as f64) / boundary.length()
            })
            .ok_or_else(|| GeomagError::TimestampOutOfRange {
                seconds: posix_seconds,
                first: self.first_year(),
                end: self.end_year(),
            })
    }
}

impl Default for YearTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
