// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Leap seconds — UTC↔TAI correction layer
//!
//! Cumulative **TAI − UTC** offsets, keyed by the POSIX second from which
//! each offset applies.
//!
//! ## Integration with time scales
//!
//! The [`TAI`](super::TAI) and [`GPS`](super::GPS) markers consult a
//! [`LeapSecondTable`] when converting to or from the POSIX axis. The
//! `Timestamp` convenience methods use [`LeapSecondTable::builtin`]; the
//! `*_with` variants accept any table, so a caller can append entries
//! announced after this crate was released.
//!
//! ## Lookup policy
//! The offset of the **latest** entry whose threshold is ≤ the query time.
//! Queries before the first threshold get the first entry's offset: the
//! built-in table opens with the fractional pre-1972 offset of 4.21317 s
//! rather than a clean zero.
//!
//! ## Scientific References
//! * IERS Bulletin C (leap second announcements).

use crate::error::{GeomagError, GeomagResult};
use qtty::Seconds;
use std::sync::OnceLock;

/// Number of entries in the built-in table.
const TERMS: usize = 29;

/// `(POSIX threshold, cumulative TAI − UTC in seconds)`.
#[rustfmt::skip]
const IERS_LEAP_SECONDS: [(i64, f64); TERMS] = [
    (0, 4.213_17),                                // 1970-01-01
    (63_072_000, 10.0),   (78_796_800, 11.0),     // 1972-01-01, 1972-07-01
    (94_694_400, 12.0),   (126_230_400, 13.0),    // 1973-01-01, 1974-01-01
    (157_766_400, 14.0),  (189_302_400, 15.0),    // 1975-01-01, 1976-01-01
    (220_924_800, 16.0),  (252_460_800, 17.0),    // 1977-01-01, 1978-01-01
    (283_996_800, 18.0),  (315_532_800, 19.0),    // 1979-01-01, 1980-01-01
    (362_793_600, 20.0),  (394_329_600, 21.0),    // 1981-07-01, 1982-07-01
    (425_865_600, 22.0),  (489_024_000, 23.0),    // 1983-07-01, 1985-07-01
    (567_993_600, 24.0),  (631_152_000, 25.0),    // 1988-01-01, 1990-01-01
    (662_688_000, 26.0),  (709_948_800, 27.0),    // 1991-01-01, 1992-07-01
    (741_484_800, 28.0),  (773_020_800, 29.0),    // 1993-07-01, 1994-07-01
    (820_454_400, 30.0),  (867_715_200, 31.0),    // 1996-01-01, 1997-07-01
    (915_148_800, 32.0),  (1_136_073_600, 33.0),  // 1999-01-01, 2006-01-01
    (1_230_768_000, 34.0), (1_341_100_800, 35.0), // 2009-01-01, 2012-07-01
    (1_435_708_800, 36.0), (1_483_228_800, 37.0), // 2015-07-01, 2017-01-01
];

/// A cumulative offset valid from `threshold` (POSIX seconds) onward.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LeapSecondEntry {
    pub threshold: i64,
    pub offset: Seconds,
}

impl LeapSecondEntry {
    #[inline]
    pub const fn new(threshold: i64, offset: f64) -> Self {
        Self {
            threshold,
            offset: Seconds::new(offset),
        }
    }
}

/// Ordered, non-empty sequence of [`LeapSecondEntry`].
#[derive(Debug, Clone, PartialEq)]
pub struct LeapSecondTable {
    entries: Vec<LeapSecondEntry>,
}

impl LeapSecondTable {
    /// Build a table, checking that it is non-empty and strictly ascending.
    pub fn new(entries: Vec<LeapSecondEntry>) -> GeomagResult<Self> {
        if entries.is_empty() {
            return Err(GeomagError::InvalidTable(
                "leap-second table must contain at least one entry".into(),
            ));
        }
        if let Some(pair) = entries
            .windows(2)
            .find(|pair| pair[0].threshold >= pair[1].threshold)
        {
            return Err(GeomagError::InvalidTable(format!(
                "leap-second thresholds must be strictly ascending ({} then {})",
                pair[0].threshold, pair[1].threshold
            )));
        }
        Ok(Self { entries })
    }

    /// The IERS table shipped with the crate (1970 – 2017-01-01).
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<LeapSecondTable> = OnceLock::new();
        BUILTIN.get_or_init(|| Self {
            entries: IERS_LEAP_SECONDS
                .iter()
                .map(|&(threshold, offset)| LeapSecondEntry::new(threshold, offset))
                .collect(),
        })
    }

    /// Append an entry taking effect after every existing threshold.
    pub fn push(&mut self, entry: LeapSecondEntry) -> GeomagResult<()> {
        let last = self.last().threshold;
        if entry.threshold <= last {
            return Err(GeomagError::InvalidTable(format!(
                "new leap-second threshold {} must follow {}",
                entry.threshold, last
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    #[inline]
    pub fn entries(&self) -> &[LeapSecondEntry] {
        &self.entries
    }

    /// The most recent entry.
    #[inline]
    pub fn last(&self) -> &LeapSecondEntry {
        // non-empty by construction
        &self.entries[self.entries.len() - 1]
    }

    /// TAI − UTC in effect at `posix_seconds`.
    pub fn offset_at(&self, posix_seconds: i64) -> Seconds {
        self.entries
            .iter()
            .rev()
            .find(|entry| posix_seconds >= entry.threshold)
            .unwrap_or(&self.entries[0])
            .offset
    }
}

impl Default for LeapSecondTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset(seconds: i64) -> f64 {
        LeapSecondTable::builtin().offset_at(seconds).value()
    }

    #[test]
    fn builtin_table_reference_values() {
        assert_eq!(offset(0), 4.213_17);
        assert_eq!(offset(63_072_000), 10.0);
        assert_eq!(offset(1_483_228_800), 37.0);
        assert_eq!(offset(1_900_000_000), 37.0);
    }

    #[test]
    fn threshold_boundaries() {
        assert_eq!(offset(63_071_999), 4.213_17);
        assert_eq!(offset(1_483_228_799), 36.0);
        assert_eq!(offset(1_435_708_800), 36.0);
    }

    #[test]
    fn before_first_threshold_uses_first_offset() {
        assert_eq!(offset(-1), 4.213_17);
        assert_eq!(offset(i64::MIN), 4.213_17);
    }

    #[test]
    fn lookup_is_monotone() {
        let table = LeapSecondTable::builtin();
        let mut previous = f64::NEG_INFINITY;
        for entry in table.entries() {
            for posix in [entry.threshold - 1, entry.threshold, entry.threshold + 1] {
                let value = table.offset_at(posix).value();
                assert!(value >= previous, "offset decreased at {posix}");
                previous = value;
            }
        }
    }

    #[test]
    fn builtin_has_all_entries() {
        let table = LeapSecondTable::builtin();
        assert_eq!(table.entries().len(), TERMS);
        assert_eq!(table.last().threshold, 1_483_228_800);
        assert_eq!(LeapSecondTable::default(), *table);
    }

    #[test]
    fn push_extends_table() {
        let mut table = LeapSecondTable::default();
        table
            .push(LeapSecondEntry::new(1_900_000_000, 38.0))
            .expect("later threshold");
        assert_eq!(table.offset_at(1_899_999_999).value(), 37.0);
        assert_eq!(table.offset_at(1_900_000_000).value(), 38.0);
    }

    #[test]
    fn push_rejects_earlier_threshold() {
        let mut table = LeapSecondTable::default();
        let err = table.push(LeapSecondEntry::new(0, 1.0)).unwrap_err();
        assert!(matches!(err, GeomagError::InvalidTable(_)));
    }

    #[test]
    fn new_rejects_empty_and_unsorted() {
        assert!(LeapSecondTable::new(Vec::new()).is_err());
        let unsorted = vec![LeapSecondEntry::new(10, 1.0), LeapSecondEntry::new(5, 2.0)];
        assert!(LeapSecondTable::new(unsorted).is_err());
        let sorted = vec![LeapSecondEntry::new(5, 1.0), LeapSecondEntry::new(10, 2.0)];
        let table = LeapSecondTable::new(sorted).expect("sorted table");
        assert_eq!(table.offset_at(7).value(), 1.0);
    }
}
