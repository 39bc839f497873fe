// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Date views of a [`Timestamp`].
//!
//! A Julian date on scale `S` is the scale's second count expressed in days
//! and shifted by the JD of the POSIX epoch:
//!
//! ```text
//! JD_S = seconds_S / 86 400 + 2 440 587.5
//! ```
//!
//! For GPS the second count starts at the GPS epoch, so the GPS Julian date
//! is a day counter on the GPS axis rather than an astronomical JD.

use qtty::*;

use super::instant::Timestamp;
use super::leap_seconds::LeapSecondTable;
use super::scales::{TimeScale, GPS, TAI, UTC};

impl Timestamp {
    /// JD of the POSIX epoch (1970-01-01T00:00:00Z).
    pub const UNIX_EPOCH_JD: Days = Days::new(2_440_587.5);

    /// Julian date on scale `S` with the built-in leap-second table.
    #[inline]
    pub fn julian_date<S: TimeScale>(&self) -> Days {
        self.julian_date_with::<S>(LeapSecondTable::builtin())
    }

    /// Julian date on scale `S` with an explicit leap-second table.
    #[inline]
    pub fn julian_date_with<S: TimeScale>(&self, leaps: &LeapSecondTable) -> Days {
        self.to_seconds_with::<S>(leaps).to::<Day>() + Self::UNIX_EPOCH_JD
    }

    /// Build from a Julian date on scale `S` with the built-in leap-second table.
    #[inline]
    pub fn from_julian_date<S: TimeScale>(jd: Days) -> Self {
        Self::from_julian_date_with::<S>(jd, LeapSecondTable::builtin())
    }

    /// Build from a Julian date on scale `S` with an explicit leap-second table.
    ///
    /// For [`GPS`] the leap offset is chosen from the resulting TAI value,
    /// which is one second off only inside the second surrounding a
    /// leap-second insertion.
    #[inline]
    pub fn from_julian_date_with<S: TimeScale>(jd: Days, leaps: &LeapSecondTable) -> Self {
        let seconds: Seconds = (jd - Self::UNIX_EPOCH_JD).to::<Second>();
        Self::from_seconds_with::<S>(seconds, leaps)
    }

    /// `posix = (jd − 2 440 587.5) · 86 400`.
    #[inline]
    pub fn from_julian_date_utc(jd: f64) -> Self {
        Self::from_julian_date::<UTC>(Days::new(jd))
    }

    /// GPS Julian date → POSIX through TAI and the leap-second table.
    #[inline]
    pub fn from_julian_date_gps(jd: f64) -> Self {
        Self::from_julian_date::<GPS>(Days::new(jd))
    }

    #[inline]
    pub fn to_julian_date_utc(&self) -> Days {
        self.julian_date::<UTC>()
    }

    #[inline]
    pub fn to_julian_date_gps(&self) -> Days {
        self.julian_date::<GPS>()
    }

    #[inline]
    pub fn to_julian_date_tai(&self) -> Days {
        self.julian_date::<TAI>()
    }
}
