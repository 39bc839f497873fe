// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! Each zero-sized type identifies a time scale and encodes how a count of
//! seconds on that scale relates to the canonical **POSIX (UTC) seconds**
//! stored by [`Timestamp`](super::Timestamp).
//!
//! | Marker | Description | Relation to POSIX |
//! |--------|-------------|-------------------|
//! | [`UTC`] | POSIX / UTC seconds | identity |
//! | [`TAI`] | International Atomic Time | `TAI = UTC + leap(UTC)` |
//! | [`GPS`] | GPS Time, epoch 1980-01-06 | `GPS = TAI − 315 964 800 s − 19 s` |
//!
//! UTC and TAI count seconds from the POSIX epoch instant
//! 1970-01-01T00:00:00; GPS counts from its own epoch. Julian dates on
//! every scale apply the same day offset to these counts (see
//! [`Timestamp::julian_date`](super::Timestamp::julian_date)).

use super::leap_seconds::LeapSecondTable;
use qtty::Seconds;

/// Marker trait for time scales on the POSIX-seconds axis.
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + 'static {
    /// Display label.
    const LABEL: &'static str;

    /// Convert POSIX (UTC) seconds to this scale.
    fn from_posix(posix: Seconds, leaps: &LeapSecondTable) -> Seconds;

    /// Convert seconds on this scale back to POSIX (UTC) seconds.
    fn to_posix(value: Seconds, leaps: &LeapSecondTable) -> Seconds;
}

/// Whole second used as the leap-second lookup key.
#[inline]
fn lookup_key(value: Seconds) -> i64 {
    value.value().floor() as i64
}

// ---------------------------------------------------------------------------
// Civil time
// ---------------------------------------------------------------------------

/// Coordinated Universal Time counted as POSIX seconds (no leap seconds).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UTC;

impl TimeScale for UTC {
    const LABEL: &'static str = "UTC";

    #[inline(always)]
    fn from_posix(posix: Seconds, _leaps: &LeapSecondTable) -> Seconds {
        posix
    }

    #[inline(always)]
    fn to_posix(value: Seconds, _leaps: &LeapSecondTable) -> Seconds {
        value
    }
}

// ---------------------------------------------------------------------------
// Atomic time
// ---------------------------------------------------------------------------

/// International Atomic Time.
///
/// `TAI = UTC + leap`, where `leap` is looked up at the whole UTC second.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct TAI;

impl TimeScale for TAI {
    const LABEL: &'static str = "TAI";

    #[inline]
    fn from_posix(posix: Seconds, leaps: &LeapSecondTable) -> Seconds {
        posix + leaps.offset_at(lookup_key(posix))
    }

    /// The leap offset is looked up at the TAI value itself, which is off by
    /// one second only inside the second surrounding a leap-second insertion.
    #[inline]
    fn to_posix(value: Seconds, leaps: &LeapSecondTable) -> Seconds {
        value - leaps.offset_at(lookup_key(value))
    }
}

// ---------------------------------------------------------------------------
// Navigation counters
// ---------------------------------------------------------------------------

/// GPS Time — continuous seconds since 1980-01-06T00:00:00 UTC.
///
/// GPS has a fixed offset from TAI: `GPS = TAI − 19 s`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct GPS;

/// POSIX seconds of the GPS epoch (1980-01-06T00:00:00 UTC).
pub const GPS_EPOCH_POSIX: Seconds = Seconds::new(315_964_800.0);

/// `TAI − GPS`.
pub const TAI_MINUS_GPS: Seconds = Seconds::new(19.0);

impl TimeScale for GPS {
    const LABEL: &'static str = "GPS";

    #[inline]
    fn from_posix(posix: Seconds, leaps: &LeapSecondTable) -> Seconds {
        TAI::from_posix(posix, leaps) - GPS_EPOCH_POSIX - TAI_MINUS_GPS
    }

    #[inline]
    fn to_posix(value: Seconds, leaps: &LeapSecondTable) -> Seconds {
        TAI::to_posix(value + GPS_EPOCH_POSIX + TAI_MINUS_GPS, leaps)
    }
}
