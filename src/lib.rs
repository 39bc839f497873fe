// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Geomagnetic field evaluation from spherical-harmonic models.
//!
//! The crate pairs a truncated spherical-harmonic evaluator (World Magnetic
//! Model style) with the time handling needed to extrapolate its
//! coefficients: POSIX, TAI and GPS seconds, Julian dates and decimal years.
//!
//! # Core types
//!
//! - [`Timestamp`] — POSIX seconds plus nanoseconds.
//! - [`TimeScale`] — marker trait relating a scale's seconds to POSIX seconds.
//! - [`LeapSecondTable`] / [`YearTable`] — lookup tables, built in or user supplied.
//! - [`SphericalHarmonicModel`] — parameters plus an immutable [`CoefficientTable`].
//! - [`CoefficientSource`] — where coefficients come from ([`CofFile`], [`CofReader`], vectors).
//! - [`FieldComponents`] — potential and gradient components at a [`SphericalPoint`].
//!
//! # Time scales
//!
//! | Marker | Scale |
//! |--------|-------|
//! | [`UTC`] | POSIX / UTC seconds |
//! | [`TAI`] | International Atomic Time |
//! | [`GPS`] | GPS Time |
//!
//! # Example
//!
//! ```rust
//! use geomag::{CofReader, SphericalHarmonicModel, SphericalPoint, Timestamp};
//!
//! let cof = "    2020.0            WMM-2020        12/10/2019
//!   1  0  -29404.5       0.0        6.7        0.0
//!   1  1   -1450.7    4652.9        7.7      -25.1
//! 999999999999999999999999999999999999999999999999
//! ";
//! let model = SphericalHarmonicModel::world_magnetic_model(CofReader::new(cof.as_bytes()))?;
//! let when = Timestamp::from_decimal_year(2022.5)?;
//! let point = SphericalPoint::new(0.5, 0.3, 6_400_000.0);
//! let field = model.field(&point, &when, 1)?;
//! assert!(field.total_intensity() > 0.0);
//! # Ok::<(), geomag::GeomagError>(())
//! ```
//!
//! The library emits `tracing` events and spans but installs no subscriber.

mod coefficients;
mod decimal_year;
pub mod error;
mod field;
mod geodetic;
pub(crate) mod instant;
mod julian_date;
mod leap_seconds;
pub mod legendre;
mod model;
pub(crate) mod scales;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use coefficients::{
    CoefficientSet, CoefficientSource, CoefficientTable, CofFile, CofHeader, CofReader,
    GaussCoefficient,
};
pub use decimal_year::{YearBoundary, YearTable};
pub use error::{GeomagError, GeomagResult};
pub use field::{FieldComponents, SphericalPoint};
pub use geodetic::{GeodeticPosition, Wgs84};
pub use instant::Timestamp;
pub use leap_seconds::{LeapSecondEntry, LeapSecondTable};
pub use model::{ModelParameters, SphericalHarmonicModel};
pub use scales::{TimeScale, GPS, GPS_EPOCH_POSIX, TAI, TAI_MINUS_GPS, UTC};
