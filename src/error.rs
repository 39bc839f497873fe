// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for time conversion, coefficient loading and field evaluation.
//!
//! | Variant | Kind | Raised by |
//! |---------|------|-----------|
//! | [`YearOutOfRange`](GeomagError::YearOutOfRange) | range | decimal year → timestamp |
//! | [`TimestampOutOfRange`](GeomagError::TimestampOutOfRange) | range | timestamp → decimal year |
//! | [`CoefficientFile`](GeomagError::CoefficientFile) | initialisation | opening a coefficient file |
//! | [`Io`](GeomagError::Io) | initialisation | reading a coefficient stream |
//! | [`EmptyCoefficientSource`](GeomagError::EmptyCoefficientSource) | initialisation | model construction |
//! | [`InvalidCoefficient`](GeomagError::InvalidCoefficient) | initialisation | model construction |
//! | [`InvalidParameters`](GeomagError::InvalidParameters) | initialisation | model construction |
//! | [`InvalidOrder`](GeomagError::InvalidOrder) | precondition | field evaluation |
//! | [`CoefficientOutOfRange`](GeomagError::CoefficientOutOfRange) | precondition | coefficient lookup |
//! | [`InvalidTable`](GeomagError::InvalidTable) | configuration | leap-second / year tables |
//!
//! Evaluating the eastward component at a pole is not an error: the
//! division by `cos(phi)` propagates IEEE infinities or NaN to the caller.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeomagError {
    #[error("decimal year {year} is out of range [{first}, {end})")]
    YearOutOfRange { year: f64, first: i32, end: i32 },

    #[error("timestamp {seconds} s is out of range [{first}, {end})")]
    TimestampOutOfRange { seconds: f64, first: i32, end: i32 },

    #[error("could not open coefficients file at '{}': {source}", path.display())]
    CoefficientFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to read coefficients: {0}")]
    Io(#[from] std::io::Error),

    #[error("coefficient source produced no coefficients")]
    EmptyCoefficientSource,

    #[error("invalid coefficient (l = {degree}, m = {order}) for a model of max degree {max_degree}")]
    InvalidCoefficient {
        degree: usize,
        order: usize,
        max_degree: usize,
    },

    #[error("invalid model parameters: {0}")]
    InvalidParameters(String),

    #[error("truncation order {order} must be within [1, {max_degree}]")]
    InvalidOrder { order: usize, max_degree: usize },

    #[error("no coefficient loaded for (l = {degree}, m = {order})")]
    CoefficientOutOfRange { degree: usize, order: usize },

    #[error("invalid lookup table: {0}")]
    InvalidTable(String),
}

/// Result alias used throughout the crate.
pub type GeomagResult<T> = Result<T, GeomagError>;
