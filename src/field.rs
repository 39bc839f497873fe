// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Potential and gradient components of a [`SphericalHarmonicModel`].
//!
//! With `R` the reference radius, `r` the radial distance and `g`, `h`
//! extrapolated to the timestamp's decimal year:
//!
//! ```text
//! V  = R Σ_l (R/r)^{l+1} Σ_m (g cos mθ + h sin mθ) P̄_l^m(sin φ)
//! X' = −  Σ_l (R/r)^{l+2} Σ_m (g cos mθ + h sin mθ) dP̄_l^m(sin φ)/dφ
//! Y' = 1/cos φ · Σ_l (R/r)^{l+2} Σ_m m (g sin mθ − h cos mθ) P̄_l^m(sin φ)
//! Z' = −  Σ_l (l + 1) (R/r)^{l+2} Σ_m (g cos mθ + h sin mθ) P̄_l^m(sin φ)
//! ```
//!
//! All four sums share one pass over the coefficient table. `Y'` divides by
//! `cos φ` and is infinite or NaN at the poles.

use crate::error::GeomagResult;
use crate::instant::Timestamp;
use crate::legendre::{semi_normalized_legendre, semi_normalized_legendre_sin_deriv};
use crate::model::SphericalHarmonicModel;
use tracing::{trace, trace_span};

/// Evaluation point in spherical coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SphericalPoint {
    /// Longitude-like angle in radians.
    pub theta: f64,
    /// Latitude in radians.
    pub phi: f64,
    /// Radial distance, in the unit of the reference radius.
    pub radius: f64,
}

impl SphericalPoint {
    #[inline]
    pub const fn new(theta: f64, phi: f64, radius: f64) -> Self {
        Self { theta, phi, radius }
    }
}

/// The four outputs of one evaluation.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct FieldComponents {
    pub potential: f64,
    /// Northward component.
    pub x_prime: f64,
    /// Eastward component.
    pub y_prime: f64,
    /// Vertical (downward) component.
    pub z_prime: f64,
}

impl FieldComponents {
    /// `sqrt(X'² + Y'²)`.
    #[inline]
    pub fn horizontal_intensity(&self) -> f64 {
        self.x_prime.hypot(self.y_prime)
    }

    /// `sqrt(X'² + Y'² + Z'²)`.
    #[inline]
    pub fn total_intensity(&self) -> f64 {
        self.horizontal_intensity().hypot(self.z_prime)
    }

    /// Angle of the horizontal component east of north, radians.
    #[inline]
    pub fn declination(&self) -> f64 {
        self.y_prime.atan2(self.x_prime)
    }

    /// Angle of the vector below the horizontal, radians.
    #[inline]
    pub fn inclination(&self) -> f64 {
        self.z_prime.atan2(self.horizontal_intensity())
    }
}

impl SphericalHarmonicModel {
    /// Scalar potential `V`.
    pub fn potential(
        &self,
        point: &SphericalPoint,
        timestamp: &Timestamp,
        order: usize,
    ) -> GeomagResult<f64> {
        Ok(self.field(point, timestamp, order)?.potential)
    }

    /// Northward component `X'`.
    pub fn x_prime(
        &self,
        point: &SphericalPoint,
        timestamp: &Timestamp,
        order: usize,
    ) -> GeomagResult<f64> {
        Ok(self.field(point, timestamp, order)?.x_prime)
    }

    /// Eastward component `Y'`.
    pub fn y_prime(
        &self,
        point: &SphericalPoint,
        timestamp: &Timestamp,
        order: usize,
    ) -> GeomagResult<f64> {
        Ok(self.field(point, timestamp, order)?.y_prime)
    }

    /// Vertical component `Z'`.
    pub fn z_prime(
        &self,
        point: &SphericalPoint,
        timestamp: &Timestamp,
        order: usize,
    ) -> GeomagResult<f64> {
        Ok(self.field(point, timestamp, order)?.z_prime)
    }

    /// All four components, with coefficients extrapolated to the
    /// timestamp's decimal year (built-in year table).
    pub fn field(
        &self,
        point: &SphericalPoint,
        timestamp: &Timestamp,
        order: usize,
    ) -> GeomagResult<FieldComponents> {
        self.check_order(order)?;
        let decimal_year = timestamp.to_decimal_year()?;
        Ok(self.evaluate(point, decimal_year, order))
    }

    /// All four components at an explicit decimal year.
    pub fn field_at_year(
        &self,
        point: &SphericalPoint,
        decimal_year: f64,
        order: usize,
    ) -> GeomagResult<FieldComponents> {
        self.check_order(order)?;
        Ok(self.evaluate(point, decimal_year, order))
    }

    /// Single pass over degrees `1..=order`; `order` is already checked.
    fn evaluate(
        &self,
        point: &SphericalPoint,
        decimal_year: f64,
        order: usize,
    ) -> FieldComponents {
        let _span = trace_span!("field", order, decimal_year).entered();

        let epoch = self.epoch();
        let reference = self.reference_radius();
        let ratio = reference / point.radius;
        let sin_phi = point.phi.sin();

        let mut out = FieldComponents::default();
        for l in 1..=order {
            let Some(row) = self.coefficients().row(l) else {
                continue;
            };
            let (mut v, mut x, mut y) = (0.0, 0.0, 0.0);
            for c in row {
                let m = c.order as f64;
                let g = c.g_at(decimal_year, epoch);
                let h = c.h_at(decimal_year, epoch);
                let (sin_m, cos_m) = (m * point.theta).sin_cos();
                let p = semi_normalized_legendre(l, c.order, sin_phi);
                let dp = semi_normalized_legendre_sin_deriv(l, c.order, point.phi);

                let harmonic = g * cos_m + h * sin_m;
                v += harmonic * p;
                x += harmonic * dp;
                y += m * (g * sin_m - h * cos_m) * p;
            }

            let radial = ratio.powi(l as i32 + 1);
            let outer = radial * ratio;
            out.potential += radial * v;
            out.x_prime -= outer * x;
            out.y_prime += outer * y;
            out.z_prime -= (l + 1) as f64 * outer * v;
        }
        out.potential *= reference;
        out.y_prime /= point.phi.cos();

        trace!(
            potential = out.potential,
            x_prime = out.x_prime,
            y_prime = out.y_prime,
            z_prime = out.z_prime,
            "field evaluated"
        );
        out
    }
}
