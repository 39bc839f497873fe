// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Geodetic (WGS84) to geocentric spherical coordinates, and field
//! components expressed in the local geodetic frame.

use crate::error::GeomagResult;
use crate::field::{FieldComponents, SphericalPoint};
use crate::instant::Timestamp;
use crate::model::SphericalHarmonicModel;

/// WGS84 ellipsoid.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Wgs84;

impl Wgs84 {
    /// Semi-major axis in metres.
    pub const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
    pub const INVERSE_FLATTENING: f64 = 298.257_223_563;
    pub const FLATTENING: f64 = 1.0 / Self::INVERSE_FLATTENING;
    /// First eccentricity squared, `f (2 − f)`.
    pub const ECCENTRICITY_SQUARED: f64 = Self::FLATTENING * (2.0 - Self::FLATTENING);

    /// Prime-vertical radius of curvature `N(lat)`.
    #[inline]
    pub fn radius_of_curvature(latitude: f64) -> f64 {
        let sin = latitude.sin();
        Self::SEMI_MAJOR_AXIS / (1.0 - Self::ECCENTRICITY_SQUARED * sin * sin).sqrt()
    }
}

/// Position above the WGS84 ellipsoid (radians, metres).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeodeticPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeodeticPosition {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    pub fn from_degrees(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self::new(latitude.to_radians(), longitude.to_radians(), altitude)
    }

    /// Geocentric latitude and radius; longitude carries over as `theta`.
    pub fn to_spherical(&self) -> SphericalPoint {
        let n = Wgs84::radius_of_curvature(self.latitude);
        let (sin, cos) = self.latitude.sin_cos();
        let p = (n + self.altitude) * cos;
        let z = (n * (1.0 - Wgs84::ECCENTRICITY_SQUARED) + self.altitude) * sin;
        let radius = p.hypot(z);
        SphericalPoint::new(self.longitude, (z / radius).asin(), radius)
    }
}

impl FieldComponents {
    /// Rotate `X'` and `Z'` about the east axis by `ψ = geodetic − geocentric`
    /// latitude. `Y'` and the potential are unchanged.
    pub fn to_geodetic_frame(&self, position: &GeodeticPosition, point: &SphericalPoint) -> Self {
        let (sin, cos) = (position.latitude - point.phi).sin_cos();
        Self {
            potential: self.potential,
            x_prime: self.x_prime * cos + self.z_prime * sin,
            y_prime: self.y_prime,
            z_prime: -self.x_prime * sin + self.z_prime * cos,
        }
    }
}

impl SphericalHarmonicModel {
    /// Field at a WGS84 position, with `X'`/`Z'` along the local geodetic
    /// north and down directions.
    pub fn geodetic_field(
        &self,
        position: &GeodeticPosition,
        timestamp: &Timestamp,
        order: usize,
    ) -> GeomagResult<FieldComponents> {
        let point = position.to_spherical();
        Ok(self
            .field(&point, timestamp, order)?
            .to_geodetic_frame(position, &point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn equator_is_at_semi_major_axis() {
        let point = GeodeticPosition::from_degrees(0.0, 45.0, 0.0).to_spherical();
        assert_relative_eq!(point.radius, Wgs84::SEMI_MAJOR_AXIS, max_relative = 1e-15);
        assert_eq!(point.phi, 0.0);
        assert_relative_eq!(point.theta, 45.0_f64.to_radians());
    }

    #[test]
    fn pole_is_at_semi_minor_axis() {
        let point = GeodeticPosition::from_degrees(90.0, 0.0, 0.0).to_spherical();
        let b = Wgs84::SEMI_MAJOR_AXIS * (1.0 - Wgs84::FLATTENING);
        assert_relative_eq!(point.radius, b, max_relative = 1e-12);
        assert_relative_eq!(point.phi, std::f64::consts::FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn surface_geocentric_latitude() {
        let factor = (1.0 - Wgs84::FLATTENING).powi(2);
        for degrees in [5.0, 15.0, 30.0, 45.0, 60.0, 75.0] {
            let latitude: f64 = f64::to_radians(degrees);
            let point = GeodeticPosition::new(latitude, 0.0, 0.0).to_spherical();
            assert_relative_eq!(point.phi, (factor * latitude.tan()).atan(), epsilon = 1e-12);
            assert!(point.phi < latitude);
        }
    }

    #[test]
    fn geodetic_frame_rotation_preserves_intensity() {
        let position = GeodeticPosition::from_degrees(45.0, 10.0, 0.0);
        let point = position.to_spherical();
        let field = FieldComponents {
            potential: 1.0,
            x_prime: 20_000.0,
            y_prime: 1_000.0,
            z_prime: 40_000.0,
        };
        let rotated = field.to_geodetic_frame(&position, &point);
        assert_relative_eq!(
            rotated.total_intensity(),
            field.total_intensity(),
            max_relative = 1e-12
        );
        assert_eq!(rotated.y_prime, field.y_prime);
        assert_eq!(rotated.potential, field.potential);
        // ψ > 0 in the northern hemisphere
        assert!(rotated.x_prime > field.x_prime);
    }

    #[test]
    fn equator_needs_no_rotation() {
        let position = GeodeticPosition::from_degrees(0.0, 120.0, 0.0);
        let point = position.to_spherical();
        let field = FieldComponents {
            potential: 0.0,
            x_prime: 1.0,
            y_prime: 2.0,
            z_prime: 3.0,
        };
        assert_eq!(field.to_geodetic_frame(&position, &point), field);
    }

    #[test]
    fn altitude_raises_radius() {
        let ground = GeodeticPosition::from_degrees(-80.0, 240.0, 0.0).to_spherical();
        let high = GeodeticPosition::from_degrees(-80.0, 240.0, 100_000.0).to_spherical();
        assert!(high.radius > ground.radius + 99_000.0);
    }
}
