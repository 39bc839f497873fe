// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Spherical-harmonic model: parameters plus an immutable coefficient table.
//!
//! Magnetic and gravitational models differ only in their
//! [`ModelParameters`]; both are a [`SphericalHarmonicModel`].
//!
//! ```rust
//! use geomag::{GaussCoefficient, ModelParameters, SphericalHarmonicModel};
//!
//! let model = SphericalHarmonicModel::new(
//!     ModelParameters::wmm2020(),
//!     vec![GaussCoefficient::new(1, 0, -29404.5, 0.0, 6.7, 0.0)],
//! )
//! .unwrap();
//! assert_eq!(model.time_adjusted_g(1, 0, 2021.0).unwrap(), -29404.5 + 6.7);
//! ```

use crate::coefficients::{CoefficientSource, CoefficientTable, GaussCoefficient};
use crate::error::{GeomagError, GeomagResult};
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Constants that define a model variant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModelParameters {
    pub name: String,
    /// Decimal year the base coefficients are pinned to.
    pub epoch: f64,
    /// Highest degree the model supports.
    pub max_degree: usize,
    /// Reference radius `R` in metres.
    pub reference_radius: f64,
}

impl ModelParameters {
    pub fn new(
        name: impl Into<String>,
        epoch: f64,
        max_degree: usize,
        reference_radius: f64,
    ) -> Self {
        Self {
            name: name.into(),
            epoch,
            max_degree,
            reference_radius,
        }
    }

    /// World Magnetic Model 2020: epoch 2020.0, degree 12, `R` = 6 371 200 m.
    pub fn wmm2020() -> Self {
        Self::new("WMM-2020", 2020.0, 12, 6_371_200.0)
    }

    /// EGM2008 gravity model shape: epoch 2008.0, degree 2190,
    /// `R` = 6 378 136.3 m.
    pub fn egm2008() -> Self {
        Self::new("EGM2008", 2008.0, 2190, 6_378_136.3)
    }

    fn validate(&self) -> GeomagResult<()> {
        if !self.epoch.is_finite() {
            return Err(GeomagError::InvalidParameters(format!(
                "epoch must be finite, got {}",
                self.epoch
            )));
        }
        if self.max_degree == 0 {
            return Err(GeomagError::InvalidParameters(
                "max degree must be at least 1".into(),
            ));
        }
        if !(self.reference_radius.is_finite() && self.reference_radius > 0.0) {
            return Err(GeomagError::InvalidParameters(format!(
                "reference radius must be positive, got {}",
                self.reference_radius
            )));
        }
        Ok(())
    }
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self::wmm2020()
    }
}

/// A truncated spherical-harmonic series with secular variation.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalHarmonicModel {
    params: ModelParameters,
    coefficients: CoefficientTable,
}

impl SphericalHarmonicModel {
    /// Load the coefficients from `source` and build the model.
    pub fn new(params: ModelParameters, source: impl CoefficientSource) -> GeomagResult<Self> {
        params.validate()?;
        let set = source.load()?;
        if let Some(header) = &set.header {
            if header.epoch != params.epoch {
                warn!(
                    header_epoch = header.epoch,
                    model_epoch = params.epoch,
                    header_name = %header.name,
                    "coefficient header epoch differs from model epoch"
                );
            }
        }
        let coefficients = CoefficientTable::new(set.coefficients, params.max_degree)?;
        debug!(
            model = %params.name,
            epoch = params.epoch,
            degree = coefficients.degree(),
            terms = coefficients.len(),
            "built spherical-harmonic model"
        );
        Ok(Self {
            params,
            coefficients,
        })
    }

    /// WMM2020 parameters with coefficients from `source`.
    pub fn world_magnetic_model(source: impl CoefficientSource) -> GeomagResult<Self> {
        Self::new(ModelParameters::wmm2020(), source)
    }

    #[inline]
    pub fn parameters(&self) -> &ModelParameters {
        &self.params
    }

    #[inline]
    pub fn coefficients(&self) -> &CoefficientTable {
        &self.coefficients
    }

    #[inline]
    pub fn epoch(&self) -> f64 {
        self.params.epoch
    }

    #[inline]
    pub fn max_degree(&self) -> usize {
        self.params.max_degree
    }

    #[inline]
    pub fn reference_radius(&self) -> f64 {
        self.params.reference_radius
    }

    /// Highest order accepted by the evaluator: the smaller of the model's
    /// max degree and the loaded degree.
    #[inline]
    pub fn max_order(&self) -> usize {
        self.params.max_degree.min(self.coefficients.degree())
    }

    /// `g_l^m` extrapolated to `decimal_year`.
    pub fn time_adjusted_g(
        &self,
        degree: usize,
        order: usize,
        decimal_year: f64,
    ) -> GeomagResult<f64> {
        Ok(self.coefficient(degree, order)?.g_at(decimal_year, self.params.epoch))
    }

    /// `h_l^m` extrapolated to `decimal_year`.
    pub fn time_adjusted_h(
        &self,
        degree: usize,
        order: usize,
        decimal_year: f64,
    ) -> GeomagResult<f64> {
        Ok(self.coefficient(degree, order)?.h_at(decimal_year, self.params.epoch))
    }

    fn coefficient(&self, degree: usize, order: usize) -> GeomagResult<&GaussCoefficient> {
        self.coefficients
            .get(degree, order)
            .filter(|_| degree > 0)
            .ok_or(GeomagError::CoefficientOutOfRange { degree, order })
    }

    /// Truncation order must lie in `1..=max_order()`.
    pub(crate) fn check_order(&self, order: usize) -> GeomagResult<()> {
        let max_degree = self.max_order();
        if order == 0 || order > max_degree {
            return Err(GeomagError::InvalidOrder { order, max_degree });
        }
        Ok(())
    }
}
