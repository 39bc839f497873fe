// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Gauss coefficient store and coefficient sources.
//!
//! A model's coefficients come from any [`CoefficientSource`]:
//!
//! | Source | Input |
//! |--------|-------|
//! | [`CofFile`] | path to a WMM-style `.COF` file |
//! | [`CofReader`] | any `BufRead` yielding the same text format |
//! | `Vec<GaussCoefficient>` / [`CoefficientSet`] | a pre-parsed table |
//!
//! # COF text format
//!
//! ```text
//!     2020.0            WMM-2020        12/10/2019      <- optional header
//!   1  0  -29404.5       0.0        6.7        0.0      <- l m g h g_dot h_dot
//!   1  1   -1450.7    4652.9        7.7      -25.1
//! 999999999999999999999999999999999999999999999999      <- optional terminator
//! ```
//!
//! Reading stops at end of input, at a line starting with `9999`, or at the
//! first line that does not hold six numeric fields.

use crate::error::{GeomagError, GeomagResult};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One `(l, m)` term: base values and secular rates per year.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaussCoefficient {
    pub degree: usize,
    pub order: usize,
    pub g: f64,
    pub h: f64,
    pub g_dot: f64,
    pub h_dot: f64,
}

impl GaussCoefficient {
    #[inline]
    pub const fn new(degree: usize, order: usize, g: f64, h: f64, g_dot: f64, h_dot: f64) -> Self {
        Self {
            degree,
            order,
            g,
            h,
            g_dot,
            h_dot,
        }
    }

    /// A term with every value zero.
    #[inline]
    pub const fn zero(degree: usize, order: usize) -> Self {
        Self::new(degree, order, 0.0, 0.0, 0.0, 0.0)
    }

    /// `g + g_dot · (decimal_year − epoch)`.
    #[inline]
    pub fn g_at(&self, decimal_year: f64, epoch: f64) -> f64 {
        self.g + self.g_dot * (decimal_year - epoch)
    }

    /// `h + h_dot · (decimal_year − epoch)`.
    #[inline]
    pub fn h_at(&self, decimal_year: f64, epoch: f64) -> f64 {
        self.h + self.h_dot * (decimal_year - epoch)
    }

    fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let degree = fields.next()?.parse().ok()?;
        let order = fields.next()?.parse().ok()?;
        let mut values = [0.0; 4];
        for value in values.iter_mut() {
            *value = fields.next()?.parse().ok()?;
        }
        let [g, h, g_dot, h_dot] = values;
        Some(Self::new(degree, order, g, h, g_dot, h_dot))
    }
}

/// Header line of a COF file: `epoch name [release date]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CofHeader {
    pub epoch: f64,
    pub name: String,
    pub release: Option<String>,
}

impl CofHeader {
    fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if !(2..=3).contains(&fields.len()) || fields[1].parse::<f64>().is_ok() {
            return None;
        }
        Some(Self {
            epoch: fields[0].parse().ok()?,
            name: fields[1].to_string(),
            release: fields.get(2).map(|s| s.to_string()),
        })
    }
}

/// Coefficients as produced by a source, with the header when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoefficientSet {
    pub header: Option<CofHeader>,
    pub coefficients: Vec<GaussCoefficient>,
}

impl From<Vec<GaussCoefficient>> for CoefficientSet {
    fn from(coefficients: Vec<GaussCoefficient>) -> Self {
        Self {
            header: None,
            coefficients,
        }
    }
}

/// Anything that can produce the six-tuples of a model.
pub trait CoefficientSource {
    fn load(self) -> GeomagResult<CoefficientSet>;
}

impl CoefficientSource for CoefficientSet {
    #[inline]
    fn load(self) -> GeomagResult<CoefficientSet> {
        Ok(self)
    }
}

impl CoefficientSource for Vec<GaussCoefficient> {
    #[inline]
    fn load(self) -> GeomagResult<CoefficientSet> {
        Ok(self.into())
    }
}

impl CoefficientSource for &[GaussCoefficient] {
    #[inline]
    fn load(self) -> GeomagResult<CoefficientSet> {
        Ok(self.to_vec().into())
    }
}

/// COF text from any buffered reader.
#[derive(Debug)]
pub struct CofReader<R> {
    reader: R,
}

impl<R: BufRead> CofReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> CoefficientSource for CofReader<R> {
    fn load(self) -> GeomagResult<CoefficientSet> {
        let mut set = CoefficientSet::default();
        for (index, line) in self.reader.lines().enumerate() {
            let line = line?;
            let content = line.trim();
            if content.is_empty() {
                continue;
            }
            if content.starts_with("9999") {
                debug!(line = index + 1, "end-of-model marker");
                break;
            }
            if set.header.is_none() && set.coefficients.is_empty() {
                if let Some(header) = CofHeader::parse(content) {
                    debug!(epoch = header.epoch, name = %header.name, "coefficient header");
                    set.header = Some(header);
                    continue;
                }
            }
            match GaussCoefficient::parse(content) {
                Some(coefficient) => set.coefficients.push(coefficient),
                None => {
                    warn!(line = index + 1, content, "stopping at malformed coefficient line");
                    break;
                }
            }
        }
        debug!(count = set.coefficients.len(), "read coefficients");
        Ok(set)
    }
}

/// A COF file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CofFile {
    path: PathBuf,
}

impl CofFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CoefficientSource for CofFile {
    fn load(self) -> GeomagResult<CoefficientSet> {
        let file = File::open(&self.path).map_err(|source| GeomagError::CoefficientFile {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "loading coefficients");
        CofReader::new(BufReader::new(file)).load()
    }
}

/// Ragged `(l, m)` table: row `l` holds orders `0..=l` for `l = 1..=degree`.
///
/// Orders absent from the source are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    rows: Vec<Vec<GaussCoefficient>>,
}

impl CoefficientTable {
    /// Build the table, rejecting terms with `l = 0`, `m > l`, or
    /// `l > max_degree`.
    pub fn new(
        coefficients: impl IntoIterator<Item = GaussCoefficient>,
        max_degree: usize,
    ) -> GeomagResult<Self> {
        let coefficients: Vec<GaussCoefficient> = coefficients.into_iter().collect();
        if coefficients.is_empty() {
            return Err(GeomagError::EmptyCoefficientSource);
        }
        if let Some(bad) = coefficients
            .iter()
            .find(|c| c.degree == 0 || c.degree > max_degree || c.order > c.degree)
        {
            return Err(GeomagError::InvalidCoefficient {
                degree: bad.degree,
                order: bad.order,
                max_degree,
            });
        }

        let degree = coefficients.iter().map(|c| c.degree).max().unwrap_or(0);
        let mut rows: Vec<Vec<GaussCoefficient>> = (0..=degree)
            .map(|l| match l {
                0 => Vec::new(),
                _ => (0..=l).map(|m| GaussCoefficient::zero(l, m)).collect(),
            })
            .collect();

        let mut seen = HashSet::with_capacity(coefficients.len());
        for coefficient in coefficients {
            if !seen.insert((coefficient.degree, coefficient.order)) {
                warn!(
                    degree = coefficient.degree,
                    order = coefficient.order,
                    "duplicate coefficient, keeping the last one"
                );
            }
            rows[coefficient.degree][coefficient.order] = coefficient;
        }
        Ok(Self { rows })
    }

    /// Highest loaded degree.
    #[inline]
    pub fn degree(&self) -> usize {
        self.rows.len() - 1
    }

    /// Term `(l, m)`, if loaded.
    #[inline]
    pub fn get(&self, degree: usize, order: usize) -> Option<&GaussCoefficient> {
        self.rows.get(degree)?.get(order)
    }

    /// Orders `0..=l` of degree `l`.
    #[inline]
    pub fn row(&self, degree: usize) -> Option<&[GaussCoefficient]> {
        self.rows
            .get(degree)
            .map(Vec::as_slice)
            .filter(|row| !row.is_empty())
    }

    /// All terms in `(l, m)` order.
    pub fn iter(&self) -> impl Iterator<Item = &GaussCoefficient> {
        self.rows.iter().flatten()
    }

    /// Number of terms, including zero-filled ones.
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
