// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Associated Legendre basis
//!
//! The ordinary associated Legendre functions `P_l^m(x)` and their Schmidt
//! semi-normalised form used by geomagnetic models:
//!
//! ```text
//! P̄_l^m(x) = P_l^m(x)                                  m = 0
//! P̄_l^m(x) = P_l^m(x) · sqrt(2 (l − m)! / (l + m)!)    m > 0
//! ```
//!
//! Neither carries the Condon–Shortley phase `(−1)^m`, following the
//! geomagnetic convention, so `P̄_1^1(x) = sqrt(1 − x²)`.
//!
//! [`semi_normalized_legendre`] runs its own normalised recursion and stays
//! finite at any degree; the unnormalised [`legendre`] overflows once
//! `(2m − 1)!!` leaves the `f64` range (around `m = 150`).
//!
//! ## References
//! * Abramowitz & Stegun (1964), §8.5 (recurrence relations).
//! * NOAA/BGS, *The US/UK World Magnetic Model for 2020-2025*, §1.2.

/// Largest `n` for which `n!` is finite in `f64`.
const MAX_FACTORIAL: usize = 170;

/// `n!` as a floating-point value.
pub fn factorial(n: usize) -> f64 {
    (2..=n).fold(1.0, |acc, k| acc * k as f64)
}

/// `(l − m)! / (l + m)!` without forming either factorial.
fn factorial_ratio(l: usize, m: usize) -> f64 {
    ((l - m + 1)..=(l + m)).fold(1.0, |acc, k| acc / k as f64)
}

/// Schmidt quasi-normalisation factor: `1` for `m = 0`, otherwise
/// `sqrt(2 (l − m)! / (l + m)!)`.
pub fn schmidt_factor(l: usize, m: usize) -> f64 {
    debug_assert!(m <= l, "order {m} exceeds degree {l}");
    if m == 0 {
        return 1.0;
    }
    let ratio = if l + m <= MAX_FACTORIAL {
        factorial(l - m) / factorial(l + m)
    } else {
        factorial_ratio(l, m)
    };
    (2.0 * ratio).sqrt()
}

/// Associated Legendre function `P_l^m(x)` for `x ∈ [−1, 1]`.
///
/// Starts from the closed form of `P_m^m` and recurses upward in degree:
///
/// ```text
/// (l − m) P_l^m = x (2l − 1) P_{l−1}^m − (l + m − 1) P_{l−2}^m
/// ```
///
/// Returns `0` when `m > l`.
pub fn legendre(l: usize, m: usize, x: f64) -> f64 {
    debug_assert!((-1.0..=1.0).contains(&x), "argument {x} outside [-1, 1]");
    if m > l {
        return 0.0;
    }

    // P_m^m = (2m − 1)!! (1 − x²)^{m/2}
    let mut p_mm = 1.0;
    if m > 0 {
        let sin_like = ((1.0 - x) * (1.0 + x)).sqrt();
        let mut odd = 1.0;
        for _ in 0..m {
            p_mm *= odd * sin_like;
            odd += 2.0;
        }
    }
    if l == m {
        return p_mm;
    }

    let mut p_prev = p_mm;
    let mut p_curr = x * (2 * m + 1) as f64 * p_mm;
    for ll in (m + 2)..=l {
        let p_next =
            (x * (2 * ll - 1) as f64 * p_curr - (ll + m - 1) as f64 * p_prev) / (ll - m) as f64;
        p_prev = p_curr;
        p_curr = p_next;
    }
    p_curr
}

/// Schmidt semi-normalised `P̄_l^m(x)`, equal to
/// `legendre(l, m, x) * schmidt_factor(l, m)`.
///
/// For `m > 0` the seed is already normalised,
///
/// ```text
/// P̄_m^m = sqrt(2) · Π_{k=1..m} sqrt((2k − 1) / 2k) · (1 − x²)^{m/2}
/// ```
///
/// and the degree recursion keeps it that way:
///
/// ```text
/// sqrt(l² − m²) P̄_l^m = (2l − 1) x P̄_{l−1}^m − sqrt((l − 1)² − m²) P̄_{l−2}^m
/// ```
pub fn semi_normalized_legendre(l: usize, m: usize, x: f64) -> f64 {
    if m > l {
        return 0.0;
    }
    if m == 0 {
        return legendre(l, 0, x);
    }

    let sin_like = ((1.0 - x) * (1.0 + x)).sqrt();
    let mut p_mm = std::f64::consts::SQRT_2;
    for k in 1..=m {
        let k = k as f64;
        p_mm *= ((2.0 * k - 1.0) / (2.0 * k)).sqrt() * sin_like;
    }
    if l == m {
        return p_mm;
    }

    let mf = m as f64;
    let mut p_prev = p_mm;
    let mut p_curr = (2.0 * mf + 1.0).sqrt() * x * p_mm;
    for ll in (m + 2)..=l {
        let lf = ll as f64;
        let p_next = ((2.0 * lf - 1.0) * x * p_curr
            - ((lf - 1.0) * (lf - 1.0) - mf * mf).sqrt() * p_prev)
            / (lf * lf - mf * mf).sqrt();
        p_prev = p_curr;
        p_curr = p_next;
    }
    p_curr
}

/// Latitude derivative `d P̄_l^m(sin φ) / dφ` for a latitude `φ` in radians:
///
/// ```text
/// (l + 1) tan φ · P̄_l^m(sin φ) − sqrt((l + 1)² − m²) · P̄_{l+1}^m(sin φ) / cos φ
/// ```
///
/// Undefined at the poles, where `cos φ = 0`.
pub fn semi_normalized_legendre_sin_deriv(l: usize, m: usize, latitude: f64) -> f64 {
    let (sin, cos) = latitude.sin_cos();
    let next = (l + 1) as f64;
    let mf = m as f64;
    next * latitude.tan() * semi_normalized_legendre(l, m, sin)
        - (next * next - mf * mf).sqrt() * semi_normalized_legendre(l + 1, m, sin) / cos
}
