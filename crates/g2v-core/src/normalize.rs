// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::convert::{to_f64, Pixel};

/// Largest magnitude in `a`, or NaN as soon as any element is NaN.
///
/// Returns `0.0` for empty arrays.
pub fn max_abs<S, D>(a: &ArrayBase<S, D>) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    a.iter().fold(0.0f64, |acc, &v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.max(v.abs())
        }
    })
}

/// Scales `a` by its largest magnitude so every value lands in `[-1, 1]`.
///
/// Empty arrays, all-zero arrays and arrays whose peak magnitude is NaN or
/// infinite come back as an unscaled `f64` copy.
pub fn normalize<S, D>(a: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data,
    S::Elem: Pixel,
    D: Dimension,
{
    let a = to_f64(a);
    let peak = max_abs(&a);
    if peak == 0.0 || !peak.is_finite() {
        return a;
    }
    a / peak
}
