// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Entry-boundary conversion shared by every operation.

use ndarray::{Array, ArrayBase, Data, Dimension};

/// Element types that widen to `f64` without loss.
///
/// Covers `bool`, the 8/16/32-bit integers and both float widths; `i64` and
/// `u64` do not widen losslessly and are not included.
pub trait Pixel: Copy + Into<f64> {}

impl<T: Copy + Into<f64>> Pixel for T {}

/// Fresh `f64` copy of `a`, keeping its dimensionality.
pub fn to_f64<S, D>(a: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data,
    S::Elem: Pixel,
    D: Dimension,
{
    a.mapv(Into::into)
}
