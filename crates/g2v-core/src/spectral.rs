// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Centred 2-D discrete Fourier transform of real glyphs.
//!
//! `fft_encode` runs a forward DFT (rows, then columns) through `rustfft` and
//! moves the zero-frequency bin to the array centre; `ifft_decode` undoes the
//! shift, runs the inverse DFT, normalises by `1 / (H·W)` and keeps only the
//! real part. For finite real input the pair reproduces the glyph up to
//! rounding.

use ndarray::{Array2, ArrayBase, Data, Dimension, Ix2};
use num_complex::Complex64;
use rustfft::{FftDirection, FftPlanner};

use crate::convert::Pixel;
use crate::error::{G2vError, G2vResult};
use crate::{Glyph, Spectrum};

/// Forward 2-D DFT of a real 2-D array, zero frequency centred.
pub fn fft_encode<S, D>(glyph: &ArrayBase<S, D>) -> G2vResult<Spectrum>
where
    S: Data,
    S::Elem: Pixel,
    D: Dimension,
{
    let (height, width) = planar_dims(glyph.shape(), "fft_encode")?;
    let mut grid = Array2::<Complex64>::zeros((height, width));
    grid.zip_mut_with(&glyph.view().into_dyn(), |dst, &src| {
        *dst = Complex64::new(src.into(), 0.0)
    });
    fft2_inplace(&mut grid, FftDirection::Forward);
    tracing::debug!(height, width, "encoded spectrum");
    Ok(fftshift2(&grid))
}

/// Inverse of [`fft_encode`]; the imaginary residue is discarded.
pub fn ifft_decode<S, D>(spectrum: &ArrayBase<S, D>) -> G2vResult<Glyph>
where
    S: Data<Elem = Complex64>,
    D: Dimension,
{
    let (height, width) = planar_dims(spectrum.shape(), "ifft_decode")?;
    let mut centred = Array2::<Complex64>::zeros((height, width));
    centred.zip_mut_with(&spectrum.view().into_dyn(), |dst, &src| *dst = src);
    let mut grid = ifftshift2(&centred);
    fft2_inplace(&mut grid, FftDirection::Inverse);
    let scale = 1.0 / (height * width) as f64;
    tracing::debug!(height, width, "decoded spectrum");
    Ok(grid.mapv(|c| c.re * scale))
}

/// Rolls both axes by `n / 2` so bin `(0, 0)` lands at `(H / 2, W / 2)`.
pub fn fftshift2<A, S>(a: &ArrayBase<S, Ix2>) -> Array2<A>
where
    A: Clone,
    S: Data<Elem = A>,
{
    let (height, width) = a.dim();
    roll2(a, height / 2, width / 2)
}

/// Inverse of [`fftshift2`]. Differs from it only on odd axis lengths.
pub fn ifftshift2<A, S>(a: &ArrayBase<S, Ix2>) -> Array2<A>
where
    A: Clone,
    S: Data<Elem = A>,
{
    let (height, width) = a.dim();
    roll2(a, height - height / 2, width - width / 2)
}

/// Mean squared difference between two equally shaped real arrays.
pub fn reconstruction_mse<S1, S2>(
    original: &ArrayBase<S1, Ix2>,
    reconstructed: &ArrayBase<S2, Ix2>,
) -> G2vResult<f64>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if original.shape() != reconstructed.shape() {
        return Err(G2vError::ShapeMismatch {
            index: 1,
            expected: original.shape().to_vec(),
            actual: reconstructed.shape().to_vec(),
        });
    }
    let total: f64 = original
        .iter()
        .zip(reconstructed.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum();
    Ok(total / original.len() as f64)
}

fn planar_dims(shape: &[usize], op: &'static str) -> G2vResult<(usize, usize)> {
    match *shape {
        [height, width] if height > 0 && width > 0 => Ok((height, width)),
        [_, _] => Err(G2vError::EmptyArray { op }),
        _ => Err(G2vError::NotTwoDimensional { ndim: shape.len() }),
    }
}

/// `out[(i + dr) % h, (j + dc) % w] = a[i, j]`
fn roll2<A, S>(a: &ArrayBase<S, Ix2>, dr: usize, dc: usize) -> Array2<A>
where
    A: Clone,
    S: Data<Elem = A>,
{
    let (height, width) = a.dim();
    Array2::from_shape_fn((height, width), |(i, j)| {
        a[[(i + height - dr) % height, (j + width - dc) % width]].clone()
    })
}

/// Unnormalised 2-D DFT: every row, then every column.
fn fft2_inplace(grid: &mut Array2<Complex64>, direction: FftDirection) {
    let (height, width) = grid.dim();
    let mut planner = FftPlanner::<f64>::new();
    let row_fft = planner.plan_fft(width, direction);
    let col_fft = planner.plan_fft(height, direction);
    let mut buf = vec![Complex64::default(); height.max(width)];

    for mut row in grid.rows_mut() {
        let lane = &mut buf[..width];
        for (dst, src) in lane.iter_mut().zip(row.iter()) {
            *dst = *src;
        }
        row_fft.process(lane);
        row.iter_mut().zip(lane.iter()).for_each(|(dst, src)| *dst = *src);
    }

    for mut col in grid.columns_mut() {
        let lane = &mut buf[..height];
        for (dst, src) in lane.iter_mut().zip(col.iter()) {
            *dst = *src;
        }
        col_fft.process(lane);
        col.iter_mut().zip(lane.iter()).for_each(|(dst, src)| *dst = *src);
    }
}
