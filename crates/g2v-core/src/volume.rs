// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Stacking glyphs into an `(H, W, Z)` volume and slicing layers back out.

use ndarray::{Array2, Array3, ArrayBase, Axis, Data, Dimension};

use crate::convert::Pixel;
use crate::error::{G2vError, G2vResult};
use crate::{Glyph, Volume};

/// Stacks 2-D glyphs along a new trailing axis; glyph 0 becomes layer 0.
///
/// Every glyph must be 2-D and share the shape of the first one. The result
/// is always `f64`.
pub fn build_volume_stack<'a, I, S, D>(glyphs: I) -> G2vResult<Volume>
where
    I: IntoIterator<Item = &'a ArrayBase<S, D>>,
    S: Data + 'a,
    S::Elem: Pixel,
    D: Dimension + 'a,
{
    let glyphs: Vec<&ArrayBase<S, D>> = glyphs.into_iter().collect();
    let first = glyphs.first().ok_or(G2vError::EmptyInput)?;
    if first.ndim() != 2 {
        return Err(G2vError::ShapeMismatch {
            index: 0,
            expected: Vec::new(),
            actual: first.shape().to_vec(),
        });
    }
    let expected = first.shape().to_vec();
    for (index, glyph) in glyphs.iter().enumerate().skip(1) {
        if glyph.shape() != expected.as_slice() {
            return Err(G2vError::ShapeMismatch {
                index,
                expected,
                actual: glyph.shape().to_vec(),
            });
        }
    }

    let (height, width) = (expected[0], expected[1]);
    let mut volume = Array3::zeros((height, width, glyphs.len()));
    for (z, glyph) in glyphs.iter().enumerate() {
        volume
            .index_axis_mut(Axis(2), z)
            .zip_mut_with(*glyph, |dst, &src| *dst = src.into());
    }
    tracing::debug!(height, width, depth = glyphs.len(), "stacked volume");
    Ok(volume)
}

/// Number of layers in an `(H, W, Z)` volume.
pub fn volume_depth<S, D>(volume: &ArrayBase<S, D>) -> G2vResult<usize>
where
    S: Data,
    D: Dimension,
{
    if volume.ndim() != 3 {
        return Err(G2vError::NotThreeDimensional {
            ndim: volume.ndim(),
        });
    }
    Ok(volume.shape()[2])
}

/// Copies layer `z` out of an `(H, W, Z)` volume.
///
/// Negative indices are rejected, not wrapped.
pub fn retrieve_layer<S, D>(volume: &ArrayBase<S, D>, z: i64) -> G2vResult<Glyph>
where
    S: Data,
    S::Elem: Pixel,
    D: Dimension,
{
    let depth = volume_depth(volume)?;
    let index = usize::try_from(z)
        .ok()
        .filter(|&index| index < depth)
        .ok_or(G2vError::IndexOutOfRange { index: z, depth })?;

    let volume = volume.view().into_dyn();
    let mut layer = Array2::zeros((volume.shape()[0], volume.shape()[1]));
    layer.zip_mut_with(&volume.index_axis(Axis(2), index), |dst, &src| {
        *dst = src.into()
    });
    Ok(layer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{s, Array1, ArrayD, IxDyn};

    fn square_and_bar() -> (Glyph, Glyph) {
        let mut square = Glyph::zeros((8, 8));
        square.slice_mut(s![2..6, 2..6]).fill(1.0);
        let mut bar = Glyph::zeros((8, 8));
        bar.slice_mut(s![3..5, ..]).fill(1.0);
        (square, bar)
    }

    #[test]
    fn stack_then_slice_returns_each_glyph() {
        let (square, bar) = square_and_bar();
        let volume = build_volume_stack(&[square.clone(), bar.clone()]).unwrap();
        assert_eq!(volume.dim(), (8, 8, 2));
        assert_eq!(retrieve_layer(&volume, 0).unwrap(), square);
        assert_eq!(retrieve_layer(&volume, 1).unwrap(), bar);
        assert_eq!(volume_depth(&volume).unwrap(), 2);
    }

    #[test]
    fn empty_stack_is_rejected() {
        let empty: Vec<Glyph> = Vec::new();
        assert_eq!(build_volume_stack(&empty).unwrap_err(), G2vError::EmptyInput);
    }

    #[test]
    fn mismatched_shape_reports_index() {
        let glyphs = vec![Glyph::zeros((8, 8)), Glyph::zeros((4, 4))];
        let err = build_volume_stack(&glyphs).unwrap_err();
        assert_eq!(
            err,
            G2vError::ShapeMismatch {
                index: 1,
                expected: vec![8, 8],
                actual: vec![4, 4],
            }
        );
    }

    #[test]
    fn non_planar_glyphs_are_rejected() {
        let glyphs = vec![ArrayD::<f64>::zeros(IxDyn(&[8]))];
        let err = build_volume_stack(&glyphs).unwrap_err();
        assert!(matches!(err, G2vError::ShapeMismatch { index: 0, .. }));

        let glyphs = vec![
            ArrayD::<f64>::zeros(IxDyn(&[4, 4])),
            ArrayD::<f64>::zeros(IxDyn(&[4, 4])),
            ArrayD::<f64>::zeros(IxDyn(&[4, 4, 1])),
        ];
        let err = build_volume_stack(&glyphs).unwrap_err();
        assert!(matches!(err, G2vError::ShapeMismatch { index: 2, .. }));
    }

    #[test]
    fn integer_glyphs_widen_to_f64() {
        let glyphs = vec![
            Array2::from_shape_vec((2, 2), vec![1u8, 2, 3, 4]).unwrap(),
            Array2::from_shape_vec((2, 2), vec![5u8, 6, 7, 8]).unwrap(),
        ];
        let volume = build_volume_stack(&glyphs).unwrap();
        assert_eq!(volume[[1, 0, 1]], 7.0);
        assert_eq!(volume[[0, 1, 0]], 2.0);
    }

    #[test]
    fn out_of_range_layers_fail() {
        let (square, bar) = square_and_bar();
        let volume = build_volume_stack(&[square, bar]).unwrap();
        for z in [-1, 2, 100] {
            assert_eq!(
                retrieve_layer(&volume, z).unwrap_err(),
                G2vError::IndexOutOfRange { index: z, depth: 2 }
            );
        }
    }

    #[test]
    fn slicing_requires_three_dimensions() {
        let flat = Array1::<f64>::zeros(4);
        assert_eq!(
            retrieve_layer(&flat, 0).unwrap_err(),
            G2vError::NotThreeDimensional { ndim: 1 }
        );
    }

    #[test]
    fn retrieved_layer_is_a_copy() {
        let (square, bar) = square_and_bar();
        let volume = build_volume_stack(&[square.clone(), bar]).unwrap();
        let mut layer = retrieve_layer(&volume, 0).unwrap();
        layer.fill(-3.0);
        assert_eq!(retrieve_layer(&volume, 0).unwrap(), square);
    }

    #[test]
    fn dynamic_volumes_slice_like_static_ones() {
        let (square, bar) = square_and_bar();
        let volume = build_volume_stack(&[square, bar.clone()]).unwrap().into_dyn();
        assert_eq!(retrieve_layer(&volume, 1).unwrap(), bar);
    }
}
