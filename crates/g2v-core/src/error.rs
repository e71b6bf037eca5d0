// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use thiserror::Error;

/// Failures raised by the glyph, volume, projection and spectral operations.
///
/// Every operation validates its own inputs and returns one of these
/// synchronously; nothing is retried or substituted with a default.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum G2vError {
    /// Glyph synthesis needs room for at least one pixel of padding/thickness.
    #[error("size {size} too small for glyph synthesis (must be > 4)")]
    InvalidSize { size: usize },
    /// The token did not normalise to any known glyph pattern.
    #[error("unknown token: {token}")]
    UnknownToken { token: String },
    /// Volume stacking received no glyphs.
    #[error("no glyphs provided")]
    EmptyInput,
    /// A glyph did not match the shape of glyph 0, or was not 2-D.
    ///
    /// `expected` is empty when glyph 0 itself is not 2-D.
    #[error("glyph {index} shape {actual:?} != {expected:?} (glyphs must be 2-D and share one shape)")]
    ShapeMismatch {
        index: usize,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    /// Slicing or projection received something other than an (H, W, Z) array.
    #[error("volume must be 3-D (H, W, Z), got {ndim} dimension(s)")]
    NotThreeDimensional { ndim: usize },
    /// Requested layer lies outside `[0, depth)`.
    #[error("layer index {index} out of range for depth {depth}")]
    IndexOutOfRange { index: i64, depth: usize },
    /// Projection axis was not one of `x`, `y`, `z`.
    #[error("axis must be one of 'x', 'y', 'z', got {axis:?}")]
    InvalidAxis { axis: String },
    /// The spectral codec only handles 2-D arrays.
    #[error("spectral codec expects a 2-D array, got {ndim} dimension(s)")]
    NotTwoDimensional { ndim: usize },
    /// A zero-length axis has no discrete Fourier transform.
    #[error("{op} received an array with a zero-length axis")]
    EmptyArray { op: &'static str },
}

pub type G2vResult<T> = Result<T, G2vError>;
