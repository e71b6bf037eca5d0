// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Glyph-to-volume toolkit.
//!
//! Synthesizes small square glyph bitmaps from named tokens, stacks them into
//! an `(H, W, Z)` volume, slices layers back out, collapses the volume with a
//! simplified projector and runs a centred 2-D FFT round trip on any glyph.
//! Every operation is a pure function over caller-owned `ndarray` arrays and
//! returns a fresh array; nothing is mutated in place and no state survives a
//! call.
//!
//! ```text
//! glyph_from_token ─▶ normalize ─▶ build_volume_stack ─▶ retrieve_layer
//!                                                    └─▶ angular_projection
//! any 2-D array ─▶ fft_encode ─▶ ifft_decode
//! ```

pub mod array_file;
pub mod convert;
pub mod error;
pub mod glyph;
pub mod normalize;
pub mod projection;
pub mod spectral;
pub mod volume;

pub use ndarray;
pub use num_complex::Complex64;

pub use array_file::{load_complex, load_real, save_array, ArrayFileError};
pub use convert::Pixel;
pub use error::{G2vError, G2vResult};
pub use glyph::{glyph_from_token, GlyphToken, DEFAULT_GLYPH_SIZE};
pub use normalize::normalize;
pub use projection::{angular_projection, ProjectionAxis};
pub use spectral::{fft_encode, ifft_decode, reconstruction_mse};
pub use volume::{build_volume_stack, retrieve_layer, volume_depth};

/// Real-valued 2-D intensity field.
pub type Glyph = ndarray::Array2<f64>;

/// `(H, W, Z)` stack of glyphs.
pub type Volume = ndarray::Array3<f64>;

/// Centred 2-D DFT of a glyph.
pub type Spectrum = ndarray::Array2<Complex64>;
