// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! `.npy` persistence for glyphs, volumes, layers, projections and spectra.
//!
//! Files are read fully into memory before decoding and written fully before
//! the call returns. Real loaders accept any dtype that widens to `f64`
//! without loss; complex loaders accept `complex128` only.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use ndarray::{ArrayBase, ArrayD, Data, Dimension};
use ndarray_npy::{
    ReadNpyError, ReadNpyExt, ReadableElement, WritableElement, WriteNpyError, WriteNpyExt,
};
use num_complex::Complex64;
use thiserror::Error;

use crate::convert::{to_f64, Pixel};

#[derive(Debug, Error)]
pub enum ArrayFileError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read array from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ReadNpyError,
    },
    #[error("failed to write array to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: WriteNpyError,
    },
    #[error("{}: unsupported dtype, expected {expected}", path.display())]
    UnsupportedDtype {
        path: PathBuf,
        expected: &'static str,
    },
}

type Decoder = fn(&[u8]) -> Result<Option<ArrayD<f64>>, ReadNpyError>;

const REAL_DECODERS: [Decoder; 9] = [
    decode_as::<f64>,
    decode_as::<f32>,
    decode_as::<i32>,
    decode_as::<u32>,
    decode_as::<i16>,
    decode_as::<u16>,
    decode_as::<i8>,
    decode_as::<u8>,
    decode_as::<bool>,
];

/// `Ok(None)` when the file holds a different dtype.
fn decode_as<A>(bytes: &[u8]) -> Result<Option<ArrayD<f64>>, ReadNpyError>
where
    A: ReadableElement + Pixel,
{
    match ArrayD::<A>::read_npy(bytes) {
        Ok(array) => Ok(Some(to_f64(&array))),
        Err(ReadNpyError::WrongDescriptor(_)) => Ok(None),
        Err(err) => Err(err),
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ArrayFileError> {
    fs::read(path).map_err(|source| ArrayFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a real array of any dimensionality as `f64`.
pub fn load_real(path: impl AsRef<Path>) -> Result<ArrayD<f64>, ArrayFileError> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    for decode in REAL_DECODERS {
        let decoded = decode(&bytes).map_err(|source| ArrayFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(array) = decoded {
            tracing::debug!(path = %path.display(), shape = ?array.shape(), "loaded real array");
            return Ok(array);
        }
    }
    Err(ArrayFileError::UnsupportedDtype {
        path: path.to_path_buf(),
        expected: "bool, 8/16/32-bit integer, float32 or float64",
    })
}

/// Loads a `complex128` array of any dimensionality.
pub fn load_complex(path: impl AsRef<Path>) -> Result<ArrayD<Complex64>, ArrayFileError> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    match ArrayD::<Complex64>::read_npy(bytes.as_slice()) {
        Ok(array) => Ok(array),
        Err(ReadNpyError::WrongDescriptor(_)) => Err(ArrayFileError::UnsupportedDtype {
            path: path.to_path_buf(),
            expected: "complex128",
        }),
        Err(source) => Err(ArrayFileError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `array` to `path`, creating missing parent directories.
///
/// Returns the path as written, for reporting.
pub fn save_array<A, S, D>(
    path: impl AsRef<Path>,
    array: &ArrayBase<S, D>,
) -> Result<String, ArrayFileError>
where
    A: WritableElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    let path = path.as_ref();
    let io_err = |source: io::Error| ArrayFileError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    array
        .write_npy(&mut writer)
        .map_err(|source| ArrayFileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(io_err)?;
    tracing::debug!(path = %path.display(), shape = ?array.shape(), "saved array");
    Ok(path.display().to_string())
}
