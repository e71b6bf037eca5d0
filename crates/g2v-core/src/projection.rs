// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralTorch — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Simplified angular projector.
//!
//! The projector accepts an angle and a rotation axis, but the current
//! implementation collapses the volume by summing along the stacking (Z)
//! axis regardless of either. That keeps the `(H, W)` shape and the total
//! energy of the volume. A geometrically accurate rotational projection
//! would be a separate, versioned operation; this one must keep its
//! angle-invariant output so existing callers see identical arrays.

use core::fmt;
use core::str::FromStr;

use ndarray::{Array2, ArrayBase, Axis, Data, Dimension};

use crate::convert::Pixel;
use crate::error::{G2vError, G2vResult};
use crate::volume::volume_depth;

/// Rotation axis named by a projection request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectionAxis {
    X,
    Y,
    Z,
}

impl ProjectionAxis {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectionAxis::X => "x",
            ProjectionAxis::Y => "y",
            ProjectionAxis::Z => "z",
        }
    }
}

impl fmt::Display for ProjectionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectionAxis {
    type Err = G2vError;

    fn from_str(axis: &str) -> Result<Self, Self::Err> {
        match axis {
            "x" => Ok(ProjectionAxis::X),
            "y" => Ok(ProjectionAxis::Y),
            "z" => Ok(ProjectionAxis::Z),
            other => Err(G2vError::InvalidAxis {
                axis: other.to_string(),
            }),
        }
    }
}

/// Projects an `(H, W, Z)` volume to `(H, W)`.
///
/// `theta_deg` and `axis` are validated but do not influence the output: the
/// result is always the element-wise sum of all layers.
pub fn angular_projection<S, D>(
    volume: &ArrayBase<S, D>,
    theta_deg: f64,
    axis: &str,
) -> G2vResult<Array2<f64>>
where
    S: Data,
    S::Elem: Pixel,
    D: Dimension,
{
    let depth = volume_depth(volume)?;
    let axis: ProjectionAxis = axis.parse()?;
    tracing::debug!(theta_deg, %axis, depth, "summing volume along z");

    let volume = volume.view().into_dyn();
    let mut projection = Array2::zeros((volume.shape()[0], volume.shape()[1]));
    for layer in volume.axis_iter(Axis(2)) {
        projection.zip_mut_with(&layer, |acc, &v| *acc += Into::<f64>::into(v));
    }
    Ok(projection)
}
