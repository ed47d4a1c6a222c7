//! Per-pixel polarization metrics.

use crate::image::Plane;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names one of the six grids in [`Metrics`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MetricKey {
    Dop,
    OrientationAngle,
    EllipticityAngle,
    S0,
    S1,
    S2,
}

impl MetricKey {
    /// Every key, in the order [`Metrics::iter`] yields them.
    pub const ALL: [MetricKey; 6] = [
        MetricKey::Dop,
        MetricKey::OrientationAngle,
        MetricKey::EllipticityAngle,
        MetricKey::S0,
        MetricKey::S1,
        MetricKey::S2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Dop => "dop",
            MetricKey::OrientationAngle => "orientation_angle",
            MetricKey::EllipticityAngle => "ellipticity_angle",
            MetricKey::S0 => "S0",
            MetricKey::S1 => "S1",
            MetricKey::S2 => "S2",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarization metrics for every pixel of a Stokes image.
///
/// All six planes share the shape of the source images.
/// Angles are in degrees.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Metrics {
    /// Degree of polarization, always within [0, 1].
    pub dop: Plane,

    /// Orientation of the polarization ellipse, within (-90, 90].
    pub orientation_angle: Plane,

    /// Ellipticity of the polarization ellipse.
    /// Zero wherever the arcsine was undefined.
    pub ellipticity_angle: Plane,

    pub s0: Plane,
    pub s1: Plane,
    pub s2: Plane,
}

impl Metrics {
    /// Returns the shape shared by every plane as `(rows, cols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        self.dop.dimensions()
    }

    pub fn get(&self, key: MetricKey) -> &Plane {
        match key {
            MetricKey::Dop => &self.dop,
            MetricKey::OrientationAngle => &self.orientation_angle,
            MetricKey::EllipticityAngle => &self.ellipticity_angle,
            MetricKey::S0 => &self.s0,
            MetricKey::S1 => &self.s1,
            MetricKey::S2 => &self.s2,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, &Plane)> {
        MetricKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}
