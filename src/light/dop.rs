#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Describes the intensity ratio of polarized light in a ray.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "f64", into = "f64"))]
pub struct Dop {
    degree: f64,
}

impl Dop {
    /// Create a new `Dop` from a raw polarized-to-total intensity ratio.
    ///
    /// Noise can push the ratio outside of [0, 1], so it is clamped.
    /// A NaN ratio carries no polarization information and becomes zero.
    pub fn saturating(ratio: f64) -> Self {
        if ratio.is_nan() {
            return Self::zero();
        }

        Self {
            degree: ratio.clamp(0.0, 1.0),
        }
    }

    /// Create a new `Dop` of zero.
    pub fn zero() -> Self {
        Self { degree: 0. }
    }

    pub fn into_inner(self) -> f64 {
        self.degree
    }
}

impl From<f64> for Dop {
    fn from(ratio: f64) -> Self {
        Self::saturating(ratio)
    }
}

impl From<Dop> for f64 {
    fn from(dop: Dop) -> Self {
        dop.degree
    }
}

impl Default for Dop {
    fn default() -> Self {
        Self::zero()
    }
}
