use crate::{
    error::{Error, Result, check_shape},
    image::{IntensityImage, Plane, StokesChannel, StokesImage},
    light::stokes::StokesVec,
    metrics::Metrics,
};
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;
use uom::si::angle::degree;

/// Default guard added to denominators that can be zero.
pub const DEFAULT_EPSILON: f64 = 1e-8;

/// Computes Stokes images and polarization metrics from intensity images.
///
/// The engine is stateless between calls.
/// It only carries `epsilon`, the guard added to every denominator that can vanish.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "EngineConfig"))]
pub struct StokesEngine {
    epsilon: f64,
}

impl StokesEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with a custom denominator guard.
    ///
    /// Returns an error unless `epsilon` is finite and positive.
    pub fn with_epsilon(epsilon: f64) -> Result<Self> {
        if !(epsilon.is_finite() && epsilon > 0.) {
            return Err(Error::InvalidEpsilon { epsilon });
        }

        Ok(Self { epsilon })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Computes a Stokes image from intensities at 0, 45, 90 and 135 degrees, in that order.
    ///
    /// Fails unless exactly four images of identical shape are given.
    pub fn stokes_from_four(&self, images: &[&IntensityImage]) -> Result<StokesImage> {
        let [i000, i045, i090, i135] = images else {
            return Err(Error::ImageCount {
                expected: 4,
                got: images.len(),
            });
        };

        let dims = i000.dimensions();
        for image in [i045, i090, i135] {
            check_shape(dims, image.dimensions())?;
        }

        let pixels: Vec<StokesVec> = (
            i000.as_slice(),
            i045.as_slice(),
            i090.as_slice(),
            i135.as_slice(),
        )
            .into_par_iter()
            .map(|(&a, &b, &c, &d)| StokesVec::from_four(a, b, c, d))
            .collect();

        debug!(
            rows = dims.0,
            cols = dims.1,
            "computed stokes image from four angles"
        );
        Ok(StokesImage::new(dims.0, dims.1, pixels))
    }

    /// Computes a Stokes image from intensities at 0 and 90 degrees.
    ///
    /// S_2 cannot be recovered from two angles and is zero everywhere.
    pub fn stokes_from_two(
        &self,
        i000: &IntensityImage,
        i090: &IntensityImage,
    ) -> Result<StokesImage> {
        let dims = i000.dimensions();
        check_shape(dims, i090.dimensions())?;

        let pixels: Vec<StokesVec> = i000
            .as_slice()
            .par_iter()
            .zip(i090.as_slice().par_iter())
            .map(|(&a, &b)| StokesVec::from_two(a, b))
            .collect();

        debug!(
            rows = dims.0,
            cols = dims.1,
            "computed stokes image from two angles"
        );
        Ok(StokesImage::new(dims.0, dims.1, pixels))
    }

    /// Computes DoP, orientation and ellipticity for every pixel of `stokes`.
    ///
    /// The Stokes parameters are passed through alongside the derived metrics.
    pub fn metrics_from_stokes(&self, stokes: &StokesImage) -> Metrics {
        let (rows, cols) = (stokes.rows(), stokes.cols());
        let eps = self.epsilon;

        let derived: Vec<[f64; 3]> = stokes
            .as_slice()
            .par_iter()
            .map(|sv| {
                let dop = sv.dop(eps);
                [
                    dop.into_inner(),
                    sv.orientation().get::<degree>(),
                    sv.ellipticity(dop, eps).get::<degree>(),
                ]
            })
            .collect();

        let column = |i: usize| {
            let pixels = derived.par_iter().map(|m| m[i]).collect();
            Plane::new(rows, cols, pixels)
        };

        debug!(rows, cols, "computed polarization metrics");
        Metrics {
            dop: column(0),
            orientation_angle: column(1),
            ellipticity_angle: column(2),
            s0: stokes.plane(StokesChannel::S0),
            s1: stokes.plane(StokesChannel::S1),
            s2: stokes.plane(StokesChannel::S2),
        }
    }

    /// Computes metrics from an interleaved `(rows, cols, channels)` Stokes buffer.
    ///
    /// Fails unless `channels` is 3 and `data` matches the shape.
    pub fn metrics_from_buffer(
        &self,
        rows: usize,
        cols: usize,
        channels: usize,
        data: &[f64],
    ) -> Result<Metrics> {
        let stokes = StokesImage::from_interleaved(rows, cols, channels, data)?;
        Ok(self.metrics_from_stokes(&stokes))
    }
}

impl Default for StokesEngine {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// Unvalidated engine configuration as read from a config file.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct EngineConfig {
    epsilon: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<EngineConfig> for StokesEngine {
    type Error = Error;

    fn try_from(config: EngineConfig) -> Result<Self> {
        Self::with_epsilon(config.epsilon)
    }
}
