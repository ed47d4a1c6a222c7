//! Polarization State Utilities
//!
//! Computes Stokes parameters from intensity images captured behind linear
//! polarizers at 0, 45, 90 and 135 degrees (or only 0 and 90 degrees), and
//! derives the degree of polarization, orientation angle and ellipticity
//! angle for every pixel.
//!
//! ```
//! use polarstate::prelude::*;
//!
//! let i000 = IntensityImage::from_fn(2, 2, |_, _| 10.)?;
//! let i090 = IntensityImage::from_fn(2, 2, |_, _| 0.)?;
//!
//! let engine = StokesEngine::default();
//! let stokes = engine.stokes_from_two(&i000, &i090)?;
//! let metrics = engine.metrics_from_stokes(&stokes);
//!
//! assert_eq!(metrics.orientation_angle.get(0, 0), Some(0.));
//! # Ok::<(), polarstate::error::Error>(())
//! ```

pub mod engine;
pub mod error;
pub mod image;
pub mod light;
pub mod metrics;

pub mod prelude {
    pub use crate::engine::StokesEngine;
    pub use crate::image::{IntensityImage, Plane, StokesChannel, StokesImage};
    pub use crate::light::{dop::Dop, stokes::StokesVec};
    pub use crate::metrics::{MetricKey, Metrics};
}
