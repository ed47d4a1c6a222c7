use crate::{
    error::{Error, Result, check_len},
    light::stokes::StokesVec,
};
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A grayscale intensity image.
///
/// Each pixel measures light intensity through a single linear polarizing filter.
/// Several intensity images taken through differently oriented filters determine the
/// polarization state of incident rays.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid<f64>"))]
pub struct IntensityImage {
    rows: usize,
    cols: usize,

    /// Buffer of intensities organized by row.
    pixels: Vec<f64>,
}

impl IntensityImage {
    /// Create an intensity image from a buffer of intensities organized by row.
    ///
    /// ```text
    /// +--------+--------+--------+-----+--------+--------+
    /// |      0 |      1 |      2 | ... |    w-2 |    w-1 |
    /// +--------+--------+--------+-----+--------+--------+
    /// |      w |    w+1 |    w+2 | ... |   2w-2 |   2w-1 |
    /// +--------+--------+--------+-----+--------+--------+
    /// |    ... |    ... |
    /// +--------+
    /// | w(h-1) |
    /// ```
    pub fn from_vec(rows: usize, cols: usize, pixels: Vec<f64>) -> Result<Self> {
        check_len(&[rows, cols], pixels.len())?;
        Ok(Self { rows, cols, pixels })
    }

    /// Create an intensity image from an 8-bit grayscale buffer organized by row.
    pub fn from_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        check_len(&[height, width], bytes.len())?;
        let pixels = bytes.par_iter().map(|&b| b as f64).collect();
        Ok(Self {
            rows: height,
            cols: width,
            pixels,
        })
    }

    /// Create an intensity image by evaluating `f(row, col)` at every pixel.
    pub fn from_fn<F>(rows: usize, cols: usize, f: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        let len = rows.checked_mul(cols).ok_or_else(|| Error::ShapeOverflow {
            shape: vec![rows, cols],
        })?;
        let pixels = (0..len)
            .into_par_iter()
            .map(|i| f(i / cols, i % cols))
            .collect();

        Ok(Self { rows, cols, pixels })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the shape as `(rows, cols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the intensity at `(row, col)` if it is within the image, otherwise returns None.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let i = index(self.dimensions(), row, col)?;
        self.pixels.get(i).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        self.pixels.as_slice()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.pixels
    }
}

/// A single scalar plane aligned pixel-for-pixel with the source images.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid<f64>"))]
pub struct Plane {
    rows: usize,
    cols: usize,
    pixels: Vec<f64>,
}

impl Plane {
    pub(crate) fn new(rows: usize, cols: usize, pixels: Vec<f64>) -> Self {
        debug_assert_eq!(rows * cols, pixels.len());
        Self { rows, cols, pixels }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the shape as `(rows, cols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the value at `(row, col)` if it is within the plane, otherwise returns None.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let i = index(self.dimensions(), row, col)?;
        self.pixels.get(i).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        self.pixels.as_slice()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.pixels
    }
}

/// Names one of the three planes of a Stokes image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StokesChannel {
    S0,
    S1,
    S2,
}

impl StokesChannel {
    fn offset(self) -> usize {
        match self {
            StokesChannel::S0 => 0,
            StokesChannel::S1 => 1,
            StokesChannel::S2 => 2,
        }
    }
}

/// An image of Stokes vectors with shape `(rows, cols, 3)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid<StokesVec>"))]
pub struct StokesImage {
    rows: usize,
    cols: usize,
    pixels: Vec<StokesVec>,
}

impl StokesImage {
    pub(crate) fn new(rows: usize, cols: usize, pixels: Vec<StokesVec>) -> Self {
        debug_assert_eq!(rows * cols, pixels.len());
        Self { rows, cols, pixels }
    }

    /// Create a Stokes image from an interleaved `(rows, cols, channels)` buffer.
    ///
    /// Each pixel contributes `channels` consecutive values in S_0, S_1, S_2 order.
    /// Fails unless `channels` is 3 and the buffer holds exactly `rows * cols` pixels.
    pub fn from_interleaved(
        rows: usize,
        cols: usize,
        channels: usize,
        data: &[f64],
    ) -> Result<Self> {
        if channels != 3 {
            return Err(Error::ChannelCount { got: channels });
        }
        check_len(&[rows, cols, channels], data.len())?;

        let pixels = data
            .par_chunks_exact(3)
            .map(|sv| StokesVec::new(sv[0], sv[1], sv[2]))
            .collect();

        Ok(Self::new(rows, cols, pixels))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the shape as `(rows, cols, 3)`.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.rows, self.cols, 3)
    }

    /// Returns a reference to a Stokes vector if `(row, col)` is within the image,
    /// otherwise returns None.
    pub fn get(&self, row: usize, col: usize) -> Option<&StokesVec> {
        let i = index((self.rows, self.cols), row, col)?;
        self.pixels.get(i)
    }

    pub fn as_slice(&self) -> &[StokesVec] {
        self.pixels.as_slice()
    }

    /// Copies a single Stokes parameter out into its own plane.
    pub fn plane(&self, channel: StokesChannel) -> Plane {
        let offset = channel.offset();
        let pixels = self
            .pixels
            .par_iter()
            .map(|sv| sv.as_array()[offset])
            .collect();

        Plane::new(self.rows, self.cols, pixels)
    }

    /// Flattens the image into an interleaved `(rows, cols, 3)` buffer.
    pub fn to_interleaved(&self) -> Vec<f64> {
        self.pixels.iter().flat_map(|sv| *sv.as_array()).collect()
    }
}

fn index(dims: (usize, usize), row: usize, col: usize) -> Option<usize> {
    if row >= dims.0 || col >= dims.1 {
        return None;
    }

    row.checked_mul(dims.1)?.checked_add(col)
}

/// Unvalidated wire form of a grid; shapes are checked on the way in.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawGrid<T> {
    rows: usize,
    cols: usize,
    pixels: Vec<T>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid<f64>> for IntensityImage {
    type Error = Error;

    fn try_from(raw: RawGrid<f64>) -> Result<Self> {
        Self::from_vec(raw.rows, raw.cols, raw.pixels)
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid<f64>> for Plane {
    type Error = Error;

    fn try_from(raw: RawGrid<f64>) -> Result<Self> {
        check_len(&[raw.rows, raw.cols], raw.pixels.len())?;
        Ok(Self::new(raw.rows, raw.cols, raw.pixels))
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid<StokesVec>> for StokesImage {
    type Error = Error;

    fn try_from(raw: RawGrid<StokesVec>) -> Result<Self> {
        check_len(&[raw.rows, raw.cols], raw.pixels.len())?;
        Ok(Self::new(raw.rows, raw.cols, raw.pixels))
    }
}
