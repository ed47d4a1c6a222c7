use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("expected {expected} intensity images but got: {got}")]
    ImageCount { expected: usize, got: usize },
    #[error("expected image of shape {expected:?} but got: {got:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("expected buffer of length {expected} but got: {got}")]
    BufferLength { expected: usize, got: usize },
    #[error("shape {shape:?} holds more elements than fit in memory")]
    ShapeOverflow { shape: Vec<usize> },
    #[error("expected 3 stokes channels but got: {got}")]
    ChannelCount { got: usize },
    #[error("expected finite positive epsilon but got: {epsilon}")]
    InvalidEpsilon { epsilon: f64 },
}

impl Error {
    /// Returns `true` if the error was caused by malformed caller input.
    ///
    /// Every variant currently is; configuration errors count as input too.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Error::ImageCount { .. }
            | Error::ShapeMismatch { .. }
            | Error::BufferLength { .. }
            | Error::ShapeOverflow { .. }
            | Error::ChannelCount { .. }
            | Error::InvalidEpsilon { .. } => true,
        }
    }
}

/// Returns an error if `got` does not match `expected`.
pub(crate) fn check_shape(expected: (usize, usize), got: (usize, usize)) -> Result<()> {
    if expected != got {
        return Err(Error::ShapeMismatch { expected, got });
    }

    Ok(())
}

/// Returns an error unless a buffer of length `got` exactly fills `shape`.
pub(crate) fn check_len(shape: &[usize], got: usize) -> Result<()> {
    let expected = shape
        .iter()
        .try_fold(1usize, |len, &dim| len.checked_mul(dim))
        .ok_or_else(|| Error::ShapeOverflow {
            shape: shape.to_vec(),
        })?;

    if expected != got {
        return Err(Error::BufferLength { expected, got });
    }

    Ok(())
}
