//! Per-ray polarization quantities.

pub mod dop;
pub mod stokes;
