//! Numeric core turning a height-fluctuation power spectrum into a real-space
//! height-height correlation function.

/// Crate version recorded in run provenance.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod accuracy;
pub mod field;
pub mod grid;
pub mod hash;
pub mod normalization;
pub mod params;
pub mod pipeline;
pub mod reference;
pub mod serde;
pub mod spectrum;
pub mod transform;

pub use accuracy::{accuracy_report, AccuracyReport, AccuracyWindow};
pub use field::Field;
pub use grid::{build_grids, AxisSpacing, Dimensionality, Grid, Grids};
pub use hash::stable_hash_string;
pub use normalization::FtNormalization;
pub use params::{derive_parameters, DerivedParameters, PhysicalParameters, RawParameters};
pub use pipeline::{execute, run, RunOutputs, RunSink};
pub use reference::{bessel_k0, reference_correlation, reference_field};
pub use crate::serde::{from_json_slice, from_yaml_slice, to_canonical_json_bytes};
pub use spectrum::{BaseSpectrum, SpectralDensity, SpectrumInputs, SpectrumModel};
pub use transform::{
    irfft, irfft2, rfft, rfft2, FftScaling, InverseTransform, Real1dInverse, Real2dInverse,
    TransformMethod,
};
