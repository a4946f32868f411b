//! Real-valued discrete Fourier transforms in 1D and 2D.
//!
//! All transforms follow the backward convention: the forward direction is
//! unscaled and the inverse carries the whole `1/N`. Inverse transforms take a
//! packed half-spectrum (the `N/2 + 1` independent coefficients of a real
//! signal of length `N`) and return the real signal. Imaginary parts of the DC
//! and Nyquist bins are ignored, as a real signal cannot produce them.

use std::fmt;
use std::str::FromStr;

use hhcf_core::errors::{ErrorInfo, HhcfError};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::grid::Dimensionality;

/// Distribution of the `1/N` factor between forward and inverse transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FftScaling {
    /// Forward unscaled, inverse scaled by `1/N`.
    Backward,
    /// Both directions scaled by `1/√N`.
    Orthonormal,
}

fn transform_error(code: &str, message: impl Into<String>) -> HhcfError {
    HhcfError::Numerical(ErrorInfo::new(code, message))
}

fn zero() -> Complex64 {
    Complex64::new(0.0, 0.0)
}

/// Unscaled forward transform of a real signal; returns `len / 2 + 1` bins.
pub fn rfft(input: ArrayView1<'_, f64>) -> Result<Array1<Complex64>, HhcfError> {
    let mut planner = FftPlanner::new();
    rfft_with(&mut planner, input)
}

fn rfft_with(
    planner: &mut FftPlanner<f64>,
    input: ArrayView1<'_, f64>,
) -> Result<Array1<Complex64>, HhcfError> {
    let len = input.len();
    if len == 0 {
        return Err(transform_error("empty-input", "cannot transform an empty signal"));
    }
    let mut buffer: Vec<Complex64> = input.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    planner.plan_fft_forward(len).process(&mut buffer);
    buffer.truncate(len / 2 + 1);
    Ok(Array1::from(buffer))
}

/// Inverse of [`rfft`] producing `len` real samples.
///
/// Only the first `len / 2 + 1` coefficients of `input` are read; missing
/// coefficients are treated as zero.
pub fn irfft(input: ArrayView1<'_, Complex64>, len: usize) -> Result<Array1<f64>, HhcfError> {
    let mut planner = FftPlanner::new();
    irfft_with(&mut planner, input, len)
}

fn irfft_with(
    planner: &mut FftPlanner<f64>,
    input: ArrayView1<'_, Complex64>,
    len: usize,
) -> Result<Array1<f64>, HhcfError> {
    if len == 0 || input.is_empty() {
        return Err(transform_error(
            "empty-input",
            "inverse transform needs coefficients and a non-zero output length",
        ));
    }
    let half = len / 2 + 1;
    let mut buffer = vec![zero(); len];
    for (slot, value) in buffer.iter_mut().zip(input.iter()).take(half) {
        *slot = *value;
    }
    buffer[0].im = 0.0;
    if len % 2 == 0 {
        buffer[len / 2].im = 0.0;
    }
    // Hermitian completion of the negative frequencies.
    for k in 1..half {
        let mirror = len - k;
        if mirror > k {
            buffer[mirror] = buffer[k].conj();
        }
    }
    planner.plan_fft_inverse(len).process(&mut buffer);
    let scale = 1.0 / len as f64;
    Ok(buffer.iter().map(|value| value.re * scale).collect())
}

/// Unscaled 2D forward transform of a real field: real transform along rows,
/// complex transform along columns. Output shape `(rows, cols / 2 + 1)`.
pub fn rfft2(input: ArrayView2<'_, f64>) -> Result<Array2<Complex64>, HhcfError> {
    let (rows, cols) = input.dim();
    if rows == 0 || cols == 0 {
        return Err(transform_error("empty-input", "cannot transform an empty field"));
    }
    let mut planner = FftPlanner::new();
    let mut packed = Array2::from_elem((rows, cols / 2 + 1), zero());
    for (row_in, mut row_out) in input.rows().into_iter().zip(packed.rows_mut()) {
        row_out.assign(&rfft_with(&mut planner, row_in)?);
    }
    let column_fft = planner.plan_fft_forward(rows);
    for mut column in packed.columns_mut() {
        let mut buffer = column.to_vec();
        column_fft.process(&mut buffer);
        for (dst, src) in column.iter_mut().zip(buffer) {
            *dst = src;
        }
    }
    Ok(packed)
}

/// Inverse of [`rfft2`] with the output width inferred as `2 * (cols - 1)`.
pub fn irfft2(input: ArrayView2<'_, Complex64>) -> Result<Array2<f64>, HhcfError> {
    let cols = input.ncols();
    if cols < 2 {
        return Err(transform_error(
            "packed-too-narrow",
            "2D inverse needs at least two packed columns to infer its width",
        ));
    }
    irfft2_with_width(input, 2 * (cols - 1))
}

/// Inverse of [`rfft2`] producing a `(rows, width)` real field.
pub fn irfft2_with_width(
    input: ArrayView2<'_, Complex64>,
    width: usize,
) -> Result<Array2<f64>, HhcfError> {
    let rows = input.nrows();
    if rows == 0 || width == 0 {
        return Err(transform_error("empty-input", "cannot invert an empty field"));
    }
    let mut planner = FftPlanner::new();
    let mut work = input.to_owned();
    let column_ifft = planner.plan_fft_inverse(rows);
    let scale = 1.0 / rows as f64;
    for mut column in work.columns_mut() {
        let mut buffer = column.to_vec();
        column_ifft.process(&mut buffer);
        for (dst, src) in column.iter_mut().zip(buffer) {
            *dst = src * scale;
        }
    }
    let mut out = Array2::zeros((rows, width));
    for (row_in, mut row_out) in work.rows().into_iter().zip(out.rows_mut()) {
        row_out.assign(&irfft_with(&mut planner, row_in, width)?);
    }
    Ok(out)
}

/// A discrete inverse Fourier transform from a real spectral field to a real
/// spatial field.
pub trait InverseTransform: Send + Sync {
    /// Internal scaling convention; normalization factors must be derived against it.
    fn scaling(&self) -> FftScaling {
        FftScaling::Backward
    }

    /// Transforms a packed real spectrum into the spatial domain.
    fn transform(&self, spectrum: &Field) -> Result<Field, HhcfError>;
}

fn dimension_mismatch(expected: Dimensionality, found: Dimensionality) -> HhcfError {
    HhcfError::Configuration(
        ErrorInfo::new(
            "dimension-mismatch",
            "spectrum dimensionality does not match the transform",
        )
        .with_context("expected", format!("{expected:?}"))
        .with_context("found", format!("{found:?}")),
    )
}

/// 1D real inverse with an explicit output length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Real1dInverse {
    /// Number of real samples to produce.
    pub output_len: usize,
}

impl InverseTransform for Real1dInverse {
    fn transform(&self, spectrum: &Field) -> Result<Field, HhcfError> {
        match spectrum {
            Field::OneD(values) => {
                let packed = values.mapv(|v| Complex64::new(v, 0.0));
                Ok(Field::OneD(irfft(packed.view(), self.output_len)?))
            }
            other => Err(dimension_mismatch(
                Dimensionality::One,
                other.dimensionality(),
            )),
        }
    }
}

/// 2D real inverse with the output shape inferred from the packed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Real2dInverse;

impl InverseTransform for Real2dInverse {
    fn transform(&self, spectrum: &Field) -> Result<Field, HhcfError> {
        match spectrum {
            Field::TwoD(values) => {
                let packed = values.mapv(|v| Complex64::new(v, 0.0));
                Ok(Field::TwoD(irfft2(packed.view())?))
            }
            other => Err(dimension_mismatch(
                Dimensionality::Two,
                other.dimensionality(),
            )),
        }
    }
}

/// Closed registry of inverse transforms selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformMethod {
    /// [`Real1dInverse`].
    #[serde(rename = "inverse_fft_1d", alias = "irfft")]
    Real1d,
    /// [`Real2dInverse`].
    #[serde(rename = "inverse_fft", alias = "irfft2")]
    Real2d,
}

impl TransformMethod {
    /// Every accepted identifier, aliases included.
    pub const IDENTIFIERS: &'static [&'static str] =
        &["inverse_fft", "irfft2", "inverse_fft_1d", "irfft"];

    /// Canonical configuration identifier.
    pub fn identifier(&self) -> &'static str {
        match self {
            TransformMethod::Real1d => "inverse_fft_1d",
            TransformMethod::Real2d => "inverse_fft",
        }
    }

    /// Grid dimensionality the transform operates on.
    pub fn dimensionality(&self) -> Dimensionality {
        match self {
            TransformMethod::Real1d => Dimensionality::One,
            TransformMethod::Real2d => Dimensionality::Two,
        }
    }

    /// Instantiates the transform for grids of `resolution` samples per axis.
    pub fn inverse(&self, resolution: usize) -> Box<dyn InverseTransform> {
        match self {
            TransformMethod::Real1d => Box::new(Real1dInverse {
                output_len: resolution,
            }),
            TransformMethod::Real2d => Box::new(Real2dInverse),
        }
    }
}

impl FromStr for TransformMethod {
    type Err = HhcfError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "inverse_fft" | "irfft2" => Ok(TransformMethod::Real2d),
            "inverse_fft_1d" | "irfft" => Ok(TransformMethod::Real1d),
            other => Err(HhcfError::unknown_identifier(
                "inverse fourier transform method",
                other,
                Self::IDENTIFIERS,
            )),
        }
    }
}

impl fmt::Display for TransformMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn irfft_of_dc_bin_is_constant() {
        let packed = array![Complex64::new(8.0, 0.0)];
        let signal = irfft(packed.view(), 4).unwrap();
        assert_eq!(signal.len(), 4);
        for value in signal.iter() {
            assert!((value - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn irfft_ignores_imaginary_dc_and_nyquist() {
        let clean = array![
            Complex64::new(1.0, 0.0),
            Complex64::new(0.5, 0.25),
            Complex64::new(-2.0, 0.0)
        ];
        let noisy = array![
            Complex64::new(1.0, 3.0),
            Complex64::new(0.5, 0.25),
            Complex64::new(-2.0, -7.0)
        ];
        let a = irfft(clean.view(), 4).unwrap();
        let b = irfft(noisy.view(), 4).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn irfft2_infers_width_from_packed_columns() {
        let packed = Array2::from_elem((3, 5), Complex64::new(1.0, 0.0));
        let out = irfft2(packed.view()).unwrap();
        assert_eq!(out.dim(), (3, 8));
    }

    #[test]
    fn mismatched_dimensionality_is_rejected() {
        let field = Field::OneD(array![1.0, 2.0]);
        let err = Real2dInverse.transform(&field).unwrap_err();
        assert_eq!(err.info().code, "dimension-mismatch");
    }
}
