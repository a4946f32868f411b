//! Relative-error comparison of a computed correlation against the reference.

use hhcf_core::errors::{ErrorInfo, HhcfError};
use serde::{Deserialize, Serialize};

use crate::field::Field;

/// Tolerance on the maximum relative error used by accuracy runs.
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Half-open index range `[start, end)` applied to every grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccuracyWindow {
    /// First index inside the window.
    pub start: usize,
    /// One past the last index inside the window.
    pub end: usize,
}

impl AccuracyWindow {
    /// The middle 80% of an axis of `resolution` samples.
    pub fn middle(resolution: usize) -> Self {
        Self {
            start: resolution / 10,
            end: (9 * resolution + 9) / 10,
        }
    }

    /// Whether `index` lies inside the window.
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

/// Summary of the agreement between computed and reference correlations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Window applied to each axis.
    pub window: AccuracyWindow,
    /// Cells compared.
    pub compared: usize,
    /// Cells skipped because the reference is zero or subnormal.
    pub degenerate: usize,
    /// Largest relative error, if any cell was compared.
    pub max_relative_error: Option<f64>,
    /// Mean relative error, if any cell was compared.
    pub mean_relative_error: Option<f64>,
    /// Threshold on the maximum relative error.
    pub tolerance: f64,
    /// True when at least one cell was compared and all are within tolerance.
    pub within_tolerance: bool,
}

fn in_window(window: &AccuracyWindow, field: &Field, flat: usize) -> bool {
    match field {
        Field::OneD(_) => window.contains(flat),
        Field::TwoD(values) => {
            let cols = values.ncols();
            window.contains(flat / cols) && window.contains(flat % cols)
        }
    }
}

/// Compares `computed` against `reference` over the middle 80% of each axis.
pub fn accuracy_report(
    computed: &Field,
    reference: &Field,
    tolerance: f64,
) -> Result<AccuracyReport, HhcfError> {
    if computed.shape() != reference.shape() {
        return Err(HhcfError::Numerical(
            ErrorInfo::new("shape-mismatch", "computed and reference fields differ in shape")
                .with_context("computed", format!("{:?}", computed.shape()))
                .with_context("reference", format!("{:?}", reference.shape())),
        ));
    }
    let resolution = reference.shape().first().copied().unwrap_or(0);
    let window = AccuracyWindow::middle(resolution);

    let mut compared = 0usize;
    let mut degenerate = 0usize;
    let mut max_err = 0.0f64;
    let mut sum_err = 0.0f64;
    for (flat, (value, expected)) in computed.iter().zip(reference.iter()).enumerate() {
        if !in_window(&window, reference, flat) {
            continue;
        }
        if !expected.is_normal() {
            degenerate += 1;
            continue;
        }
        let rel = ((value - expected) / expected).abs();
        compared += 1;
        sum_err += rel;
        max_err = max_err.max(rel);
    }

    let (max_relative_error, mean_relative_error) = if compared > 0 {
        (Some(max_err), Some(sum_err / compared as f64))
    } else {
        (None, None)
    };
    Ok(AccuracyReport {
        window,
        compared,
        degenerate,
        max_relative_error,
        mean_relative_error,
        tolerance,
        within_tolerance: compared > 0 && max_err <= tolerance,
    })
}
