//! Sampling grids for wavevectors (log-uniform) and distances (linear-uniform).

use hhcf_core::errors::{ErrorInfo, HhcfError};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::params::{DerivedParameters, MIN_RESOLUTION};

/// Number of spatial dimensions sampled by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimensionality {
    /// A single axis.
    #[serde(rename = "1d")]
    One,
    /// The outer product of an axis with itself.
    #[serde(rename = "2d")]
    Two,
}

/// How samples are distributed along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSpacing {
    /// Equal steps in log10 space.
    Logarithmic,
    /// Equal steps.
    Linear,
}

/// A strictly increasing axis, optionally expanded to a planar grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    axis: Array1<f64>,
    spacing: AxisSpacing,
    dimensionality: Dimensionality,
}

fn check_request(min: f64, max: f64, resolution: usize) -> Result<(), HhcfError> {
    if resolution < MIN_RESOLUTION {
        return Err(HhcfError::invalid_parameter(
            "resolution",
            resolution,
            format!("grids need at least {MIN_RESOLUTION} samples"),
        ));
    }
    // A zero lower bound would sample r = 0, where the reference correlation diverges.
    if !(min.is_finite() && max.is_finite() && 0.0 < min && min < max) {
        return Err(HhcfError::InvalidParameter(
            ErrorInfo::new("invalid-grid-bounds", "grid bounds must satisfy 0 < min < max")
                .with_context("min", min.to_string())
                .with_context("max", max.to_string()),
        ));
    }
    Ok(())
}

impl Grid {
    /// `resolution` samples equally spaced in log10 between `min` and `max`.
    pub fn logarithmic(
        min: f64,
        max: f64,
        resolution: usize,
        dimensionality: Dimensionality,
    ) -> Result<Self, HhcfError> {
        check_request(min, max, resolution)?;
        let lo = min.log10();
        let hi = max.log10();
        let step = (hi - lo) / (resolution - 1) as f64;
        let mut axis = Array1::from_shape_fn(resolution, |i| 10f64.powf(lo + step * i as f64));
        axis[0] = min;
        axis[resolution - 1] = max;
        Self::from_axis(axis, AxisSpacing::Logarithmic, dimensionality)
    }

    /// `resolution` samples equally spaced between `min` and `max`.
    pub fn linear(
        min: f64,
        max: f64,
        resolution: usize,
        dimensionality: Dimensionality,
    ) -> Result<Self, HhcfError> {
        check_request(min, max, resolution)?;
        let step = (max - min) / (resolution - 1) as f64;
        let mut axis = Array1::from_shape_fn(resolution, |i| min + step * i as f64);
        axis[resolution - 1] = max;
        Self::from_axis(axis, AxisSpacing::Linear, dimensionality)
    }

    fn from_axis(
        axis: Array1<f64>,
        spacing: AxisSpacing,
        dimensionality: Dimensionality,
    ) -> Result<Self, HhcfError> {
        let increasing = axis.windows(2).into_iter().all(|pair| pair[0] < pair[1]);
        if !increasing {
            return Err(HhcfError::Numerical(
                ErrorInfo::new(
                    "non-monotonic-grid",
                    "grid collapsed: bounds too close for the requested resolution",
                )
                .with_context("spacing", format!("{spacing:?}"))
                .with_context("resolution", axis.len().to_string()),
            ));
        }
        Ok(Self {
            axis,
            spacing,
            dimensionality,
        })
    }

    /// The 1D axis the grid is built from.
    pub fn axis(&self) -> &Array1<f64> {
        &self.axis
    }

    /// Sample distribution along the axis.
    pub fn spacing(&self) -> AxisSpacing {
        self.spacing
    }

    /// Number of sampled dimensions.
    pub fn dimensionality(&self) -> Dimensionality {
        self.dimensionality
    }

    /// Number of samples along each axis.
    pub fn resolution(&self) -> usize {
        self.axis.len()
    }

    /// Planar component arrays with `x[i, j] = axis[j]` and `y[i, j] = axis[i]`.
    pub fn components(&self) -> (Array2<f64>, Array2<f64>) {
        let n = self.axis.len();
        let x = Array2::from_shape_fn((n, n), |(_, j)| self.axis[j]);
        let y = Array2::from_shape_fn((n, n), |(i, _)| self.axis[i]);
        (x, y)
    }

    /// Scalar magnitude at every grid point: the axis itself in 1D, the
    /// Euclidean norm of the two components in 2D.
    pub fn magnitudes(&self) -> Field {
        match self.dimensionality {
            Dimensionality::One => Field::OneD(self.axis.clone()),
            Dimensionality::Two => {
                let n = self.axis.len();
                Field::TwoD(Array2::from_shape_fn((n, n), |(i, j)| {
                    self.axis[j].hypot(self.axis[i])
                }))
            }
        }
    }
}

/// The wavevector and distance grids of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Grids {
    /// Log-uniform wavevector grid.
    pub frequency: Grid,
    /// Linear-uniform distance grid.
    pub distance: Grid,
}

/// Builds both grids from the derived scales.
pub fn build_grids(
    derived: &DerivedParameters,
    resolution: usize,
    dimensionality: Dimensionality,
) -> Result<Grids, HhcfError> {
    let frequency = Grid::logarithmic(
        derived.min_frequency,
        derived.max_frequency,
        resolution,
        dimensionality,
    )?;
    let distance = Grid::linear(
        derived.min_distance,
        derived.max_distance,
        resolution,
        dimensionality,
    )?;
    Ok(Grids {
        frequency,
        distance,
    })
}
