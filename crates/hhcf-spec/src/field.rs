//! Real-valued sampled fields in one or two dimensions.

use hhcf_core::errors::{ErrorInfo, HhcfError};
use ndarray::{s, Array1, Array2};

use crate::grid::Dimensionality;

/// A real field aligned with a [`crate::grid::Grid`].
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Samples along a single axis.
    OneD(Array1<f64>),
    /// Samples on a planar grid, row index first.
    TwoD(Array2<f64>),
}

impl Field {
    /// Dimensionality of the field.
    pub fn dimensionality(&self) -> Dimensionality {
        match self {
            Field::OneD(_) => Dimensionality::One,
            Field::TwoD(_) => Dimensionality::Two,
        }
    }

    /// Shape of the underlying array.
    pub fn shape(&self) -> &[usize] {
        match self {
            Field::OneD(values) => values.shape(),
            Field::TwoD(values) => values.shape(),
        }
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        match self {
            Field::OneD(values) => values.len(),
            Field::TwoD(values) => values.len(),
        }
    }

    /// Whether the field holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the samples in row-major order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            Field::OneD(values) => Box::new(values.iter().copied()),
            Field::TwoD(values) => Box::new(values.iter().copied()),
        }
    }

    /// Returns the field multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Field {
        match self {
            Field::OneD(values) => Field::OneD(values * factor),
            Field::TwoD(values) => Field::TwoD(values * factor),
        }
    }

    /// Applies a fallible element-wise map, preserving the shape.
    pub fn try_map<F>(&self, mut f: F) -> Result<Field, HhcfError>
    where
        F: FnMut(f64) -> Result<f64, HhcfError>,
    {
        let mut out = self.clone();
        match &mut out {
            Field::OneD(values) => {
                for value in values.iter_mut() {
                    *value = f(*value)?;
                }
            }
            Field::TwoD(values) => {
                for value in values.iter_mut() {
                    *value = f(*value)?;
                }
            }
        }
        Ok(out)
    }

    /// Keeps the leading `len` samples along every axis.
    ///
    /// Used to align a transform output with the distance grid.
    pub fn leading_block(&self, len: usize) -> Result<Field, HhcfError> {
        let too_small = self.shape().iter().any(|&extent| extent < len);
        if too_small {
            return Err(HhcfError::Numerical(
                ErrorInfo::new(
                    "shape-mismatch",
                    "field is smaller than the requested block",
                )
                .with_context("shape", format!("{:?}", self.shape()))
                .with_context("block", len.to_string()),
            ));
        }
        Ok(match self {
            Field::OneD(values) => Field::OneD(values.slice(s![..len]).to_owned()),
            Field::TwoD(values) => Field::TwoD(values.slice(s![..len, ..len]).to_owned()),
        })
    }

    /// Fails with a numerical error if any sample is NaN or infinite.
    pub fn ensure_finite(&self, what: &str) -> Result<(), HhcfError> {
        match self.iter().position(|value| !value.is_finite()) {
            None => Ok(()),
            Some(index) => Err(HhcfError::Numerical(
                ErrorInfo::new("non-finite", format!("{what} contains non-finite values"))
                    .with_context("field", what)
                    .with_context("flat_index", index.to_string()),
            )),
        }
    }
}
