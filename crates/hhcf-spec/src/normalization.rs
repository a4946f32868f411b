//! Normalization factors reconciling the discrete inverse transform with the
//! continuum 2D Fourier integral.

use std::fmt;
use std::str::FromStr;

use hhcf_core::constants::TWO_PI;
use hhcf_core::errors::{ErrorInfo, HhcfError};
use serde::{Deserialize, Serialize};

use crate::transform::FftScaling;

/// Where the continuum normalization is assumed to have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FtNormalization {
    /// Split evenly between forward and inverse: `√area / 2π`.
    Symmetric,
    /// Folded entirely into the forward transform of the spectrum: `1`.
    AsymmetricFt,
    /// Supplied entirely at the inverse step: `area / (2π)²`.
    AsymmetricIft,
}

impl FtNormalization {
    /// Every accepted tag.
    pub const IDENTIFIERS: &'static [&'static str] =
        &["symmetric", "asymmetric_ft", "asymmetric_ift"];

    /// Configuration tag of the convention.
    pub fn identifier(&self) -> &'static str {
        match self {
            FtNormalization::Symmetric => "symmetric",
            FtNormalization::AsymmetricFt => "asymmetric_ft",
            FtNormalization::AsymmetricIft => "asymmetric_ift",
        }
    }

    /// Scalar applied to the inverse-transform output for a patch of `area`.
    pub fn factor(&self, area: f64) -> f64 {
        match self {
            FtNormalization::Symmetric => area.sqrt() / TWO_PI,
            FtNormalization::AsymmetricFt => 1.0,
            FtNormalization::AsymmetricIft => area / (TWO_PI * TWO_PI),
        }
    }

    /// Like [`FtNormalization::factor`], but refuses transforms whose internal
    /// scaling differs from the backward convention the factors assume.
    pub fn factor_for(&self, area: f64, scaling: FftScaling) -> Result<f64, HhcfError> {
        match scaling {
            FftScaling::Backward => Ok(self.factor(area)),
            other => Err(HhcfError::Configuration(
                ErrorInfo::new(
                    "scaling-mismatch",
                    "normalization factors are defined for backward-scaled transforms only",
                )
                .with_context("normalization", self.identifier())
                .with_context("scaling", format!("{other:?}")),
            )),
        }
    }
}

impl FromStr for FtNormalization {
    type Err = HhcfError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "symmetric" => Ok(FtNormalization::Symmetric),
            "asymmetric_ft" => Ok(FtNormalization::AsymmetricFt),
            "asymmetric_ift" => Ok(FtNormalization::AsymmetricIft),
            other => Err(HhcfError::unknown_identifier(
                "normalization",
                other,
                Self::IDENTIFIERS,
            )),
        }
    }
}

impl fmt::Display for FtNormalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
