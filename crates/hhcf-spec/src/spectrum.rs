//! Spectral-density models of equilibrium height fluctuations.

use std::fmt;
use std::str::FromStr;

use hhcf_core::constants::{BOLTZMANN, STANDARD_GRAVITY};
use hhcf_core::errors::{ErrorInfo, HhcfError};
use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::params::PhysicalParameters;

/// Physical inputs of a spectral-density evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumInputs {
    /// Temperature in kelvin.
    pub temperature: f64,
    /// Volumic mass in kg/m³.
    pub volumic_mass: f64,
    /// Surface tension in N/m.
    pub surface_tension: f64,
    /// Patch area in m².
    pub area: f64,
    /// Bending rigidity in J.
    pub kappa: f64,
}

impl From<&PhysicalParameters> for SpectrumInputs {
    fn from(params: &PhysicalParameters) -> Self {
        Self {
            temperature: params.temperature,
            volumic_mass: params.volumic_mass,
            surface_tension: params.surface_tension,
            area: params.area,
            kappa: params.kappa,
        }
    }
}

/// A power spectral density of height fluctuations as a function of the
/// wavevector magnitude.
pub trait SpectralDensity: Send + Sync {
    /// Density at a single wavevector magnitude.
    fn density(&self, wavevector: f64, inputs: &SpectrumInputs) -> Result<f64, HhcfError>;

    /// Density over every sample of a magnitude field.
    fn evaluate(&self, magnitudes: &Field, inputs: &SpectrumInputs) -> Result<Field, HhcfError> {
        magnitudes.try_map(|k| self.density(k, inputs))
    }
}

/// Interface restored by gravity, surface tension and bending rigidity:
/// `S(k) = k_B T / (area (ρ g + σ k² + κ k⁴))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseSpectrum;

impl SpectralDensity for BaseSpectrum {
    fn density(&self, wavevector: f64, inputs: &SpectrumInputs) -> Result<f64, HhcfError> {
        let k2 = wavevector * wavevector;
        let denominator = inputs.volumic_mass * STANDARD_GRAVITY
            + inputs.surface_tension * k2
            + inputs.kappa * k2 * k2;
        if denominator == 0.0 {
            return Err(HhcfError::Numerical(
                ErrorInfo::new("division-by-zero", "spectral density denominator vanishes")
                    .with_context("wavevector", wavevector.to_string())
                    .with_hint("volumic_mass * g must be non-zero to evaluate k = 0"),
            ));
        }
        let value = BOLTZMANN * inputs.temperature / (inputs.area * denominator);
        if !value.is_finite() {
            return Err(HhcfError::Numerical(
                ErrorInfo::new("overflow", "spectral density is not finite")
                    .with_context("wavevector", wavevector.to_string()),
            ));
        }
        Ok(value)
    }
}

/// Closed registry of spectrum models selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectrumModel {
    /// [`BaseSpectrum`].
    #[serde(rename = "base_spectrum")]
    Base,
}

impl SpectrumModel {
    /// Every accepted identifier.
    pub const IDENTIFIERS: &'static [&'static str] = &["base_spectrum"];

    /// Configuration identifier of the model.
    pub fn identifier(&self) -> &'static str {
        match self {
            SpectrumModel::Base => "base_spectrum",
        }
    }

    /// The model implementation.
    pub fn model(&self) -> &'static dyn SpectralDensity {
        match self {
            SpectrumModel::Base => &BaseSpectrum,
        }
    }

    /// Evaluates the model over a magnitude field.
    pub fn evaluate(&self, magnitudes: &Field, inputs: &SpectrumInputs) -> Result<Field, HhcfError> {
        self.model().evaluate(magnitudes, inputs)
    }
}

impl FromStr for SpectrumModel {
    type Err = HhcfError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "base_spectrum" => Ok(SpectrumModel::Base),
            other => Err(HhcfError::unknown_identifier(
                "spectrum function",
                other,
                Self::IDENTIFIERS,
            )),
        }
    }
}

impl fmt::Display for SpectrumModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
