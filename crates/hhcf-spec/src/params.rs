//! Input parameters, their load-time validation and the derived characteristic scales.

use std::str::FromStr;

use hhcf_core::errors::{ErrorInfo, HhcfError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::Dimensionality;
use crate::normalization::FtNormalization;
use crate::serde::{from_json_slice, from_yaml_slice};
use crate::spectrum::SpectrumModel;
use crate::transform::TransformMethod;

/// Lower edge of the frequency window, relative to the curvature frequency.
pub const MIN_FREQUENCY_RATIO: f64 = 1e-13;

/// Upper edge of the frequency window, relative to the curvature frequency.
pub const MAX_FREQUENCY_RATIO: f64 = 10.0;

/// Smallest grid size accepted by the grid builder.
pub const MIN_RESOLUTION: usize = 2;

fn default_ft_normalization() -> String {
    "symmetric".to_string()
}

fn default_spectrum_function() -> String {
    "base_spectrum".to_string()
}

fn default_transform_method() -> String {
    "inverse_fft".to_string()
}

/// Parameters as they appear in a configuration file, before identifiers are resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawParameters {
    /// Temperature in kelvin.
    pub temperature: f64,
    /// Volumic mass (density) in kg/m³.
    pub volumic_mass: f64,
    /// Surface tension in N/m.
    pub surface_tension: f64,
    /// Bending rigidity in J.
    pub kappa: f64,
    /// Area of the sampled interface patch in m².
    pub area: f64,
    /// Number of samples per grid axis.
    pub resolution: usize,
    /// Whether to evaluate the analytic reference and the accuracy report.
    #[serde(default)]
    pub is_accuracy_test: bool,
    /// Normalization convention tag.
    #[serde(default = "default_ft_normalization")]
    pub ft_normalization: String,
    /// Spectrum model identifier.
    #[serde(default = "default_spectrum_function")]
    pub spectrum_function: String,
    /// Inverse transform identifier.
    #[serde(default = "default_transform_method")]
    pub inverse_fourier_transform_method: String,
}

/// Validated, fully resolved input of a single run.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PhysicalParameters {
    /// Temperature in kelvin.
    pub temperature: f64,
    /// Volumic mass (density) in kg/m³.
    pub volumic_mass: f64,
    /// Surface tension in N/m.
    pub surface_tension: f64,
    /// Bending rigidity in J.
    pub kappa: f64,
    /// Area of the sampled interface patch in m².
    pub area: f64,
    /// Number of samples per grid axis.
    pub resolution: usize,
    /// Whether to evaluate the analytic reference and the accuracy report.
    pub is_accuracy_test: bool,
    /// Normalization convention.
    pub ft_normalization: FtNormalization,
    /// Spectrum model.
    pub spectrum_function: SpectrumModel,
    /// Inverse transform variant.
    pub inverse_fourier_transform_method: TransformMethod,
}

fn require_positive(name: &str, value: f64) -> Result<(), HhcfError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HhcfError::invalid_parameter(
            name,
            value,
            format!("{name} must be a finite, strictly positive number"),
        ))
    }
}

impl TryFrom<RawParameters> for PhysicalParameters {
    type Error = HhcfError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        // Identifiers first: an unknown model must be reported before any range check.
        let spectrum_function = SpectrumModel::from_str(&raw.spectrum_function)?;
        let inverse_fourier_transform_method =
            TransformMethod::from_str(&raw.inverse_fourier_transform_method)?;
        let ft_normalization = FtNormalization::from_str(&raw.ft_normalization)?;

        require_positive("temperature", raw.temperature)?;
        require_positive("volumic_mass", raw.volumic_mass)?;
        require_positive("surface_tension", raw.surface_tension)?;
        require_positive("kappa", raw.kappa)?;
        require_positive("area", raw.area)?;
        if raw.resolution < MIN_RESOLUTION {
            return Err(HhcfError::invalid_parameter(
                "resolution",
                raw.resolution,
                format!("resolution must be at least {MIN_RESOLUTION}"),
            ));
        }

        Ok(Self {
            temperature: raw.temperature,
            volumic_mass: raw.volumic_mass,
            surface_tension: raw.surface_tension,
            kappa: raw.kappa,
            area: raw.area,
            resolution: raw.resolution,
            is_accuracy_test: raw.is_accuracy_test,
            ft_normalization,
            spectrum_function,
            inverse_fourier_transform_method,
        })
    }
}

impl PhysicalParameters {
    /// Parses and validates a JSON configuration payload.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, HhcfError> {
        let raw: RawParameters = from_json_slice(data)?;
        Self::try_from(raw)
    }

    /// Parses and validates a YAML configuration payload.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, HhcfError> {
        let raw: RawParameters = from_yaml_slice(data)?;
        Self::try_from(raw)
    }

    /// Grid dimensionality implied by the selected transform.
    pub fn dimensionality(&self) -> Dimensionality {
        self.inverse_fourier_transform_method.dimensionality()
    }

    /// Name of the calculation, `<spectrum>_<transform>`, used to key persisted runs.
    pub fn calculation_name(&self) -> String {
        format!(
            "{}_{}",
            self.spectrum_function.identifier(),
            self.inverse_fourier_transform_method.identifier()
        )
    }
}

/// Characteristic wavevectors and distances derived from the physical constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DerivedParameters {
    /// √(volumic_mass / surface_tension).
    pub capillary_frequency: f64,
    /// √(surface_tension / kappa).
    pub curvature_frequency: f64,
    /// Lower edge of the wavevector grid.
    pub min_frequency: f64,
    /// Upper edge of the wavevector grid.
    pub max_frequency: f64,
    /// Lower edge of the distance grid, `1 / max_frequency`.
    pub min_distance: f64,
    /// Upper edge of the distance grid, `1 / min_frequency`.
    pub max_distance: f64,
}

impl DerivedParameters {
    /// Derives the characteristic scales from raw constants.
    ///
    /// `volumic_mass` may be zero (the capillary frequency then vanishes);
    /// `surface_tension` and `kappa` must be strictly positive.
    pub fn from_constants(
        volumic_mass: f64,
        surface_tension: f64,
        kappa: f64,
    ) -> Result<Self, HhcfError> {
        if !(surface_tension.is_finite() && surface_tension > 0.0) {
            return Err(HhcfError::invalid_parameter(
                "surface_tension",
                surface_tension,
                "surface_tension must be strictly positive",
            ));
        }
        if !(kappa.is_finite() && kappa > 0.0) {
            return Err(HhcfError::invalid_parameter(
                "kappa",
                kappa,
                "kappa must be strictly positive",
            ));
        }
        if !(volumic_mass.is_finite() && volumic_mass >= 0.0) {
            return Err(HhcfError::invalid_parameter(
                "volumic_mass",
                volumic_mass,
                "volumic_mass must not be negative",
            ));
        }

        let capillary_frequency = (volumic_mass / surface_tension).sqrt();
        let curvature_frequency = (surface_tension / kappa).sqrt();
        let min_frequency = curvature_frequency * MIN_FREQUENCY_RATIO;
        let max_frequency = curvature_frequency * MAX_FREQUENCY_RATIO;
        let derived = Self {
            capillary_frequency,
            curvature_frequency,
            min_frequency,
            max_frequency,
            min_distance: 1.0 / max_frequency,
            max_distance: 1.0 / min_frequency,
        };
        derived.check_bounds()?;
        Ok(derived)
    }

    fn check_bounds(&self) -> Result<(), HhcfError> {
        let ordered = |lo: f64, hi: f64| lo.is_finite() && hi.is_finite() && 0.0 < lo && lo < hi;
        if ordered(self.min_frequency, self.max_frequency)
            && ordered(self.min_distance, self.max_distance)
        {
            return Ok(());
        }
        Err(HhcfError::Numerical(
            ErrorInfo::new(
                "degenerate-scales",
                "derived frequency or distance window is empty or not finite",
            )
            .with_context("min_frequency", self.min_frequency.to_string())
            .with_context("max_frequency", self.max_frequency.to_string())
            .with_context("min_distance", self.min_distance.to_string())
            .with_context("max_distance", self.max_distance.to_string()),
        ))
    }
}

/// Derives the characteristic scales of a validated parameter set.
pub fn derive_parameters(params: &PhysicalParameters) -> Result<DerivedParameters, HhcfError> {
    let derived =
        DerivedParameters::from_constants(params.volumic_mass, params.surface_tension, params.kappa)?;
    debug!(
        capillary_frequency = derived.capillary_frequency,
        curvature_frequency = derived.curvature_frequency,
        "derived characteristic scales"
    );
    Ok(derived)
}
