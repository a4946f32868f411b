//! Closed-form correlation function used as an accuracy oracle.
//!
//! `C(r) = k_B T / (2π σ) · (K₀(r q_c) − K₀(r q_κ))` with `q_c` the capillary
//! and `q_κ` the curvature frequency. Each K₀ term diverges logarithmically at
//! the origin, so `r = 0` is never a valid sample.

use hhcf_core::constants::{BOLTZMANN, TWO_PI};
use hhcf_core::errors::{ErrorInfo, HhcfError};

use crate::field::Field;
use crate::grid::Grid;
use crate::params::{DerivedParameters, PhysicalParameters};

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Modified Bessel function of the second kind, order zero.
///
/// Uses the ascending series for `x ≤ 2` and the Abramowitz & Stegun 9.8.6
/// polynomial above it (relative error below 2e-7). Returns `+∞` at zero and
/// NaN for negative or NaN arguments; underflows to zero for large `x`.
pub fn bessel_k0(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return f64::INFINITY;
    }
    if x <= 2.0 {
        // K₀(x) = -(ln(x/2) + γ) I₀(x) + Σ_{k≥1} (x²/4)^k / (k!)² · H_k
        let q = 0.25 * x * x;
        let mut term = 1.0;
        let mut harmonic = 0.0;
        let mut i0 = 1.0;
        let mut tail = 0.0;
        for k in 1..64 {
            let kf = k as f64;
            term *= q / (kf * kf);
            harmonic += 1.0 / kf;
            i0 += term;
            tail += term * harmonic;
            if term < 1e-17 * i0 {
                break;
            }
        }
        -((0.5 * x).ln() + EULER_GAMMA) * i0 + tail
    } else {
        let t = 2.0 / x;
        let poly = 1.253_314_14
            + t * (-0.078_323_58
                + t * (0.021_895_68
                    + t * (-0.010_624_46
                        + t * (0.005_878_72 + t * (-0.002_515_40 + t * 0.000_532_08)))));
        (-x).exp() / x.sqrt() * poly
    }
}

/// Reference correlation at a single distance `r > 0`.
pub fn reference_correlation(
    distance: f64,
    temperature: f64,
    surface_tension: f64,
    derived: &DerivedParameters,
) -> Result<f64, HhcfError> {
    if !(distance.is_finite() && distance > 0.0) {
        return Err(HhcfError::invalid_parameter(
            "distance",
            distance,
            "reference correlation is only defined for r > 0",
        ));
    }
    let prefactor = BOLTZMANN * temperature / (TWO_PI * surface_tension);
    let value = prefactor
        * (bessel_k0(distance * derived.capillary_frequency)
            - bessel_k0(distance * derived.curvature_frequency));
    if !value.is_finite() {
        return Err(HhcfError::Numerical(
            ErrorInfo::new("non-finite", "reference correlation is not finite")
                .with_context("distance", distance.to_string()),
        ));
    }
    Ok(value)
}

/// Reference correlation over a distance grid (Euclidean norm in 2D).
pub fn reference_field(
    distance: &Grid,
    params: &PhysicalParameters,
    derived: &DerivedParameters,
) -> Result<Field, HhcfError> {
    distance.magnitudes().try_map(|r| {
        reference_correlation(r, params.temperature, params.surface_tension, derived)
    })
}
