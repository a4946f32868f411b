//! Physical constants in SI units.

use std::f64::consts::PI;

/// Boltzmann constant in J/K (exact since the 2019 SI redefinition).
pub const BOLTZMANN: f64 = 1.380649e-23;

/// Standard acceleration of gravity in m/s².
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// 2π, the angular factor of continuum Fourier conventions.
pub const TWO_PI: f64 = 2.0 * PI;
