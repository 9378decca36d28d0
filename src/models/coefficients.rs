// src/models/coefficients.rs
//! Coefficients of the Directed-Percolation Langevin Equation
//!
//! ```text
//! ∂ρ/∂t = aρ - bρ² + D∇²ρ + γ√ρ η(x,t)
//! ```
//!
//! Where:
//! - `a`: linear growth coefficient (`linear`)
//! - `b`: quadratic saturation coefficient (`quadratic`)
//! - `D`: diffusion rate (`diffusion`)
//! - `γ`: multiplicative noise amplitude (`noise`)
//! - `η`: Gaussian white noise
//!
//! The linear and noise terms are integrated exactly by the stochastic step;
//! the quadratic and diffusion terms form the deterministic drift.

use crate::error::{validation::*, LangevinResult};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    pub linear: f64,
    pub quadratic: f64,
    pub diffusion: f64,
    pub noise: f64,
}

impl Coefficients {
    pub fn new(linear: f64, quadratic: f64, diffusion: f64, noise: f64) -> Self {
        Coefficients {
            linear,
            quadratic,
            diffusion,
            noise,
        }
    }

    pub fn validate(&self) -> LangevinResult<()> {
        validate_finite("linear", self.linear)?;
        validate_finite("quadratic", self.quadratic)?;
        validate_non_negative("quadratic", self.quadratic)?;
        validate_finite("diffusion", self.diffusion)?;
        validate_non_negative("diffusion", self.diffusion)?;
        validate_finite("noise", self.noise)?;
        validate_positive("noise", self.noise)
    }

    /// Homogeneous active-state density a/b of the noiseless equation,
    /// or 0 when only the absorbing state is stable.
    pub fn mean_field_fixed_point(&self) -> f64 {
        if self.linear > 0.0 && self.quadratic > 0.0 {
            self.linear / self.quadratic
        } else {
            0.0
        }
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Coefficients {
            linear: 1.0,
            quadratic: 2.0,
            diffusion: 0.1,
            noise: 1.0,
        }
    }
}
