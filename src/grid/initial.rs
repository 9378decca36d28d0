// src/grid/initial.rs
//! Initial Conditions for the Density Field

use super::GridShape;
use crate::error::{validation::*, LangevinError, LangevinResult};
use crate::rng;
use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InitialCondition {
    /// Independent uniform draws on `[min, max]`
    RandomUniform { min: f64, max: f64 },
    /// Independent Gaussian draws, clamped at zero
    RandomGaussian { mean: f64, std_dev: f64 },
    /// Same density everywhere
    ConstantValue(f64),
    /// Zero everywhere except cell `(x, y)`
    SingleSeed { value: f64, x: usize, y: usize },
}

impl fmt::Display for InitialCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitialCondition::RandomUniform { min, max } => {
                write!(f, "uniform random values in [{}, {}]", min, max)
            }
            InitialCondition::RandomGaussian { mean, std_dev } => {
                write!(f, "Gaussian random values N({}, {}²)", mean, std_dev)
            }
            InitialCondition::ConstantValue(v) => write!(f, "constant value {}", v),
            InitialCondition::SingleSeed { value, x, y } => {
                write!(f, "single seed {} at ({}, {})", value, x, y)
            }
        }
    }
}

impl InitialCondition {
    pub fn validate(&self) -> LangevinResult<()> {
        match *self {
            InitialCondition::RandomUniform { min, max } => {
                validate_finite("ic min", min)?;
                validate_finite("ic max", max)?;
                validate_non_negative("ic min", min)?;
                if max < min {
                    return Err(LangevinError::InvalidParameters {
                        parameter: "ic max".to_string(),
                        value: max,
                        constraint: format!("must be ≥ ic min ({})", min),
                    });
                }
                Ok(())
            }
            InitialCondition::RandomGaussian { mean, std_dev } => {
                validate_finite("ic mean", mean)?;
                validate_finite("ic std_dev", std_dev)?;
                validate_non_negative("ic std_dev", std_dev)
            }
            InitialCondition::ConstantValue(value) | InitialCondition::SingleSeed { value, .. } => {
                validate_finite("ic value", value)?;
                validate_non_negative("ic value", value)
            }
        }
    }

    /// Overwrite `density` with this initial condition
    pub fn apply<R: Rng + ?Sized>(
        &self,
        density: &mut Array1<f64>,
        shape: &GridShape,
        rng: &mut R,
    ) -> LangevinResult<()> {
        self.validate()?;
        validate_buffer_len("density", density.len(), shape.n_cells())?;

        match *self {
            InitialCondition::RandomUniform { min, max } => {
                let uniform = Uniform::new_inclusive(min, max);
                density.iter_mut().for_each(|rho| *rho = uniform.sample(rng));
            }
            InitialCondition::RandomGaussian { mean, std_dev } => {
                density
                    .iter_mut()
                    .for_each(|rho| *rho = (mean + std_dev * rng::get_normal_draw(rng)).max(0.0));
            }
            InitialCondition::ConstantValue(value) => density.fill(value),
            InitialCondition::SingleSeed { value, x, y } => {
                if x >= shape.n_x || y >= shape.n_y {
                    return Err(LangevinError::InitialCondition {
                        reason: format!(
                            "seed cell ({}, {}) lies outside the {}x{} grid",
                            x, y, shape.n_x, shape.n_y
                        ),
                    });
                }
                density.fill(0.0);
                density[shape.index(x, y)] = value;
            }
        }
        Ok(())
    }
}
