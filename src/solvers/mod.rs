pub mod euler;
pub mod noise;
pub mod runge_kutta;

pub use euler::Euler;
pub use noise::NoiseSampler;
pub use runge_kutta::RungeKutta;

use std::fmt;

/// Deterministic integration scheme paired with the exact stochastic step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum IntegrationMethod {
    Euler,
    #[default]
    RungeKutta,
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationMethod::Euler => write!(f, "Euler"),
            IntegrationMethod::RungeKutta => write!(f, "Runge-Kutta"),
        }
    }
}
