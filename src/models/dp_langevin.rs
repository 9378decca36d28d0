// src/models/dp_langevin.rs
//! Directed-Percolation Langevin Drift
//!
//! # Mathematical Framework
//!
//! The deterministic part left to the integrators after the linear and noise
//! terms have been split off:
//! ```text
//! f_i(ρ) = -b ρ_i² + (D/Δx²) Σ_{j ∈ N(i)} (ρ_j - ρ_i)
//! ```
//!
//! Where `N(i)` is the neighbour list from the grid wiring. The discrete
//! Laplacian only ever sees the wiring, so bounded and periodic edges need no
//! special handling here.

use super::coefficients::Coefficients;
use super::model::DriftTerm;
use crate::error::{validation::*, LangevinResult};
use crate::grid::GridWiring;
use ndarray::Array1;

#[derive(Clone, Debug)]
pub struct DpLangevin {
    quadratic: f64,
    /// D / Δx²
    diffusion_rate: f64,
    wiring: GridWiring,
}

impl DpLangevin {
    pub fn new(coefficients: &Coefficients, dx: f64, wiring: GridWiring) -> LangevinResult<Self> {
        coefficients.validate()?;
        validate_finite("dx", dx)?;
        validate_positive("dx", dx)?;

        Ok(DpLangevin {
            quadratic: coefficients.quadratic,
            diffusion_rate: coefficients.diffusion / (dx * dx),
            wiring,
        })
    }

    pub fn quadratic(&self) -> f64 {
        self.quadratic
    }

    pub fn diffusion_rate(&self) -> f64 {
        self.diffusion_rate
    }

    pub fn wiring(&self) -> &GridWiring {
        &self.wiring
    }
}

impl DriftTerm for DpLangevin {
    fn drift(&self, i_cell: usize, field: &Array1<f64>) -> f64 {
        let rho = field[i_cell];
        let neighbors = self.wiring.neighbors(i_cell);
        let neighbor_sum: f64 = neighbors.iter().map(|&j| field[j]).sum();

        let diffusion_term = self.diffusion_rate * (neighbor_sum - neighbors.len() as f64 * rho);
        let quadratic_term = -self.quadratic * rho * rho;
        diffusion_term + quadratic_term
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridShape, GridTopology};

    fn ring(n: usize, coefficients: &Coefficients, dx: f64) -> DpLangevin {
        let wiring =
            GridWiring::build(GridShape::d1(n), &[GridTopology::Periodic]).expect("Valid grid");
        DpLangevin::new(coefficients, dx, wiring).expect("Valid model")
    }

    #[test]
    fn test_uniform_field_has_no_diffusion() {
        let coefficients = Coefficients::new(1.0, 2.0, 0.1, 1.0);
        let model = ring(6, &coefficients, 0.5);
        let field = Array1::from_elem(6, 0.5);

        for i in 0..6 {
            // Only -bρ² survives: -2 * 0.25
            assert!((model.drift(i, &field) - (-0.5)).abs() < 1e-15);
        }
    }

    #[test]
    fn test_discrete_laplacian() {
        let coefficients = Coefficients::new(1.0, 0.0, 1.0, 1.0);
        let model = ring(5, &coefficients, 1.0);
        let field = Array1::from_vec(vec![0.0, 0.0, 1.0, 0.0, 0.0]);

        assert_eq!(model.drift(2, &field), -2.0);
        assert_eq!(model.drift(1, &field), 1.0);
        assert_eq!(model.drift(3, &field), 1.0);
        assert_eq!(model.drift(0, &field), 0.0);
    }

    #[test]
    fn test_diffusion_conserves_mass() {
        let coefficients = Coefficients::new(1.0, 0.0, 0.3, 1.0);
        let model = ring(8, &coefficients, 0.5);
        let field = Array1::from_vec(vec![0.1, 0.9, 0.4, 0.0, 1.3, 0.2, 0.7, 0.5]);

        let total: f64 = (0..8).map(|i| model.drift(i, &field)).sum();
        assert!(total.abs() < 1e-12, "net diffusive flux {}", total);
    }

    #[test]
    fn test_diffusion_rate_scales_with_dx() {
        let coefficients = Coefficients::new(1.0, 2.0, 0.1, 1.0);
        let model = ring(4, &coefficients, 0.5);
        assert!((model.diffusion_rate() - 0.4).abs() < 1e-15);
        assert!(DpLangevin::new(&coefficients, 0.0, model.wiring().clone()).is_err());
    }
}
