// src/models/model.rs
use ndarray::Array1;

/// Deterministic right-hand side of the Langevin equation
///
/// Returns dρ/dt at `i_cell` given a complete field snapshot. Implementations
/// may read any other cell of `field` (neighbour coupling, boundary policy)
/// but must not depend on anything except `(i_cell, field)`.
pub trait DriftTerm {
    fn drift(&self, i_cell: usize, field: &Array1<f64>) -> f64;
}

impl<F> DriftTerm for F
where
    F: Fn(usize, &Array1<f64>) -> f64,
{
    fn drift(&self, i_cell: usize, field: &Array1<f64>) -> f64 {
        self(i_cell, field)
    }
}
