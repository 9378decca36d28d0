// src/models/decay.rs
use super::model::DriftTerm;
use ndarray::Array1;

/// Uncoupled linear decay: dρ/dt = -rate * ρ
///
/// Has the closed-form solution ρ(t) = ρ(0) e^(-rate t), which makes it the
/// reference problem for integrator convergence checks.
#[derive(Clone, Copy, Debug)]
pub struct LinearDecay {
    pub rate: f64,
}

impl LinearDecay {
    pub fn new(rate: f64) -> Self {
        LinearDecay { rate }
    }
}

impl DriftTerm for LinearDecay {
    fn drift(&self, i_cell: usize, field: &Array1<f64>) -> f64 {
        -self.rate * field[i_cell]
    }
}

/// Same rate of change in every cell, independent of the field
#[derive(Clone, Copy, Debug)]
pub struct ConstantDrift {
    pub rate: f64,
}

impl ConstantDrift {
    pub fn new(rate: f64) -> Self {
        ConstantDrift { rate }
    }
}

impl DriftTerm for ConstantDrift {
    fn drift(&self, _i_cell: usize, _field: &Array1<f64>) -> f64 {
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_decay_is_local() {
        let field = Array1::from_vec(vec![2.0, 4.0, 8.0]);
        let decay = LinearDecay::new(0.5);

        assert_eq!(decay.drift(0, &field), -1.0);
        assert_eq!(decay.drift(2, &field), -4.0);
    }

    #[test]
    fn test_constant_drift_ignores_field() {
        let field = Array1::from_vec(vec![2.0, 4.0]);
        let drift = ConstantDrift::new(-0.25);

        assert_eq!(drift.drift(0, &field), -0.25);
        assert_eq!(drift.drift(1, &field), -0.25);
    }
}
