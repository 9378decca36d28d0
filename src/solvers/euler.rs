// src/solvers/euler.rs
//! Explicit Euler Step with Exact Stochastic Correction
//!
//! # Mathematical Framework
//!
//! For each cell, one drift evaluation on the pre-step field followed by one
//! Poisson-Gamma draw:
//! ```text
//! ρ̃_i       = ρ_i(t) + f_i(ρ(t)) Δt
//! ρ_i(t+Δt) ~ PoissonGamma(ρ̃_i)
//! ```
//!
//! The new values are assembled in a scratch buffer so that every drift
//! evaluation sees the same snapshot ρ(t). The scratch buffer is then swapped
//! in as the live field.
//!
//! # Convergence Properties
//!
//! - **Deterministic part**: first order in Δt
//! - **Linear and noise terms**: exact (sampled from the propagator)

use super::noise::NoiseSampler;
use crate::error::{validation::*, LangevinError, LangevinResult};
use crate::field::FieldState;
use crate::models::model::DriftTerm;
use rand::Rng;
use tracing::debug;

/// First-order explicit scheme
pub struct Euler;

impl Euler {
    /// Advance `field` by one tick
    ///
    /// # Algorithm
    ///
    /// 1. Drift on the pre-step field: f_i = f(i, ρ(t))
    /// 2. Candidate: ρ̃_i = ρ_i + f_i Δt (negative values are clamped at the
    ///    Poisson rate, never propagated)
    /// 3. Noise: draw ρ_i(t+Δt) into the scratch buffer
    /// 4. Swap scratch and live field, mean = Σρ / n
    ///
    /// On error the live field and mean are left at their pre-step values.
    pub fn step<D, R>(
        drift: &D,
        field: &mut FieldState,
        dt: f64,
        sampler: &NoiseSampler,
        rng: &mut R,
    ) -> LangevinResult<()>
    where
        D: DriftTerm + ?Sized,
        R: Rng + ?Sized,
    {
        validate_finite("dt", dt)?;
        validate_positive("dt", dt)?;
        field.validate()?;

        let density = &field.density;
        let next = &mut field.stages.next;
        let mut sum = 0.0;
        let mut n_clamped = 0usize;

        for i in 0..density.len() {
            let candidate = density[i] + drift.drift(i, density) * dt;
            if !candidate.is_finite() {
                return Err(non_finite_candidate(i, candidate));
            }
            if candidate < 0.0 {
                n_clamped += 1;
            }
            let value = sampler.sample(candidate, rng)?;
            next[i] = value;
            sum += value;
        }

        if n_clamped > 0 {
            debug!(n_clamped, "Euler step clamped negative candidate densities");
        }
        field.commit_next(sum);
        Ok(())
    }

    /// Deterministic part of [`step`](Self::step) only: ρ ← max(ρ + f Δt, 0)
    pub fn deterministic_update<D>(drift: &D, field: &mut FieldState, dt: f64) -> LangevinResult<()>
    where
        D: DriftTerm + ?Sized,
    {
        validate_finite("dt", dt)?;
        validate_positive("dt", dt)?;
        field.validate()?;

        let density = &field.density;
        let next = &mut field.stages.next;
        let mut sum = 0.0;

        for i in 0..density.len() {
            let candidate = density[i] + drift.drift(i, density) * dt;
            if !candidate.is_finite() {
                return Err(non_finite_candidate(i, candidate));
            }
            next[i] = candidate.max(0.0);
            sum += next[i];
        }

        field.commit_next(sum);
        Ok(())
    }
}

fn non_finite_candidate(i_cell: usize, candidate: f64) -> LangevinError {
    LangevinError::NumericalInstability {
        method: "Euler".to_string(),
        reason: format!("candidate density {} at cell {}", candidate, i_cell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seed_rng_from_u64;
    use ndarray::Array1;

    #[test]
    fn test_drift_sees_pre_step_snapshot() {
        // Each cell's drift is the value of its right neighbour; if the scratch
        // buffer were not used, cell 1 would see cell 0's new value.
        let shift = |i: usize, f: &Array1<f64>| f[(i + 1) % f.len()];
        let mut field = FieldState::from_vec(vec![1.0, 2.0, 3.0]).expect("Valid field");

        Euler::deterministic_update(&shift, &mut field, 0.5).expect("Finite step");

        assert_eq!(field.density().to_vec(), vec![2.0, 3.5, 3.5]);
        assert!((field.mean_density() - 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_negative_candidate_is_clamped() {
        let sink = |_: usize, _: &Array1<f64>| -10.0;
        let sampler = NoiseSampler::new(1.0, 1.0).expect("Valid sampler");
        let mut field = FieldState::from_vec(vec![0.5, 0.5]).expect("Valid field");
        let mut rng = seed_rng_from_u64(4);

        Euler::step(&sink, &mut field, 0.1, &sampler, &mut rng).expect("Clamped step");

        assert_eq!(field.density().to_vec(), vec![0.0, 0.0]);
        assert_eq!(field.mean_density(), 0.0);
    }

    #[test]
    fn test_nan_drift_leaves_field_unchanged() {
        let broken = |i: usize, _: &Array1<f64>| if i == 2 { f64::NAN } else { 0.0 };
        let sampler = NoiseSampler::new(1.0, 1.0).expect("Valid sampler");
        let mut field = FieldState::from_vec(vec![1.0, 2.0, 3.0, 4.0]).expect("Valid field");
        let mut rng = seed_rng_from_u64(4);

        let result = Euler::step(&broken, &mut field, 0.1, &sampler, &mut rng);

        assert!(matches!(
            result,
            Err(LangevinError::NumericalInstability { .. })
        ));
        assert_eq!(field.density().to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
        assert!((field.mean_density() - 2.5).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_bad_dt() {
        let zero = |_: usize, _: &Array1<f64>| 0.0;
        let sampler = NoiseSampler::new(1.0, 1.0).expect("Valid sampler");
        let mut field = FieldState::zeros(4).expect("Valid field");
        let mut rng = seed_rng_from_u64(4);

        for dt in [0.0, -0.1, f64::NAN] {
            assert!(Euler::step(&zero, &mut field, dt, &sampler, &mut rng).is_err());
        }
    }
}
