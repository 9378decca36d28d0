// src/langevin.rs
//! Langevin Integrator
//!
//! Bundles a drift term, the density field state, the exact noise sampler
//! and a fixed time step. The owning loop calls one of the `integrate_*`
//! methods once per tick, lending it the entropy source:
//! ```text
//! loop {
//!     langevin.integrate_rungekutta(&mut rng)?;
//!     record(langevin.mean_density());
//! }
//! ```

use crate::error::{validation::*, LangevinResult};
use crate::field::FieldState;
use crate::models::model::DriftTerm;
use crate::solvers::{Euler, IntegrationMethod, NoiseSampler, RungeKutta};
use rand::Rng;

#[derive(Clone, Debug)]
pub struct Langevin<D: DriftTerm> {
    drift: D,
    field: FieldState,
    sampler: NoiseSampler,
    dt: f64,
}

impl<D: DriftTerm> Langevin<D> {
    pub fn new(
        drift: D,
        field: FieldState,
        sampler: NoiseSampler,
        dt: f64,
    ) -> LangevinResult<Self> {
        validate_finite("dt", dt)?;
        validate_positive("dt", dt)?;
        field.validate()?;
        Ok(Langevin {
            drift,
            field,
            sampler,
            dt,
        })
    }

    /// One explicit Euler tick followed by the stochastic step
    pub fn integrate_euler<R: Rng + ?Sized>(&mut self, rng: &mut R) -> LangevinResult<()> {
        Euler::step(&self.drift, &mut self.field, self.dt, &self.sampler, rng)
    }

    /// One fourth-order Runge-Kutta tick followed by the stochastic step
    pub fn integrate_rungekutta<R: Rng + ?Sized>(&mut self, rng: &mut R) -> LangevinResult<()> {
        RungeKutta::step(&self.drift, &mut self.field, self.dt, &self.sampler, rng)
    }

    pub fn integrate<R: Rng + ?Sized>(
        &mut self,
        method: IntegrationMethod,
        rng: &mut R,
    ) -> LangevinResult<()> {
        match method {
            IntegrationMethod::Euler => self.integrate_euler(rng),
            IntegrationMethod::RungeKutta => self.integrate_rungekutta(rng),
        }
    }

    pub fn field(&self) -> &FieldState {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut FieldState {
        &mut self.field
    }

    pub fn drift(&self) -> &D {
        &self.drift
    }

    pub fn sampler(&self) -> &NoiseSampler {
        &self.sampler
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn mean_density(&self) -> f64 {
        self.field.mean_density()
    }

    /// Expected Poisson count of the stochastic step for the mean density
    pub fn poisson_mean(&self) -> f64 {
        self.sampler.lambda_scaled() * self.field.mean_density()
    }
}
