// src/sim/simulation.rs
//! DP-Langevin Simulation Driver
//!
//! Owns one integrator, its random stream and the recorded time series.
//! Epoch 0 is the initial state; epoch `i ≥ 1` is the state after `i`
//! integration steps, at time `t_i = round(t_{i-1} + Δt)`.
//!
//! A run can be split into segments:
//! ```text
//! sim.run(200)?;   // epochs 1..=200
//! let early = sim.density();
//! sim.run(800)?;   // epochs 201..=1000
//! ```

use super::config::{RecordFlags, SimConfig};
use crate::error::{LangevinError, LangevinResult};
use crate::field::FieldState;
use crate::grid::{apply_boundary_conditions, GridShape, GridWiring};
use crate::langevin::Langevin;
use crate::math_utils::round_to_decimals;
use crate::models::{coefficients::Coefficients, dp_langevin::DpLangevin};
use crate::rng;
use crate::solvers::NoiseSampler;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use tracing::{info, warn};

pub struct Simulation {
    config: SimConfig,
    coefficients: Coefficients,
    shape: GridShape,
    langevin: Langevin<DpLangevin>,
    rng: StdRng,
    n_epochs: usize,
    i_current_epoch: usize,
    i_next_epoch: usize,
    t_current_epoch: f64,
    t_next_epoch: f64,
    t_epochs: Vec<f64>,
    mean_densities: Vec<f64>,
    poisson_means: Vec<f64>,
    snapshots: Vec<(usize, Array2<f64>)>,
    has_recorded_initial: bool,
}

impl Simulation {
    /// Build the grid, model and noise sampler and apply the initial condition
    pub fn new(coefficients: Coefficients, config: SimConfig) -> LangevinResult<Self> {
        coefficients.validate()?;
        config.validate()?;

        let shape = config.grid_shape();
        let wiring = GridWiring::build(shape, &config.grid_topologies)?;
        let model = DpLangevin::new(&coefficients, config.dx, wiring)?;
        let sampler =
            NoiseSampler::from_coefficients(coefficients.linear, coefficients.noise, config.dt)?;

        let mut rng = rng::seed_rng_from_u64(config.seed);
        let mut density = Array1::zeros(shape.n_cells());
        config
            .initial_condition
            .apply(&mut density, &shape, &mut rng)?;
        let field = FieldState::from_density(density)?;

        let langevin = Langevin::new(model, field, sampler, config.dt)?;
        let n_epochs = config.n_epochs();

        // Explicit diffusion is stable only for D Δt / Δx² below 1/(2 rank)
        let diffusion_number = coefficients.diffusion * config.dt / (config.dx * config.dx);
        let stability_limit = 0.5 / shape.dimension.rank() as f64;
        if diffusion_number >= stability_limit {
            warn!(
                diffusion_number,
                stability_limit, "Diffusion number exceeds the explicit stability limit"
            );
        }

        info!(
            grid = %format!("{} {}x{}", shape.dimension, shape.n_x, shape.n_y),
            n_epochs,
            method = %config.integration_method,
            initial_condition = %config.initial_condition,
            lambda = sampler.lambda(),
            lambda_scaled = sampler.lambda_scaled(),
            "Simulation initialized"
        );

        let series_len = |flag: RecordFlags| {
            if config.record.contains(flag) {
                n_epochs
            } else {
                0
            }
        };
        let mean_densities = vec![0.0; series_len(RecordFlags::MEAN_DENSITY)];
        let poisson_means = vec![0.0; series_len(RecordFlags::POISSON_MEAN)];
        Ok(Simulation {
            shape,
            langevin,
            rng,
            n_epochs,
            i_current_epoch: 0,
            i_next_epoch: 1,
            t_current_epoch: 0.0,
            t_next_epoch: round_to_decimals(config.dt, config.n_decimals),
            t_epochs: vec![0.0; n_epochs],
            mean_densities,
            poisson_means,
            snapshots: Vec::new(),
            has_recorded_initial: false,
            config,
            coefficients,
        })
    }

    /// Integrate `n_next_epochs` further epochs
    ///
    /// Fails without stepping if this would pass the last planned epoch. If a
    /// step fails, the field is left at the last completed epoch and the
    /// epoch counters point at the failed one.
    pub fn run(&mut self, n_next_epochs: usize) -> LangevinResult<()> {
        let requested = self.i_next_epoch + n_next_epochs;
        if requested > self.n_epochs {
            return Err(LangevinError::EpochOverrun {
                requested,
                available: self.n_epochs,
            });
        }

        if !self.has_recorded_initial {
            self.apply_boundary_conditions(0);
            self.langevin.field_mut().recompute_mean();
            self.record(0, 0.0);
            self.has_recorded_initial = true;
        }

        let mut t = self.t_next_epoch;
        for i in self.i_next_epoch..requested {
            self.apply_boundary_conditions(i);
            if let Err(e) = self
                .langevin
                .integrate(self.config.integration_method, &mut self.rng)
            {
                warn!(epoch = i, t, error = %e, "Integration step failed");
                self.i_next_epoch = i;
                self.t_next_epoch = t;
                return Err(e);
            }
            self.record(i, t);
            t = round_to_decimals(t + self.config.dt, self.config.n_decimals);
        }
        self.i_next_epoch = requested;
        self.t_next_epoch = t;

        if self.config.record.contains(RecordFlags::SEGMENT_SNAPSHOTS) {
            self.snapshots.push((self.i_current_epoch, self.density()));
        }
        info!(
            epoch = self.i_current_epoch,
            t = self.t_current_epoch,
            mean_density = self.langevin.mean_density(),
            "Run segment complete"
        );
        Ok(())
    }

    /// Integrate all remaining planned epochs
    pub fn run_to_end(&mut self) -> LangevinResult<()> {
        self.run(self.n_epochs - self.i_next_epoch)
    }

    fn apply_boundary_conditions(&mut self, epoch: usize) {
        let dt = self.config.dt;
        apply_boundary_conditions(
            self.langevin.field_mut().density_mut(),
            &self.shape,
            &self.config.boundary_conditions,
            epoch,
            dt,
        );
    }

    fn record(&mut self, i: usize, t: f64) {
        self.t_epochs[i] = t;
        if !self.mean_densities.is_empty() {
            self.mean_densities[i] = self.langevin.mean_density();
        }
        if !self.poisson_means.is_empty() {
            self.poisson_means[i] = self.langevin.poisson_mean();
        }
        self.i_current_epoch = i;
        self.t_current_epoch = t;
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    pub fn langevin(&self) -> &Langevin<DpLangevin> {
        &self.langevin
    }

    pub fn n_epochs(&self) -> usize {
        self.n_epochs
    }

    pub fn i_current_epoch(&self) -> usize {
        self.i_current_epoch
    }

    pub fn i_next_epoch(&self) -> usize {
        self.i_next_epoch
    }

    pub fn t_current_epoch(&self) -> f64 {
        self.t_current_epoch
    }

    pub fn t_next_epoch(&self) -> f64 {
        self.t_next_epoch
    }

    /// Epoch times; entries past the current epoch are zero
    pub fn t_epochs(&self) -> &[f64] {
        &self.t_epochs
    }

    /// Grid-averaged density per epoch, empty unless [`RecordFlags::MEAN_DENSITY`]
    /// is set; entries past the current epoch are zero
    pub fn mean_densities(&self) -> &[f64] {
        &self.mean_densities
    }

    /// λ_s ⟨ρ⟩ per epoch, empty unless [`RecordFlags::POISSON_MEAN`] is set
    pub fn poisson_means(&self) -> &[f64] {
        &self.poisson_means
    }

    /// `(epoch, density)` at the end of each run segment
    pub fn snapshots(&self) -> &[(usize, Array2<f64>)] {
        &self.snapshots
    }

    pub fn mean_density(&self) -> f64 {
        self.langevin.mean_density()
    }

    pub fn poisson_mean(&self) -> f64 {
        self.langevin.poisson_mean()
    }

    /// Current density laid out as `(n_x, n_y)`
    pub fn density(&self) -> Array2<f64> {
        let field = self.langevin.field().density();
        let shape = self.shape;
        Array2::from_shape_fn((shape.n_x, shape.n_y), |(x, y)| field[shape.index(x, y)])
    }
}
