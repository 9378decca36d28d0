// src/sim/config.rs
use crate::error::{validation::*, LangevinError, LangevinResult};
use crate::grid::{
    check_boundary_conditions, BoundaryCondition, GridDimension, GridShape, GridTopology,
    InitialCondition,
};
use crate::math_utils::round_to_decimals;
use crate::solvers::IntegrationMethod;
use bitflags::bitflags;

bitflags! {
    /// Time series recorded by a simulation in addition to the epoch times
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RecordFlags: u32 {
        const NONE              = 0;
        const MEAN_DENSITY      = 1 << 0;
        const POISSON_MEAN      = 1 << 1;
        /// Keep a copy of the density grid at the end of every run segment
        const SEGMENT_SNAPSHOTS = 1 << 2;
    }
}

#[derive(Clone, Debug)]
pub struct SimConfig {
    pub t_final: f64,
    pub dx: f64,
    pub dt: f64,
    pub seed: u64,
    pub grid_dimension: GridDimension,
    pub n_x: usize,
    /// Ignored (treated as 1) for 1d grids
    pub n_y: usize,
    /// One per axis: `[x]` or `[x, y]`
    pub grid_topologies: Vec<GridTopology>,
    /// One per edge, ordered as in [`crate::grid::GridEdge::order`]
    pub boundary_conditions: Vec<BoundaryCondition>,
    pub initial_condition: InitialCondition,
    pub integration_method: IntegrationMethod,
    /// Decimal places epoch times are rounded to
    pub n_decimals: u32,
    pub record: RecordFlags,
}

impl SimConfig {
    /// Validate the simulation configuration
    pub fn validate(&self) -> LangevinResult<()> {
        validate_finite("t_final", self.t_final)?;
        validate_positive("t_final", self.t_final)?;
        validate_finite("dx", self.dx)?;
        validate_positive("dx", self.dx)?;
        validate_finite("dt", self.dt)?;
        validate_positive("dt", self.dt)?;

        if self.n_decimals > 15 {
            return Err(LangevinError::InvalidConfiguration {
                field: "n_decimals".to_string(),
                reason: format!("{} exceeds f64 precision (max 15)", self.n_decimals),
            });
        }
        if round_to_decimals(self.dt, self.n_decimals) <= 0.0 {
            return Err(LangevinError::InvalidConfiguration {
                field: "n_decimals".to_string(),
                reason: format!(
                    "dt = {} rounds to zero at {} decimals",
                    self.dt, self.n_decimals
                ),
            });
        }

        self.grid_shape().validate()?;
        if self.grid_topologies.len() != self.grid_dimension.rank() {
            return Err(LangevinError::InvalidConfiguration {
                field: "grid_topologies".to_string(),
                reason: format!(
                    "{} grid needs {} topologies, got {}",
                    self.grid_dimension,
                    self.grid_dimension.rank(),
                    self.grid_topologies.len()
                ),
            });
        }
        check_boundary_conditions(self.grid_dimension, &self.boundary_conditions)?;
        self.initial_condition.validate()
    }

    pub fn grid_shape(&self) -> GridShape {
        match self.grid_dimension {
            GridDimension::D1 => GridShape::d1(self.n_x),
            GridDimension::D2 => GridShape::d2(self.n_x, self.n_y),
        }
    }

    /// Number of recorded epochs, including epoch 0
    pub fn n_epochs(&self) -> usize {
        count_epochs(self.t_final, self.dt, self.n_decimals)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            t_final: 10.0,
            dx: 0.5,
            dt: 0.01,
            seed: 12345,
            grid_dimension: GridDimension::D1,
            n_x: 100,
            n_y: 1,
            grid_topologies: vec![GridTopology::Periodic],
            boundary_conditions: vec![BoundaryCondition::Floating; 2],
            initial_condition: InitialCondition::RandomUniform { min: 0.0, max: 1.0 },
            integration_method: IntegrationMethod::RungeKutta,
            n_decimals: 6,
            record: RecordFlags::MEAN_DENSITY,
        }
    }
}

/// Count the epochs needed to reach `t_final`, stepping `t` by `dt` with
/// rounding to `n_decimals`, plus one for the initial state
///
/// `dt` must not round to zero.
pub fn count_epochs(t_final: f64, dt: f64, n_decimals: u32) -> usize {
    let mut n_steps = 0;
    let mut t = 0.0;
    while t < t_final {
        t = round_to_decimals(t + dt, n_decimals);
        n_steps += 1;
    }
    n_steps + 1
}
