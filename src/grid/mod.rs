// src/grid/mod.rs
//! Grid Geometry for the Density Field
//!
//! The field is stored as a flat vector; a 2D cell `(x, y)` lives at
//! ```text
//! i = x + y * n_x
//! ```
//! A 1D grid is the special case `n_y = 1`.

pub mod boundary;
pub mod initial;
pub mod wiring;

pub use boundary::{
    apply_boundary_conditions, check_boundary_conditions, BoundaryCondition, GridEdge,
};
pub use initial::InitialCondition;
pub use wiring::GridWiring;

use crate::error::{validation::*, LangevinError, LangevinResult};
use std::fmt;

/// Density field grid dimension
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridDimension {
    D1,
    D2,
}

impl GridDimension {
    /// Number of axes
    pub fn rank(self) -> usize {
        match self {
            GridDimension::D1 => 1,
            GridDimension::D2 => 2,
        }
    }
}

impl fmt::Display for GridDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridDimension::D1 => write!(f, "1d"),
            GridDimension::D2 => write!(f, "2d"),
        }
    }
}

/// Edge topology along one axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridTopology {
    /// Edge cells connect only to interior neighbours
    Bounded,
    /// Edge cells also connect to the opposite edge
    Periodic,
}

impl fmt::Display for GridTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridTopology::Bounded => write!(f, "bounded"),
            GridTopology::Periodic => write!(f, "periodic"),
        }
    }
}

/// Grid extent along each axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridShape {
    pub dimension: GridDimension,
    pub n_x: usize,
    pub n_y: usize,
}

impl GridShape {
    pub fn d1(n_x: usize) -> Self {
        GridShape {
            dimension: GridDimension::D1,
            n_x,
            n_y: 1,
        }
    }

    pub fn d2(n_x: usize, n_y: usize) -> Self {
        GridShape {
            dimension: GridDimension::D2,
            n_x,
            n_y,
        }
    }

    pub fn n_cells(&self) -> usize {
        self.n_x * self.n_y
    }

    /// Flattened index of cell `(x, y)`
    pub fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.n_x
    }

    pub fn validate(&self) -> LangevinResult<()> {
        if self.n_x == 0 || self.n_y == 0 {
            return Err(LangevinError::InvalidConfiguration {
                field: "grid_size".to_string(),
                reason: format!("{}x{} grid has no cells", self.n_x, self.n_y),
            });
        }
        if self.dimension == GridDimension::D1 && self.n_y != 1 {
            return Err(LangevinError::InvalidConfiguration {
                field: "grid_size".to_string(),
                reason: format!("1d grid must have n_y = 1, got {}", self.n_y),
            });
        }
        validate_n_cells(self.n_cells())
    }
}
