// src/grid/wiring.rs
//! Cell-to-Cell Neighbour Topology
//!
//! Each cell stores the indices of the cells it exchanges density with
//! through diffusion. Neighbour order is up, down, right, left in 2D and
//! left, right in 1D.
//!
//! | Topology (x, y)      | Surface          |
//! |----------------------|------------------|
//! | bounded, bounded     | bounded plane    |
//! | periodic, bounded    | cylinder         |
//! | periodic, periodic   | torus            |
//!
//! Along a bounded edge a cell simply has fewer neighbours; in 1D the end
//! cells of a bounded line have a single neighbour.

use super::{GridDimension, GridShape, GridTopology};
use crate::error::{LangevinError, LangevinResult};

#[derive(Clone, Debug)]
pub struct GridWiring {
    shape: GridShape,
    neighbors: Vec<Vec<usize>>,
}

impl GridWiring {
    /// Build the wiring for `shape` with one topology per axis
    pub fn build(shape: GridShape, topologies: &[GridTopology]) -> LangevinResult<Self> {
        shape.validate()?;
        if topologies.len() != shape.dimension.rank() {
            return Err(LangevinError::GridConstruction {
                reason: format!(
                    "{} grid needs {} topologies, got {}",
                    shape.dimension,
                    shape.dimension.rank(),
                    topologies.len()
                ),
            });
        }
        match shape.dimension {
            GridDimension::D1 => Ok(Self::build_1d(shape.n_x, topologies[0])),
            GridDimension::D2 => Ok(Self::build_2d(
                shape.n_x,
                shape.n_y,
                topologies[0],
                topologies[1],
            )),
        }
    }

    fn build_1d(n_x: usize, topology: GridTopology) -> Self {
        let periodic = topology == GridTopology::Periodic;
        let neighbors = (0..n_x)
            .map(|x| {
                let mut cell = Vec::with_capacity(2);
                if x > 0 {
                    cell.push(x - 1);
                } else if periodic {
                    cell.push(n_x - 1);
                }
                if x + 1 < n_x {
                    cell.push(x + 1);
                } else if periodic {
                    cell.push(0);
                }
                cell
            })
            .collect();

        GridWiring {
            shape: GridShape::d1(n_x),
            neighbors,
        }
    }

    fn build_2d(
        n_x: usize,
        n_y: usize,
        x_topology: GridTopology,
        y_topology: GridTopology,
    ) -> Self {
        let shape = GridShape::d2(n_x, n_y);
        let periodic_x = x_topology == GridTopology::Periodic;
        let periodic_y = y_topology == GridTopology::Periodic;

        let mut neighbors = Vec::with_capacity(shape.n_cells());
        for y in 0..n_y {
            for x in 0..n_x {
                let mut cell = Vec::with_capacity(4);
                // Up
                if y + 1 < n_y {
                    cell.push(shape.index(x, y + 1));
                } else if periodic_y {
                    cell.push(shape.index(x, 0));
                }
                // Down
                if y > 0 {
                    cell.push(shape.index(x, y - 1));
                } else if periodic_y {
                    cell.push(shape.index(x, n_y - 1));
                }
                // Right
                if x + 1 < n_x {
                    cell.push(shape.index(x + 1, y));
                } else if periodic_x {
                    cell.push(shape.index(0, y));
                }
                // Left
                if x > 0 {
                    cell.push(shape.index(x - 1, y));
                } else if periodic_x {
                    cell.push(shape.index(n_x - 1, y));
                }
                neighbors.push(cell);
            }
        }

        GridWiring { shape, neighbors }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn n_cells(&self) -> usize {
        self.neighbors.len()
    }

    pub fn neighbors(&self, i_cell: usize) -> &[usize] {
        &self.neighbors[i_cell]
    }
}
