// src/grid/boundary.rs
//! Boundary Conditions Applied Along Grid Edges
//!
//! Conditions are given one per edge, in the order
//! ```text
//! 1d: [first cell, last cell]
//! 2d: [row y = 0, row y = n_y - 1, column x = 0, column x = n_x - 1]
//! ```
//! and applied in that order, so a later edge wins at shared corners.
//!
//! Conditions are applied to the live field before each integration step.

use super::{GridDimension, GridShape};
use crate::error::{validation::*, LangevinError, LangevinResult};
use ndarray::ArrayViewMut1;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryCondition {
    /// Edge evolves freely
    Floating,
    /// Edge cells are reset to the given density
    FixedValue(f64),
    /// Density is injected (or removed) at the given rate per unit time
    FixedFlux(f64),
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryCondition::Floating => write!(f, "floating"),
            BoundaryCondition::FixedValue(v) => write!(f, "fixed value {}", v),
            BoundaryCondition::FixedFlux(v) => write!(f, "fixed flux {}", v),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridEdge {
    /// Row `y = 0`
    FirstRow,
    /// Row `y = n_y - 1`
    LastRow,
    /// Column `x = 0`; the first cell of a 1d grid
    FirstColumn,
    /// Column `x = n_x - 1`; the last cell of a 1d grid
    LastColumn,
}

impl GridEdge {
    /// Edges in the order boundary conditions are listed
    pub fn order(dimension: GridDimension) -> &'static [GridEdge] {
        match dimension {
            GridDimension::D1 => &[GridEdge::FirstColumn, GridEdge::LastColumn],
            GridDimension::D2 => &[
                GridEdge::FirstRow,
                GridEdge::LastRow,
                GridEdge::FirstColumn,
                GridEdge::LastColumn,
            ],
        }
    }

    /// Visit the flattened index of every cell on this edge
    fn for_each_cell(self, shape: &GridShape, mut f: impl FnMut(usize)) {
        match self {
            GridEdge::FirstRow => (0..shape.n_x).for_each(|x| f(shape.index(x, 0))),
            GridEdge::LastRow => (0..shape.n_x).for_each(|x| f(shape.index(x, shape.n_y - 1))),
            GridEdge::FirstColumn => (0..shape.n_y).for_each(|y| f(shape.index(0, y))),
            GridEdge::LastColumn => {
                (0..shape.n_y).for_each(|y| f(shape.index(shape.n_x - 1, y)))
            }
        }
    }
}

/// Check that there is exactly one condition per grid edge and that the
/// values keep the field non-negative
pub fn check_boundary_conditions(
    dimension: GridDimension,
    conditions: &[BoundaryCondition],
) -> LangevinResult<()> {
    let expected = 2 * dimension.rank();
    if conditions.len() != expected {
        return Err(LangevinError::InvalidConfiguration {
            field: "boundary_conditions".to_string(),
            reason: format!(
                "{} grid needs {} boundary conditions, got {}",
                dimension,
                expected,
                conditions.len()
            ),
        });
    }
    for condition in conditions {
        match *condition {
            BoundaryCondition::Floating => {}
            BoundaryCondition::FixedValue(value) => {
                validate_finite("fixed boundary value", value)?;
                validate_non_negative("fixed boundary value", value)?;
            }
            BoundaryCondition::FixedFlux(value) => {
                validate_finite("fixed boundary flux", value)?;
            }
        }
    }
    Ok(())
}

/// Apply each edge condition in turn to `density`
///
/// Fixed-flux edges are left untouched at epoch 0 so that the recorded
/// initial state is the initial condition itself.
pub fn apply_boundary_conditions(
    mut density: ArrayViewMut1<'_, f64>,
    shape: &GridShape,
    conditions: &[BoundaryCondition],
    epoch: usize,
    dt: f64,
) {
    let edges = GridEdge::order(shape.dimension);
    for (edge, condition) in edges.iter().zip(conditions) {
        match *condition {
            BoundaryCondition::Floating => {}
            BoundaryCondition::FixedValue(value) => {
                edge.for_each_cell(shape, |i| density[i] = value);
            }
            BoundaryCondition::FixedFlux(value) => {
                if epoch > 0 {
                    edge.for_each_cell(shape, |i| {
                        density[i] = (density[i] + value * dt).max(0.0);
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    #[test]
    fn test_condition_count() {
        let floating = BoundaryCondition::Floating;
        assert!(check_boundary_conditions(GridDimension::D1, &[floating; 2]).is_ok());
        assert!(check_boundary_conditions(GridDimension::D1, &[floating; 4]).is_err());
        assert!(check_boundary_conditions(GridDimension::D2, &[floating; 4]).is_ok());
        assert!(check_boundary_conditions(
            GridDimension::D1,
            &[BoundaryCondition::FixedValue(-1.0), floating]
        )
        .is_err());
    }

    #[test]
    fn test_fixed_value_1d() {
        let shape = GridShape::d1(4);
        let mut density = Array1::from_vec(vec![1.0, 1.0, 1.0, 1.0]);
        let conditions = [
            BoundaryCondition::FixedValue(0.0),
            BoundaryCondition::FixedValue(2.5),
        ];

        apply_boundary_conditions(density.view_mut(), &shape, &conditions, 0, 0.1);

        assert_eq!(density.to_vec(), vec![0.0, 1.0, 1.0, 2.5]);
    }

    #[test]
    fn test_fixed_flux_skips_epoch_zero_and_clamps() {
        let shape = GridShape::d1(3);
        let mut density = Array1::from_vec(vec![0.05, 1.0, 1.0]);
        let conditions = [
            BoundaryCondition::FixedFlux(-1.0),
            BoundaryCondition::FixedFlux(2.0),
        ];

        apply_boundary_conditions(density.view_mut(), &shape, &conditions, 0, 0.1);
        assert_eq!(density.to_vec(), vec![0.05, 1.0, 1.0]);

        apply_boundary_conditions(density.view_mut(), &shape, &conditions, 1, 0.1);
        assert_eq!(density[0], 0.0);
        assert_eq!(density[1], 1.0);
        assert!((density[2] - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_2d_first_edge_is_row_y0() {
        let shape = GridShape::d2(3, 2);
        let mut density = Array1::from_elem(6, 1.0);
        let conditions = [
            BoundaryCondition::FixedValue(0.0),
            BoundaryCondition::Floating,
            BoundaryCondition::Floating,
            BoundaryCondition::Floating,
        ];

        apply_boundary_conditions(density.view_mut(), &shape, &conditions, 3, 0.1);

        // Cells 0, 1, 2 form the row y = 0
        assert_eq!(density.to_vec(), vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_2d_edges() {
        let shape = GridShape::d2(3, 2);
        let mut density = Array1::from_elem(6, 1.0);
        let conditions = [
            BoundaryCondition::Floating,
            BoundaryCondition::FixedValue(5.0),
            BoundaryCondition::FixedValue(0.0),
            BoundaryCondition::Floating,
        ];

        apply_boundary_conditions(density.view_mut(), &shape, &conditions, 3, 0.1);

        // Row y = 1 set to 5, then column x = 0 zeroed over the shared corner
        assert_eq!(density[shape.index(0, 0)], 0.0);
        assert_eq!(density[shape.index(0, 1)], 0.0);
        assert_eq!(density[shape.index(1, 1)], 5.0);
        assert_eq!(density[shape.index(2, 1)], 5.0);
        // Untouched interior of row y = 0
        assert_eq!(density[shape.index(1, 0)], 1.0);
        assert_eq!(density[shape.index(2, 0)], 1.0);
    }

    #[test]
    fn test_2d_flux_on_last_column() {
        let shape = GridShape::d2(3, 2);
        let mut density = Array1::from_elem(6, 1.0);
        let conditions = [
            BoundaryCondition::Floating,
            BoundaryCondition::Floating,
            BoundaryCondition::Floating,
            BoundaryCondition::FixedFlux(10.0),
        ];

        apply_boundary_conditions(density.view_mut(), &shape, &conditions, 1, 0.1);

        for y in 0..2 {
            assert!((density[shape.index(2, y)] - 2.0).abs() < 1e-12);
            assert_eq!(density[shape.index(0, y)], 1.0);
        }
    }
}
