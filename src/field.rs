// src/field.rs
//! Density Field State
//!
//! Owns the live density field ρ(x,t), the per-stage scratch buffers used by
//! the integrators, and the grid-averaged mean density.
//!
//! # Buffer Discipline
//!
//! All buffers are allocated once, sized to `n_cells`, and never resized.
//! An integration step never writes to the buffer it is reading within the
//! same pass; the new field is assembled in `StageBuffers::next` and then
//! swapped with the live field:
//! ```text
//! read ρ(t) ──▶ write next ──▶ swap(ρ, next) ──▶ ρ(t+Δt)
//! ```
//! After a step the scratch buffers hold unspecified values.

use crate::error::{validation::*, LangevinError, LangevinResult};
use ndarray::{Array1, ArrayView1, ArrayViewMut1};

/// Preallocated scratch buffers for one integration step
#[derive(Debug, Clone)]
pub struct StageBuffers {
    pub(crate) k1: Array1<f64>,
    pub(crate) k2: Array1<f64>,
    pub(crate) k3: Array1<f64>,
    /// Intermediate field estimate (Runge-Kutta stages 1 and 3)
    pub(crate) estimate: Array1<f64>,
    /// Assembles the post-step field before it is swapped in
    pub(crate) next: Array1<f64>,
}

impl StageBuffers {
    pub fn zeros(n_cells: usize) -> Self {
        StageBuffers {
            k1: Array1::zeros(n_cells),
            k2: Array1::zeros(n_cells),
            k3: Array1::zeros(n_cells),
            estimate: Array1::zeros(n_cells),
            next: Array1::zeros(n_cells),
        }
    }

    fn validate(&self, n_cells: usize) -> LangevinResult<()> {
        validate_buffer_len("k1", self.k1.len(), n_cells)?;
        validate_buffer_len("k2", self.k2.len(), n_cells)?;
        validate_buffer_len("k3", self.k3.len(), n_cells)?;
        validate_buffer_len("estimate", self.estimate.len(), n_cells)?;
        validate_buffer_len("next", self.next.len(), n_cells)
    }
}

/// Live density field plus scratch buffers and mean density
#[derive(Debug, Clone)]
pub struct FieldState {
    pub(crate) density: Array1<f64>,
    pub(crate) stages: StageBuffers,
    pub(crate) mean_density: f64,
}

impl FieldState {
    /// All-zero field of `n_cells` cells
    pub fn zeros(n_cells: usize) -> LangevinResult<Self> {
        validate_n_cells(n_cells)?;
        Ok(FieldState {
            density: Array1::zeros(n_cells),
            stages: StageBuffers::zeros(n_cells),
            mean_density: 0.0,
        })
    }

    /// Wrap an existing density field, allocating matching scratch buffers
    ///
    /// Every entry must be finite and non-negative.
    pub fn from_density(density: Array1<f64>) -> LangevinResult<Self> {
        validate_n_cells(density.len())?;
        if let Some((i, &value)) = density
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(LangevinError::InvalidParameters {
                parameter: format!("density[{}]", i),
                value,
                constraint: "field values must be finite and non-negative".to_string(),
            });
        }
        let n_cells = density.len();
        let mut field = FieldState {
            density,
            stages: StageBuffers::zeros(n_cells),
            mean_density: 0.0,
        };
        field.recompute_mean();
        Ok(field)
    }

    pub fn from_vec(density: Vec<f64>) -> LangevinResult<Self> {
        Self::from_density(Array1::from_vec(density))
    }

    pub fn n_cells(&self) -> usize {
        self.density.len()
    }

    pub fn density(&self) -> ArrayView1<'_, f64> {
        self.density.view()
    }

    /// Mutable view of the live field, e.g. for boundary conditions.
    ///
    /// Callers must keep entries non-negative and call
    /// [`recompute_mean`](Self::recompute_mean) if they need the mean to
    /// reflect their edits before the next step.
    pub fn density_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        self.density.view_mut()
    }

    /// Grid-averaged density after the last completed step
    pub fn mean_density(&self) -> f64 {
        self.mean_density
    }

    /// Recompute the mean density from scratch
    pub fn recompute_mean(&mut self) -> f64 {
        self.mean_density = self.density.sum() / self.density.len() as f64;
        self.mean_density
    }

    /// Check that every scratch buffer matches the field length
    pub fn validate(&self) -> LangevinResult<()> {
        validate_n_cells(self.density.len())?;
        self.stages.validate(self.density.len())
    }

    /// Swap the assembled `next` buffer in as the live field
    pub(crate) fn commit_next(&mut self, sum: f64) {
        std::mem::swap(&mut self.density, &mut self.stages.next);
        self.mean_density = sum / self.density.len() as f64;
    }
}
