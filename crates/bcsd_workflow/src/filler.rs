// crates/bcsd_workflow/src/filler.rs

//! The hole-filling collaborator seam.
//!
//! The production interpolation routine lives outside this repository;
//! the pipeline only consumes the `HoleFiller` contract: same dimensions
//! out, zero remaining nulls in the target variable.
//! `TimeBroadcastFiller` is a reference implementation for tests and
//! local runs: each missing cell takes the nearest valid value along the
//! broadcast dimension.

use crate::error::WorkflowError;
use bcsd_io::Dataset;

/// External hole-filling routine.
pub trait HoleFiller {
    /// Fill missing values of `variable`, broadcasting along
    /// `broadcast_dims`. Must preserve every dimension size and leave no
    /// nulls in `variable`.
    fn fill(
        &self,
        dataset: Dataset,
        variable: &str,
        broadcast_dims: &[&str],
    ) -> Result<Dataset, WorkflowError>;
}

/// Nearest-valid-value fill along one broadcast dimension.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeBroadcastFiller;

impl TimeBroadcastFiller {
    /// New reference filler.
    pub fn new() -> Self {
        Self
    }
}

impl HoleFiller for TimeBroadcastFiller {
    fn fill(
        &self,
        mut dataset: Dataset,
        variable: &str,
        broadcast_dims: &[&str],
    ) -> Result<Dataset, WorkflowError> {
        // The stride arithmetic below trusts the declared shape; refuse
        // inconsistent input instead of indexing out of bounds.
        dataset
            .check_consistency()
            .map_err(|e| WorkflowError::TransformFailure {
                variable: variable.to_string(),
                reason: e.to_string(),
            })?;
        let var = dataset
            .variable_mut(variable)
            .map_err(|e| WorkflowError::TransformFailure {
                variable: variable.to_string(),
                reason: e.to_string(),
            })?;

        let axis = broadcast_dims
            .iter()
            .find_map(|d| var.dim_index(d))
            .ok_or_else(|| WorkflowError::TransformFailure {
                variable: variable.to_string(),
                reason: format!(
                    "none of the broadcast dimensions {:?} exist on the variable",
                    broadcast_dims
                ),
            })?;

        let shape = var.shape.clone();
        let axis_len = shape[axis];
        let axis_stride: usize = shape[axis + 1..].iter().product();
        // Fill from a frozen copy so already-filled cells never propagate.
        let source = var.data.clone();

        for idx in 0..source.len() {
            if !source[idx].is_nan() {
                continue;
            }
            let pos = (idx / axis_stride) % axis_len;
            let mut filled = false;
            for step in 1..axis_len {
                for candidate in [pos.checked_sub(step), Some(pos + step)] {
                    let Some(p) = candidate else { continue };
                    if p >= axis_len {
                        continue;
                    }
                    let offset = (p as isize - pos as isize) * axis_stride as isize;
                    let j = (idx as isize + offset) as usize;
                    if !source[j].is_nan() {
                        var.data[idx] = source[j];
                        filled = true;
                        break;
                    }
                }
                if filled {
                    break;
                }
            }
            if !filled {
                return Err(WorkflowError::TransformFailure {
                    variable: variable.to_string(),
                    reason: format!(
                        "no valid value along broadcast dimension for cell {idx}"
                    ),
                });
            }
        }

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(time: usize, lat: usize, lon: usize, data: Vec<f64>) -> Dataset {
        let mut ds = Dataset::new();
        ds.add_dimension("time", time);
        ds.add_dimension("lat", lat);
        ds.add_dimension("lon", lon);
        ds.add_variable("tasmax", &["time", "lat", "lon"], data).unwrap();
        ds
    }

    #[test]
    fn test_fills_single_hole_from_nearest_time() {
        // time=3, lat=1, lon=2; hole at t=1, lon=1.
        let data = vec![10.0, 20.0, 11.0, f64::NAN, 12.0, 22.0];
        let ds = grid(3, 1, 2, data);

        let filled = TimeBroadcastFiller::new()
            .fill(ds, "tasmax", &["time"])
            .unwrap();
        let var = filled.variable("tasmax").unwrap();
        assert_eq!(var.null_count(), 0);
        // Nearest valid neighbor along time is t=0 (distance 1).
        assert_eq!(var.get(&[1, 0, 1]), Some(20.0));
    }

    #[test]
    fn test_preserves_dimensions_and_valid_cells() {
        let data = vec![1.0, f64::NAN, 3.0, 4.0];
        let ds = grid(2, 1, 2, data);
        let filled = TimeBroadcastFiller::new()
            .fill(ds, "tasmax", &["time"])
            .unwrap();
        let var = filled.variable("tasmax").unwrap();
        assert_eq!(var.shape, vec![2, 1, 2]);
        assert_eq!(var.get(&[0, 0, 0]), Some(1.0));
        assert_eq!(var.get(&[0, 0, 1]), Some(4.0));
    }

    #[test]
    fn test_all_null_column_is_an_error() {
        let data = vec![f64::NAN, 1.0, f64::NAN, 2.0];
        let ds = grid(2, 1, 2, data);
        let err = TimeBroadcastFiller::new()
            .fill(ds, "tasmax", &["time"])
            .unwrap_err();
        assert!(matches!(err, WorkflowError::TransformFailure { .. }));
    }

    #[test]
    fn test_inconsistent_shape_is_an_error_not_a_panic() {
        // A dataset declaring 6 cells but carrying 2 must be refused
        // before any stride arithmetic runs.
        let mut ds = grid(3, 1, 2, vec![f64::NAN; 6]);
        ds.variables.get_mut("tasmax").unwrap().data = vec![1.0, f64::NAN];

        let err = TimeBroadcastFiller::new()
            .fill(ds, "tasmax", &["time"])
            .unwrap_err();
        assert!(matches!(err, WorkflowError::TransformFailure { .. }));
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        let ds = grid(1, 1, 1, vec![1.0]);
        let err = TimeBroadcastFiller::new()
            .fill(ds, "pr", &["time"])
            .unwrap_err();
        assert!(matches!(err, WorkflowError::TransformFailure { .. }));
    }

    #[test]
    fn test_missing_broadcast_dim_is_an_error() {
        let ds = grid(1, 1, 1, vec![1.0]);
        let err = TimeBroadcastFiller::new()
            .fill(ds, "tasmax", &["doy"])
            .unwrap_err();
        assert!(matches!(err, WorkflowError::TransformFailure { .. }));
    }
}
