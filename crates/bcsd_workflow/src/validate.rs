// crates/bcsd_workflow/src/validate.rs

//! Post-write, pre-publish output validation.
//!
//! The temporary file is reopened and checked against the expected grid
//! shape and for residual nulls in the target variable. A failing check
//! aborts the publish; the temporary file stays in place for inspection.

use bcsd_config::ExpectedShape;
use bcsd_io::Dataset;
use thiserror::Error;

/// Reasons an output fails validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// An expected dimension is absent.
    #[error("missing dimension {name} (expected length {expected})")]
    MissingDimension {
        /// The absent dimension.
        name: String,
        /// Its expected length.
        expected: usize,
    },

    /// A dimension has the wrong length.
    #[error("dimension {name} has length {actual}, expected {expected}")]
    WrongSize {
        /// The offending dimension.
        name: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// The output carries a dimension not in the expected shape.
    #[error("unexpected dimension {name}")]
    UnexpectedDimension {
        /// The extra dimension.
        name: String,
    },

    /// The target variable is absent from the output.
    #[error("missing variable {name}")]
    MissingVariable {
        /// The absent variable.
        name: String,
    },

    /// Null values survived the transform.
    #[error("failed to remove null values: {count} remain in {variable}")]
    ResidualNulls {
        /// The target variable.
        variable: String,
        /// How many nulls remain.
        count: usize,
    },
}

/// Check a reopened output dataset against the expected shape and assert
/// zero nulls in `variable`.
pub fn validate_output(
    dataset: &Dataset,
    variable: &str,
    expected: &ExpectedShape,
) -> Result<(), ValidationError> {
    for (name, len) in expected.dims() {
        match dataset.dimension(name) {
            None => {
                return Err(ValidationError::MissingDimension {
                    name: name.to_string(),
                    expected: len,
                })
            }
            Some(dim) if dim.len != len => {
                return Err(ValidationError::WrongSize {
                    name: name.to_string(),
                    expected: len,
                    actual: dim.len,
                })
            }
            Some(_) => {}
        }
    }
    let expected_names: Vec<&str> = expected.dims().iter().map(|(n, _)| *n).collect();
    for dim in &dataset.dims {
        if !expected_names.contains(&dim.name.as_str()) {
            return Err(ValidationError::UnexpectedDimension {
                name: dim.name.clone(),
            });
        }
    }

    let var = dataset
        .variable(variable)
        .map_err(|_| ValidationError::MissingVariable {
            name: variable.to_string(),
        })?;
    let nulls = var.null_count();
    if nulls > 0 {
        return Err(ValidationError::ResidualNulls {
            variable: variable.to_string(),
            count: nulls,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape() -> ExpectedShape {
        ExpectedShape {
            lon: 2,
            lat: 2,
            time: 3,
        }
    }

    fn dataset(time: usize, data: Vec<f64>) -> Dataset {
        let mut ds = Dataset::new();
        ds.add_dimension("lon", 2);
        ds.add_dimension("lat", 2);
        ds.add_dimension("time", time);
        ds.add_variable("tasmax", &["time", "lat", "lon"], data).unwrap();
        ds
    }

    #[test]
    fn test_valid_output_passes() {
        let ds = dataset(3, vec![1.0; 12]);
        assert!(validate_output(&ds, "tasmax", &shape()).is_ok());
    }

    #[test]
    fn test_wrong_dimension_size() {
        let ds = dataset(2, vec![1.0; 8]);
        let err = validate_output(&ds, "tasmax", &shape()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::WrongSize {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_dimension() {
        let mut ds = Dataset::new();
        ds.add_dimension("lon", 2);
        ds.add_dimension("lat", 2);
        let err = validate_output(&ds, "tasmax", &shape()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingDimension { .. }));
    }

    #[test]
    fn test_unexpected_dimension() {
        let mut ds = dataset(3, vec![1.0; 12]);
        ds.add_dimension("depth", 1);
        let err = validate_output(&ds, "tasmax", &shape()).unwrap_err();
        assert!(matches!(err, ValidationError::UnexpectedDimension { .. }));
    }

    #[test]
    fn test_residual_nulls_fail() {
        let mut data = vec![1.0; 12];
        data[5] = f64::NAN;
        let ds = dataset(3, data);
        let err = validate_output(&ds, "tasmax", &shape()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ResidualNulls { count: 1, .. }
        ));
    }

    #[test]
    fn test_missing_variable() {
        let ds = dataset(3, vec![1.0; 12]);
        let err = validate_output(&ds, "pr", &shape()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingVariable { .. }));
    }
}
