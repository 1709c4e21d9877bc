// crates/bcsd_io/src/dataset.rs

//! In-memory dataset model.
//!
//! A `Dataset` is the unit the pipeline works on: named dimensions, data
//! variables with row-major `f64` storage, and string attribute maps at
//! the global and per-variable level. Missing values are `NaN` in memory;
//! drivers translate to and from their format's fill-value convention.

use crate::error::DatasetError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Name, e.g. "lon".
    pub name: String,
    /// Length.
    pub len: usize,
}

/// One data variable: row-major values plus its dimension names and sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataVariable {
    /// Dimension names, outermost first.
    pub dims: Vec<String>,
    /// Dimension sizes, aligned with `dims`.
    pub shape: Vec<usize>,
    /// Row-major values; `NaN` marks a missing cell.
    #[serde(with = "nan_as_null")]
    pub data: Vec<f64>,
    /// Per-variable attributes.
    pub attrs: BTreeMap<String, String>,
}

impl DataVariable {
    /// Linear index of a multi-dimensional position.
    fn linear_index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.shape.len() {
            return None;
        }
        let mut idx = 0;
        let mut stride = 1;
        for (i, &dim_size) in self.shape.iter().enumerate().rev() {
            if indices[i] >= dim_size {
                return None;
            }
            idx += indices[i] * stride;
            stride *= dim_size;
        }
        Some(idx)
    }

    /// Value at a multi-dimensional position.
    pub fn get(&self, indices: &[usize]) -> Option<f64> {
        let idx = self.linear_index(indices)?;
        Some(self.data[idx])
    }

    /// Overwrite the value at a multi-dimensional position.
    pub fn set(&mut self, indices: &[usize], value: f64) -> bool {
        match self.linear_index(indices) {
            Some(idx) => {
                self.data[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Number of missing (NaN) cells.
    pub fn null_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_nan()).count()
    }

    /// Total element count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the variable holds no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Position of a dimension name within this variable's axes.
    pub fn dim_index(&self, name: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == name)
    }
}

/// An in-memory scientific dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Named dimensions, in declaration order.
    pub dims: Vec<Dimension>,
    /// Data variables by name.
    pub variables: BTreeMap<String, DataVariable>,
    /// Global attributes.
    pub attrs: BTreeMap<String, String>,
}

impl Dataset {
    /// Empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a dimension.
    pub fn add_dimension(&mut self, name: impl Into<String>, len: usize) {
        self.dims.push(Dimension {
            name: name.into(),
            len,
        });
    }

    /// Look up a dimension by name.
    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dims.iter().find(|d| d.name == name)
    }

    /// Add a variable over previously declared dimensions.
    ///
    /// The data length must equal the product of the referenced dimension
    /// sizes; every referenced dimension must already be declared.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        dims: &[&str],
        data: Vec<f64>,
    ) -> Result<(), DatasetError> {
        let name = name.into();
        let mut shape = Vec::with_capacity(dims.len());
        for dim in dims {
            let d = self
                .dimension(dim)
                .ok_or_else(|| DatasetError::DimensionNotFound {
                    name: dim.to_string(),
                })?;
            shape.push(d.len);
        }
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(DatasetError::ShapeMismatch {
                variable: name,
                expected,
                actual: data.len(),
            });
        }
        self.variables.insert(
            name,
            DataVariable {
                dims: dims.iter().map(|d| d.to_string()).collect(),
                shape,
                data,
                attrs: BTreeMap::new(),
            },
        );
        Ok(())
    }

    /// Look up a variable by name.
    pub fn variable(&self, name: &str) -> Result<&DataVariable, DatasetError> {
        self.variables
            .get(name)
            .ok_or_else(|| DatasetError::VariableNotFound {
                name: name.to_string(),
            })
    }

    /// Mutable variable lookup.
    pub fn variable_mut(&mut self, name: &str) -> Result<&mut DataVariable, DatasetError> {
        self.variables
            .get_mut(name)
            .ok_or_else(|| DatasetError::VariableNotFound {
                name: name.to_string(),
            })
    }

    /// Missing-cell count of one variable.
    pub fn null_count(&self, variable: &str) -> Result<usize, DatasetError> {
        Ok(self.variable(variable)?.null_count())
    }

    /// Verify every variable against the declared dimensions.
    ///
    /// `add_variable` enforces this on construction, but the fields are
    /// public and decoded files arrive unchecked; stores call this after
    /// decode so corrupt-but-parseable input surfaces as an error instead
    /// of out-of-bounds indexing later.
    pub fn check_consistency(&self) -> Result<(), DatasetError> {
        for (name, var) in &self.variables {
            if var.dims.len() != var.shape.len() {
                return Err(DatasetError::Corrupt {
                    variable: name.clone(),
                    reason: format!(
                        "{} dimension names but {} shape entries",
                        var.dims.len(),
                        var.shape.len()
                    ),
                });
            }
            for (dim_name, &len) in var.dims.iter().zip(&var.shape) {
                match self.dimension(dim_name) {
                    None => {
                        return Err(DatasetError::DimensionNotFound {
                            name: dim_name.clone(),
                        })
                    }
                    Some(dim) if dim.len != len => {
                        return Err(DatasetError::Corrupt {
                            variable: name.clone(),
                            reason: format!(
                                "shape says {dim_name}={len} but the dimension has length {}",
                                dim.len
                            ),
                        })
                    }
                    Some(_) => {}
                }
            }
            let expected: usize = var.shape.iter().product();
            if expected != var.data.len() {
                return Err(DatasetError::ShapeMismatch {
                    variable: name.clone(),
                    expected,
                    actual: var.data.len(),
                });
            }
        }
        Ok(())
    }

    /// Merge attributes into the global attribute map, overwriting on
    /// key collision.
    pub fn merge_attrs(&mut self, attrs: &BTreeMap<String, String>) {
        for (k, v) in attrs {
            self.attrs.insert(k.clone(), v.clone());
        }
    }

    /// Snapshot of every variable's attributes, keyed by variable name.
    pub fn variable_attrs(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        self.variables
            .iter()
            .map(|(name, var)| (name.clone(), var.attrs.clone()))
            .collect()
    }

    /// Restore per-variable attributes from a snapshot, skipping variables
    /// that no longer exist. Existing keys are kept unless the snapshot
    /// overrides them.
    pub fn restore_variable_attrs(&mut self, snapshot: &BTreeMap<String, BTreeMap<String, String>>) {
        for (name, attrs) in snapshot {
            if let Some(var) = self.variables.get_mut(name) {
                for (k, v) in attrs {
                    var.attrs.insert(k.clone(), v.clone());
                }
            }
        }
    }
}

/// Serde shim storing `NaN` cells as JSON `null`.
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(data: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let cells: Vec<Option<f64>> = data
            .iter()
            .map(|v| if v.is_nan() { None } else { Some(*v) })
            .collect();
        cells.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let cells = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(cells.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2x3() -> Dataset {
        let mut ds = Dataset::new();
        ds.add_dimension("lat", 2);
        ds.add_dimension("lon", 3);
        ds.add_variable("tas", &["lat", "lon"], vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])
            .unwrap();
        ds
    }

    #[test]
    fn test_indexing() {
        let ds = grid_2x3();
        let var = ds.variable("tas").unwrap();
        assert_eq!(var.get(&[0, 0]), Some(0.0));
        assert_eq!(var.get(&[1, 2]), Some(5.0));
        assert_eq!(var.get(&[2, 0]), None);
        assert_eq!(var.get(&[0]), None);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut ds = Dataset::new();
        ds.add_dimension("lat", 2);
        let err = ds.add_variable("tas", &["lat"], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::ShapeMismatch {
                expected: 2,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_dimension_rejected() {
        let mut ds = Dataset::new();
        let err = ds.add_variable("tas", &["lat"], vec![]).unwrap_err();
        assert!(matches!(err, DatasetError::DimensionNotFound { .. }));
    }

    #[test]
    fn test_null_count() {
        let mut ds = grid_2x3();
        assert_eq!(ds.null_count("tas").unwrap(), 0);
        ds.variable_mut("tas").unwrap().set(&[0, 1], f64::NAN);
        assert_eq!(ds.null_count("tas").unwrap(), 1);
    }

    #[test]
    fn test_attr_snapshot_restore() {
        let mut ds = grid_2x3();
        ds.variable_mut("tas")
            .unwrap()
            .attrs
            .insert("units".into(), "K".into());
        let snapshot = ds.variable_attrs();

        // Simulate a transform that drops variable attrs.
        ds.variable_mut("tas").unwrap().attrs.clear();
        ds.restore_variable_attrs(&snapshot);
        assert_eq!(
            ds.variable("tas").unwrap().attrs.get("units").map(String::as_str),
            Some("K")
        );
    }

    #[test]
    fn test_check_consistency_catches_tampered_fields() {
        let mut ds = grid_2x3();
        assert!(ds.check_consistency().is_ok());

        // Declared shape no longer matches the data length.
        ds.variables.get_mut("tas").unwrap().data.truncate(2);
        assert!(matches!(
            ds.check_consistency().unwrap_err(),
            DatasetError::ShapeMismatch {
                expected: 6,
                actual: 2,
                ..
            }
        ));

        let mut ds = grid_2x3();
        ds.variables.get_mut("tas").unwrap().shape = vec![2, 4];
        assert!(matches!(
            ds.check_consistency().unwrap_err(),
            DatasetError::Corrupt { .. }
        ));

        let mut ds = grid_2x3();
        ds.variables.get_mut("tas").unwrap().dims = vec!["lat".into()];
        assert!(matches!(
            ds.check_consistency().unwrap_err(),
            DatasetError::Corrupt { .. }
        ));
    }

    #[test]
    fn test_nan_survives_json() {
        let mut ds = grid_2x3();
        ds.variable_mut("tas").unwrap().set(&[1, 1], f64::NAN);
        let json = serde_json::to_string(&ds).unwrap();
        let back: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back.null_count("tas").unwrap(), 1);
        assert_eq!(back.variable("tas").unwrap().get(&[1, 2]), Some(5.0));
    }
}
