// crates/bcsd_io/src/netcdf_store.rs

//! NetCDF storage backend, behind the `netcdf` feature.
//!
//! Loads files fully into memory and translates between the format's
//! fill-value convention and the in-memory NaN convention. String
//! attributes pass through; numeric attributes are stringified.

#![cfg(feature = "netcdf")]

use crate::dataset::Dataset;
use crate::error::DatasetError;
use crate::store::DatasetStore;
use std::fs;
use std::path::Path;

/// Default fill value for doubles (CF convention).
pub const FILL_VALUE_F64: f64 = 9.969_209_968_386_87e36;

/// Whether a stored value is real data rather than a fill value.
#[inline]
fn is_valid(v: f64) -> bool {
    v.is_finite() && v.abs() < 1.0e30
}

fn attr_to_string(value: netcdf::AttributeValue) -> String {
    match value {
        netcdf::AttributeValue::Str(s) => s,
        netcdf::AttributeValue::Double(v) => v.to_string(),
        netcdf::AttributeValue::Float(v) => v.to_string(),
        netcdf::AttributeValue::Int(v) => v.to_string(),
        netcdf::AttributeValue::Longlong(v) => v.to_string(),
        netcdf::AttributeValue::Short(v) => v.to_string(),
        netcdf::AttributeValue::Uchar(v) => v.to_string(),
        other => format!("{other:?}"),
    }
}

/// NetCDF backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct NetCdfStore;

impl NetCdfStore {
    /// New NetCDF backend.
    pub fn new() -> Self {
        Self
    }
}

impl DatasetStore for NetCdfStore {
    fn open(&self, path: &Path) -> Result<Dataset, DatasetError> {
        if !path.exists() {
            return Err(DatasetError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = netcdf::open(path)?;

        let mut ds = Dataset::new();
        for dim in file.dimensions() {
            ds.add_dimension(dim.name(), dim.len());
        }

        for var in file.variables() {
            let dim_names: Vec<String> =
                var.dimensions().iter().map(|d| d.name().to_string()).collect();
            let dim_refs: Vec<&str> = dim_names.iter().map(String::as_str).collect();

            let mut data: Vec<f64> = var.get_values::<f64, _>(..)?;
            for v in &mut data {
                if !is_valid(*v) {
                    *v = f64::NAN;
                }
            }
            ds.add_variable(var.name(), &dim_refs, data)?;

            let attrs = &mut ds.variable_mut(&var.name())?.attrs;
            for attr in var.attributes() {
                attrs.insert(attr.name().to_string(), attr_to_string(attr.value()?));
            }
        }

        for attr in file.attributes() {
            ds.attrs
                .insert(attr.name().to_string(), attr_to_string(attr.value()?));
        }

        Ok(ds)
    }

    fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), DatasetError> {
        let mut file = netcdf::create(path)?;

        for dim in &dataset.dims {
            file.add_dimension(&dim.name, dim.len)?;
        }

        for (name, var) in &dataset.variables {
            let dim_refs: Vec<&str> = var.dims.iter().map(String::as_str).collect();
            let mut nc_var = file.add_variable::<f64>(name, &dim_refs)?;

            for (k, v) in &var.attrs {
                nc_var.put_attribute(k.as_str(), v.as_str())?;
            }
            nc_var.put_attribute("_FillValue", FILL_VALUE_F64)?;

            let data: Vec<f64> = var
                .data
                .iter()
                .map(|v| if v.is_nan() { FILL_VALUE_F64 } else { *v })
                .collect();
            nc_var.put_values(&data, ..)?;
        }

        for (k, v) in &dataset.attrs {
            file.add_attribute(k.as_str(), v.as_str())?;
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), DatasetError> {
        fs::create_dir_all(path)?;
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), DatasetError> {
        fs::rename(from, to).map_err(|source| DatasetError::Rename {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })
    }
}
