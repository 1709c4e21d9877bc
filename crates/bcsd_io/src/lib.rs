// crates/bcsd_io/src/lib.rs

//! IO layer of the BCSD reformatting workspace.
//!
//! # Modules
//!
//! - [`dataset`]: in-memory dataset model (dimensions, variables, attrs)
//! - [`store`]: the `DatasetStore` seam plus JSON and in-memory backends
//! - [`netcdf_store`]: NetCDF backend (feature `netcdf`)
//! - [`sidecar`]: plain-text attribute header writer
//!
//! # Optional dependencies
//!
//! - `netcdf`: enables the NetCDF driver; everything else works against
//!   the `DatasetStore` trait without the native library.

pub mod dataset;
pub mod error;
pub mod netcdf_store;
pub mod sidecar;
pub mod store;

pub use dataset::{DataVariable, Dataset, Dimension};
pub use error::{DatasetError, IoResult};
pub use sidecar::{render_header, sidecar_path, write_sidecar, SIDECAR_EXTENSION};
pub use store::{DatasetStore, JsonStore, MemoryStore};

#[cfg(feature = "netcdf")]
pub use netcdf_store::NetCdfStore;
