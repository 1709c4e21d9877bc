// crates/bcsd_io/src/store.rs

//! The `DatasetStore` seam and the two built-in backends.
//!
//! The pipeline never touches an array-file library directly; it talks to
//! a `DatasetStore`. `JsonStore` persists datasets as JSON on the real
//! filesystem and is the default backend when the `netcdf` feature is
//! off. `MemoryStore` keeps a virtual filesystem in memory for tests.

use crate::dataset::Dataset;
use crate::error::DatasetError;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage backend abstraction over one array-file format.
pub trait DatasetStore {
    /// Open a file and load it fully into memory.
    fn open(&self, path: &Path) -> Result<Dataset, DatasetError>;

    /// Write a dataset to a file, replacing any existing content.
    fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), DatasetError>;

    /// Whether a file exists at the path.
    fn exists(&self, path: &Path) -> bool;

    /// Recursively create a directory.
    fn create_dir_all(&self, path: &Path) -> Result<(), DatasetError>;

    /// Atomically move a file onto its final path.
    fn rename(&self, from: &Path, to: &Path) -> Result<(), DatasetError>;
}

/// JSON-on-disk backend.
///
/// One dataset per file, serialized with serde_json. Slow and verbose but
/// dependency-free, which keeps local runs and integration tests off the
/// native NetCDF library.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonStore;

impl JsonStore {
    /// New JSON backend.
    pub fn new() -> Self {
        Self
    }
}

impl DatasetStore for JsonStore {
    fn open(&self, path: &Path) -> Result<Dataset, DatasetError> {
        let file = fs::File::open(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                DatasetError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                DatasetError::Open {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })?;
        let dataset: Dataset = serde_json::from_reader(std::io::BufReader::new(file)).map_err(
            |e| DatasetError::Open {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        )?;
        dataset
            .check_consistency()
            .map_err(|e| DatasetError::Open {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(dataset)
    }

    fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), DatasetError> {
        let file = fs::File::create(path).map_err(|e| DatasetError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::to_writer(std::io::BufWriter::new(file), dataset).map_err(|e| {
            DatasetError::Write {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })
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

/// In-memory virtual filesystem backend for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    files: HashMap<PathBuf, Dataset>,
    dirs: HashSet<PathBuf>,
    reads: usize,
    writes: usize,
}

impl MemoryStore {
    /// Empty virtual filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, bypassing the write counter.
    pub fn insert(&self, path: impl Into<PathBuf>, dataset: Dataset) {
        self.inner.lock().files.insert(path.into(), dataset);
    }

    /// Clone of the dataset at a path, if any.
    pub fn get(&self, path: &Path) -> Option<Dataset> {
        self.inner.lock().files.get(path).cloned()
    }

    /// Number of `open` calls served so far.
    pub fn reads(&self) -> usize {
        self.inner.lock().reads
    }

    /// Number of `write` calls served so far.
    pub fn writes(&self) -> usize {
        self.inner.lock().writes
    }

    /// Whether a directory was created for the path.
    pub fn has_dir(&self, path: &Path) -> bool {
        self.inner.lock().dirs.contains(path)
    }
}

impl DatasetStore for MemoryStore {
    fn open(&self, path: &Path) -> Result<Dataset, DatasetError> {
        let mut inner = self.inner.lock();
        inner.reads += 1;
        let dataset = inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| DatasetError::FileNotFound {
                path: path.to_path_buf(),
            })?;
        // Seeded files bypass `write`, so check here like a real decode.
        dataset.check_consistency()?;
        Ok(dataset)
    }

    fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), DatasetError> {
        let mut inner = self.inner.lock();
        inner.writes += 1;
        inner.files.insert(path.to_path_buf(), dataset.clone());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.lock().files.contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), DatasetError> {
        self.inner.lock().dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), DatasetError> {
        let mut inner = self.inner.lock();
        match inner.files.remove(from) {
            Some(ds) => {
                inner.files.insert(to.to_path_buf(), ds);
                Ok(())
            }
            None => Err(DatasetError::Rename {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source: std::io::Error::new(ErrorKind::NotFound, "no such file"),
            }),
        }
    }
}
