//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the
//! registry and services. Nothing in the core reads environment variables
//! during request handling; the binary is responsible for translating its
//! environment into a `CoreConfig`.

use crate::{HospitalError, HospitalResult};
use std::path::{Path, PathBuf};

/// Number of beds provisioned by default when the pool is empty at startup.
pub const DEFAULT_SEED_BED_COUNT: usize = 50;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: Option<PathBuf>,
    seed_bed_count: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// When `data_dir` is `Some`, the directory must already exist; the
    /// registry will read and write JSON snapshots under it. When `None`,
    /// state is kept in memory only.
    pub fn new(data_dir: Option<PathBuf>, seed_bed_count: usize) -> HospitalResult<Self> {
        if let Some(dir) = &data_dir {
            if !dir.is_dir() {
                return Err(HospitalError::Validation(format!(
                    "data directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        Ok(Self {
            data_dir,
            seed_bed_count,
        })
    }

    /// In-memory configuration with no snapshot persistence and no seeding.
    pub fn in_memory() -> Self {
        Self {
            data_dir: None,
            seed_bed_count: 0,
        }
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn seed_bed_count(&self) -> usize {
        self.seed_bed_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_data_dir() {
        let result = CoreConfig::new(Some(PathBuf::from("/definitely/not/a/real/dir")), 0);
        assert!(matches!(result, Err(HospitalError::Validation(_))));
    }

    #[test]
    fn accepts_existing_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = CoreConfig::new(Some(dir.path().to_path_buf()), 10).expect("config");
        assert_eq!(cfg.seed_bed_count(), 10);
        assert_eq!(cfg.data_dir(), Some(dir.path()));
    }
}
