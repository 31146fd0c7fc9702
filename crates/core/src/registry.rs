//! Shared record registry.
//!
//! The registry owns the three record collections behind a single
//! `RwLock`. Every workflow mutation runs inside one write-lock critical
//! section, which is what guarantees that at most one concurrent admission
//! can claim a given bed: the find-and-flip sequence is never interleaved.
//!
//! When a data directory is configured, each collection is mirrored to a
//! JSON snapshot after every successful mutation. Snapshot writes are
//! best-effort: a failed write is logged and does not fail the request.

use crate::{Bed, CoreConfig, HospitalError, HospitalResult, Patient, StaffMember};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use uuid::Uuid;

const BEDS_SNAPSHOT: &str = "beds.json";
const PATIENTS_SNAPSHOT: &str = "patients.json";
const STAFF_SNAPSHOT: &str = "staff.json";

/// The in-memory state. `BTreeMap` keeps iteration deterministic, which
/// makes snapshot files and tie-breaks stable.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct State {
    pub(crate) beds: BTreeMap<String, Bed>,
    pub(crate) patients: BTreeMap<Uuid, Patient>,
    pub(crate) staff: BTreeMap<Uuid, StaffMember>,
}

#[derive(Debug)]
pub struct Registry {
    state: RwLock<State>,
    data_dir: Option<PathBuf>,
}

impl Registry {
    /// Opens the registry, loading snapshots from the configured data
    /// directory when one is set.
    pub fn open(cfg: &CoreConfig) -> HospitalResult<Self> {
        let state = match cfg.data_dir() {
            Some(dir) => State {
                beds: load_snapshot(dir, BEDS_SNAPSHOT)?,
                patients: load_snapshot(dir, PATIENTS_SNAPSHOT)?,
                staff: load_snapshot(dir, STAFF_SNAPSHOT)?,
            },
            None => State::default(),
        };

        Ok(Self {
            state: RwLock::new(state),
            data_dir: cfg.data_dir().map(Path::to_path_buf),
        })
    }

    /// Empty in-memory registry, mainly for tests.
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(State::default()),
            data_dir: None,
        }
    }

    /// Read access to the state. A poisoned lock is recovered rather than
    /// propagated; a failed request must not take the service down with it.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `mutate` under the write lock and mirrors the state to disk on
    /// success.
    ///
    /// Callers must perform all validation before touching the state: a
    /// callback that returns `Err` after mutating would leave the mutation
    /// in memory.
    pub(crate) fn write_with<T>(
        &self,
        mutate: impl FnOnce(&mut State) -> HospitalResult<T>,
    ) -> HospitalResult<T> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let value = mutate(&mut state)?;

        if let Some(dir) = &self.data_dir {
            if let Err(err) = persist(dir, &state) {
                tracing::warn!("snapshot write failed: {err}");
            }
        }

        Ok(value)
    }
}

fn load_snapshot<K, V>(dir: &Path, name: &str) -> HospitalResult<BTreeMap<K, V>>
where
    K: Ord + serde::de::DeserializeOwned,
    V: serde::de::DeserializeOwned,
{
    let path = dir.join(name);
    if !path.is_file() {
        return Ok(BTreeMap::new());
    }

    let contents = std::fs::read_to_string(&path).map_err(HospitalError::SnapshotRead)?;
    serde_json::from_str(&contents).map_err(HospitalError::SnapshotDeserialize)
}

fn persist(dir: &Path, state: &State) -> HospitalResult<()> {
    write_snapshot(dir, BEDS_SNAPSHOT, &state.beds)?;
    write_snapshot(dir, PATIENTS_SNAPSHOT, &state.patients)?;
    write_snapshot(dir, STAFF_SNAPSHOT, &state.staff)?;
    Ok(())
}

fn write_snapshot<T: Serialize>(dir: &Path, name: &str, value: &T) -> HospitalResult<()> {
    let json = serde_json::to_vec_pretty(value).map_err(HospitalError::SnapshotSerialize)?;

    // Write-then-rename so a crash mid-write never leaves a truncated
    // snapshot behind.
    let tmp = dir.join(format!("{name}.tmp"));
    std::fs::write(&tmp, json).map_err(HospitalError::SnapshotWrite)?;
    std::fs::rename(&tmp, dir.join(name)).map_err(HospitalError::SnapshotWrite)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardline_types::BedType;

    #[test]
    fn round_trips_state_through_snapshots() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = CoreConfig::new(Some(dir.path().to_path_buf()), 0).expect("config");

        let registry = Registry::open(&cfg).expect("open empty");
        registry
            .write_with(|state| {
                state.beds.insert(
                    "B001".to_string(),
                    Bed::new("B001", "R100", BedType::General, "general"),
                );
                Ok(())
            })
            .expect("insert bed");

        let reopened = Registry::open(&cfg).expect("reopen");
        let state = reopened.read();
        assert_eq!(state.beds.len(), 1);
        assert_eq!(state.beds["B001"].room_number, "R100");
    }

    #[test]
    fn opens_empty_when_no_snapshots_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = CoreConfig::new(Some(dir.path().to_path_buf()), 0).expect("config");
        let registry = Registry::open(&cfg).expect("open");
        assert!(registry.read().beds.is_empty());
    }

    #[test]
    fn rejects_corrupt_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("beds.json"), "not json").expect("write");
        let cfg = CoreConfig::new(Some(dir.path().to_path_buf()), 0).expect("config");
        let result = Registry::open(&cfg);
        assert!(matches!(
            result,
            Err(HospitalError::SnapshotDeserialize(_))
        ));
    }
}
