use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use crate::errors::SnapshotError;
use crate::models::owm_forecast::RawForecastPayload;
use crate::units::UnitPreference;

/// Units the snapshot payload was fetched in, kept in a sidecar file so that the payload
/// file itself stays exactly what the API returned
#[derive(Serialize, Deserialize)]
struct SnapshotMeta {
    units: UnitPreference,
}

/// A loaded snapshot
#[derive(Clone, PartialEq, Debug)]
pub struct Snapshot {
    pub payload: RawForecastPayload,
    /// None if the sidecar is missing or unreadable
    pub units: Option<UnitPreference>,
}

/// Keeps the most recently fetched raw forecast payload in a single file.
///
/// There is no versioning or expiry, every save replaces the previous snapshot and the last
/// writer wins.
pub struct SnapshotStore {
    path: PathBuf,
    meta_path: PathBuf,
}

impl SnapshotStore {
    /// Returns a SnapshotStore backed by the given file
    ///
    /// # Arguments
    ///
    /// * 'path' - path to the snapshot file, its directory is created on first save
    pub fn new<P: AsRef<Path>>(path: P) -> SnapshotStore {
        let path = path.as_ref().to_path_buf();
        let meta_path = with_suffix(&path, ".units.json");

        Self { path, meta_path }
    }

    /// Saves a payload, unconditionally overwriting any existing snapshot.
    ///
    /// The payload is written verbatim, the units it was fetched in go to the sidecar file.
    /// Both are written to sibling temporary files that are then renamed into place, so a
    /// reader sees either the old or the new document.
    ///
    /// # Arguments
    ///
    /// * 'payload' - the raw payload to persist
    /// * 'units' - the unit preference the payload was requested with
    pub fn save_snapshot(&self, payload: &RawForecastPayload, units: UnitPreference) -> Result<(), SnapshotError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        replace_file(&self.path, serde_json::to_string_pretty(payload)?)?;
        replace_file(&self.meta_path, serde_json::to_string(&SnapshotMeta { units })?)?;

        debug!("snapshot saved to {}", self.path.display());
        Ok(())
    }

    /// Loads the snapshot if there is one
    pub fn load_fallback(&self) -> Result<Option<Snapshot>, SnapshotError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)?;
        let payload: RawForecastPayload = serde_json::from_str(&json)?;

        let units = match fs::read_to_string(&self.meta_path) {
            Ok(json) => match serde_json::from_str::<SnapshotMeta>(&json) {
                Ok(meta) => Some(meta.units),
                Err(e) => {
                    warn!("unreadable snapshot units in {}: {}", self.meta_path.display(), e);
                    None
                }
            },
            Err(_) => None,
        };

        debug!("snapshot loaded from {}", self.path.display());
        Ok(Some(Snapshot { payload, units }))
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut p = path.to_path_buf().into_os_string();
    p.push(suffix);
    PathBuf::from(p)
}

fn replace_file(path: &Path, contents: String) -> Result<(), SnapshotError> {
    let tmp = with_suffix(path, ".tmp");

    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;

    Ok(())
}
