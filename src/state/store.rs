use log::debug;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::RunState;
use crate::error::{Error, Result};

/// Durable JSON record of the next `(difficulty_index, trial)` to mine.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state. A missing record is a fresh start; an
    /// unreadable or malformed one is an error.
    pub fn load(&self) -> Result<RunState> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no run state at {}, starting fresh", self.path.display());
                return Ok(RunState::default());
            }
            Err(e) => return Err(Error::io(&self.path, e)),
        };

        let state: RunState =
            serde_json::from_slice(&bytes).map_err(|source| Error::CorruptState {
                path: self.path.clone(),
                source,
            })?;
        if state.trial == 0 {
            return Err(Error::InvalidState {
                path: self.path.clone(),
                message: "trial must be at least 1".into(),
            });
        }
        debug!("loaded run state {:?} from {}", state, self.path.display());
        Ok(state)
    }

    /// Overwrite the record. The JSON goes to a sibling temp file that is
    /// synced and renamed over the record, so readers never see half of it.
    pub fn save(&self, state: &RunState) -> Result<()> {
        let tmp = self.tmp_path();
        let json = serde_json::to_vec(state).map_err(|e| Error::io(&tmp, e.into()))?;

        let mut file = File::create(&tmp).map_err(|e| Error::io(&tmp, e))?;
        file.write_all(&json).map_err(|e| Error::io(&tmp, e))?;
        file.sync_all().map_err(|e| Error::io(&tmp, e))?;
        drop(file);

        fs::rename(&tmp, &self.path).map_err(|e| Error::io(&self.path, e))?;
        debug!("saved run state {:?} to {}", state, self.path.display());
        Ok(())
    }

    /// Put the record back to `(0, 1)`.
    pub fn reset(&self) -> Result<()> {
        self.save(&RunState::default())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}
