use crate::error::{ChangerError, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use tracing::{debug, warn};

/// The one durable record: which slot is sitting in the drive.
/// Slot 0 is the empty sentinel; real slots start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChangerState {
    #[serde(default)]
    pub loaded_slot: u32,
}

impl ChangerState {
    pub fn empty() -> Self {
        Self { loaded_slot: 0 }
    }

    pub fn with_loaded(slot: u32) -> Self {
        Self { loaded_slot: slot }
    }

    pub fn loaded(&self) -> Option<u32> {
        if self.loaded_slot == 0 {
            None
        } else {
            Some(self.loaded_slot)
        }
    }

    pub fn set_loaded(&mut self, slot: u32) {
        self.loaded_slot = slot;
    }

    pub fn clear(&mut self) {
        self.loaded_slot = 0;
    }
}

/// Loads and saves the changer state file. Each read and write holds an
/// exclusive lock on the file itself, nested inside the run lock.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing or unreadable state file means an empty drive. That is the
    /// normal first-run situation, so it is a warning, not an error.
    pub fn load(&self) -> ChangerState {
        match self.read_state() {
            Ok(state) => {
                debug!(
                    "Loaded changer state from {}: slot {}",
                    self.path.display(),
                    state.loaded_slot
                );
                state
            }
            Err(e) => {
                warn!(
                    "Could not read state file {} ({}), assuming empty drive",
                    self.path.display(),
                    e
                );
                ChangerState::empty()
            }
        }
    }

    fn read_state(&self) -> Result<ChangerState> {
        let file = File::open(&self.path)?;
        file.lock_exclusive()?;
        serde_json::from_reader(&file).map_err(|e| {
            ChangerError::state(format!(
                "malformed state file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Overwrites the state file in full and syncs it to disk.
    pub fn save(&self, state: &ChangerState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)?;
        file.lock_exclusive()?;
        file.set_len(0)?;
        serde_json::to_writer_pretty(&file, state).map_err(|e| {
            ChangerError::state(format!("could not serialize changer state: {}", e))
        })?;
        file.sync_all()?;

        debug!(
            "Saved changer state to {}: slot {}",
            self.path.display(),
            state.loaded_slot
        );
        Ok(())
    }
}
