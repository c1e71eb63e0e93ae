use crate::error::{ChangerError, Result};
use crate::state::ChangerState;
use crate::transfer::Transfer;
use crate::utils::path_to_string;
use std::path::Path;
use tracing::{debug, info, warn};

/// The emulated autoloader: one drive (a local virtual tape file) and
/// `slot_count` slots living under a remote root. Load and unload move the
/// volume image between the two; the state tracks which slot is in the
/// drive.
pub struct Changer<T: Transfer> {
    transfer: T,
    changer_root: String,
    state: ChangerState,
}

impl<T: Transfer> Changer<T> {
    pub fn new(transfer: T, changer_root: &str, state: ChangerState) -> Self {
        Self {
            transfer,
            changer_root: changer_root.trim_end_matches('/').to_string(),
            state,
        }
    }

    /// Current state, for persisting after a successful operation.
    pub fn state(&self) -> ChangerState {
        self.state
    }

    /// Slot currently in the drive, 0 when the drive is empty.
    pub fn loaded_slot(&self) -> u32 {
        self.state.loaded_slot
    }

    /// Remote directory holding a slot's volume.
    fn slot_location(&self, slot: u32) -> String {
        format!("{}/{}", self.changer_root, slot)
    }

    /// Remote path of the volume file a slot stores for this drive.
    fn remote_volume(&self, slot: u32, archive: &Path) -> Result<String> {
        let name = archive.file_name().ok_or_else(|| {
            ChangerError::parameter_validation(format!(
                "archive device {} has no file name",
                archive.display()
            ))
        })?;
        Ok(format!(
            "{}/{}/{}",
            self.changer_root,
            slot,
            name.to_string_lossy()
        ))
    }

    /// Place the volume of `slot` into the drive.
    ///
    /// A drive that still holds another slot is unloaded first, the way a
    /// physical changer refuses to push a second cartridge into an occupied
    /// drive. Loading the slot that is already in the drive is a no-op.
    pub async fn load(&mut self, slot: u32, archive: &Path) -> Result<()> {
        if let Some(current) = self.state.loaded() {
            if current == slot {
                info!("Slot {} is already in the drive, nothing to do", slot);
                return Ok(());
            }
            warn!(
                "Drive still holds slot {}, unloading it before loading slot {}",
                current, slot
            );
            self.unload(current, archive).await?;
        }

        let source = self.remote_volume(slot, archive)?;
        let destination = local_destination(archive);

        if self.transfer.exists(&source).await? {
            info!("Loading slot {}: fetching {}", slot, source);
            self.transfer.copy(&source, &destination).await?;
        } else {
            info!(
                "Loading slot {}: no stored volume, starting a blank one",
                slot
            );
            // Create/truncate in place; the existing file is never removed.
            tokio::fs::File::create(archive).await?;
        }

        self.state.set_loaded(slot);
        debug!("Drive now holds slot {}", slot);
        Ok(())
    }

    /// Return the drive's volume to `slot` and empty the drive.
    ///
    /// Only the slot that is actually in the drive can be unloaded. The
    /// local file is truncated only after the remote copy succeeded; a
    /// failed transfer leaves both the file and the state untouched.
    pub async fn unload(&mut self, slot: u32, archive: &Path) -> Result<()> {
        match self.state.loaded() {
            Some(current) if current == slot => {}
            Some(current) => {
                return Err(ChangerError::invalid_state(format!(
                    "cannot unload slot {}: drive holds slot {}",
                    slot, current
                )))
            }
            None => {
                return Err(ChangerError::invalid_state(format!(
                    "cannot unload slot {}: drive is empty",
                    slot
                )))
            }
        }

        let destination = self.slot_location(slot);
        info!("Unloading slot {}: storing volume to {}", slot, destination);
        self.transfer
            .copy(&path_to_string(archive), &destination)
            .await?;

        tokio::fs::File::create(archive).await?;
        self.state.clear();
        debug!("Drive is empty");
        Ok(())
    }
}

/// Local directory the transfer tool drops a fetched volume into: the
/// directory containing the archive device file.
fn local_destination(archive: &Path) -> String {
    match archive.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => path_to_string(parent),
        _ => ".".to_string(),
    }
}

/// Lazy catalog of every slot and its volume label, `1..=slot_count` in
/// ascending order. Labels are zero-padded to five digits.
pub fn slot_labels(slot_count: u32, prefix: &str) -> impl Iterator<Item = (u32, String)> + '_ {
    (1..=slot_count).map(move |slot| (slot, format!("{}-{:05}", prefix, slot)))
}
