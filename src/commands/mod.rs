//! Command Handlers Module
//!
//! One handler per changer operation, plus the name-to-handler mapping the
//! backup daemon's positional protocol requires.

pub mod list;
pub mod load;
pub mod loaded;
pub mod slots;
pub mod unload;

use crate::changer::Changer;
use crate::config::Config;
use crate::error::{ChangerError, Result};
use crate::transfer::Transfer;
use std::path::Path;

/// The fixed set of changer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Loaded,
    Load,
    Unload,
    List,
    Slots,
}

impl Command {
    /// Resolves a command name before any lock or state access happens.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "loaded" => Ok(Self::Loaded),
            "load" => Ok(Self::Load),
            "unload" => Ok(Self::Unload),
            "list" => Ok(Self::List),
            "slots" => Ok(Self::Slots),
            other => Err(ChangerError::unknown_command(other.to_string())),
        }
    }
}

/// Invokes the handler for `command`. Exactly one handler runs per
/// invocation, synchronously to completion.
pub async fn dispatch<T: Transfer>(
    command: Command,
    changer: &mut Changer<T>,
    config: &Config,
    slot: Option<u32>,
    archive: Option<&Path>,
) -> Result<()> {
    match command {
        Command::Loaded => loaded::execute(changer).await,
        Command::Load => {
            let slot = require_slot(slot, config.slot_count)?;
            let archive = require_archive(archive)?;
            load::execute(changer, slot, archive).await
        }
        Command::Unload => {
            let slot = require_slot(slot, config.slot_count)?;
            let archive = require_archive(archive)?;
            unload::execute(changer, slot, archive).await
        }
        Command::List => list::execute(config.slot_count, &config.vtape_prefix).await,
        Command::Slots => slots::execute(config.slot_count).await,
    }
}

fn require_slot(slot: Option<u32>, slot_count: u32) -> Result<u32> {
    let slot = slot.ok_or_else(|| {
        ChangerError::parameter_validation("slot number is required for this command")
    })?;
    if slot < 1 || slot > slot_count {
        return Err(ChangerError::parameter_validation(format!(
            "slot {} is outside the library (valid slots are 1..={})",
            slot, slot_count
        )));
    }
    Ok(slot)
}

fn require_archive(archive: Option<&Path>) -> Result<&Path> {
    archive.ok_or_else(|| {
        ChangerError::parameter_validation("archive device path is required for this command")
    })
}
