//! Load Command Handler
//!
//! Moves a slot's volume into the drive. Prints nothing; the exit status is
//! the result.

use crate::changer::Changer;
use crate::error::Result;
use crate::transfer::Transfer;
use std::path::Path;
use tracing::info;

pub async fn execute<T: Transfer>(
    changer: &mut Changer<T>,
    slot: u32,
    archive: &Path,
) -> Result<()> {
    info!("Load requested: slot {} -> {}", slot, archive.display());
    changer.load(slot, archive).await
}
