//! Loaded Command Handler
//!
//! Reports the slot currently in the drive, 0 when the drive is empty. The
//! backup daemon parses the single number on stdout.

use crate::changer::Changer;
use crate::error::Result;
use crate::transfer::Transfer;
use tracing::debug;

pub async fn execute<T: Transfer>(changer: &Changer<T>) -> Result<()> {
    let slot = changer.loaded_slot();
    debug!("Drive currently holds slot {}", slot);

    println!("{}", slot);
    Ok(())
}
