//! Slots Command Handler
//!
//! Reports the configured number of slots in the library.

use crate::error::Result;

pub async fn execute(slot_count: u32) -> Result<()> {
    println!("{}", slot_count);
    Ok(())
}
