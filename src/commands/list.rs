//! List Command Handler
//!
//! Prints `slot:label` for every slot in the library, in ascending order.

use crate::changer;
use crate::error::Result;

pub async fn execute(slot_count: u32, prefix: &str) -> Result<()> {
    for (slot, label) in changer::slot_labels(slot_count, prefix) {
        println!("{}:{}", slot, label);
    }
    Ok(())
}
