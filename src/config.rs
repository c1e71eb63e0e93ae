use crate::cli::Cli;
use crate::error::{ChangerError, Result};
use crate::transfer::TransferOptions;
use std::path::PathBuf;

/// Resolved per-invocation configuration. Built once from the CLI and passed
/// by reference; nothing here is globally mutable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote root acting as the library; slot `n` stores its volume under
    /// `<changer_root>/n/`.
    pub changer_root: String,
    pub slot_count: u32,
    pub vtape_prefix: String,
    pub lock_file: PathBuf,
    pub state_file: PathBuf,
    pub transfer: TransferOptions,
}

impl Config {
    pub fn from_cli(args: &Cli) -> Result<Self> {
        if args.slots == 0 {
            return Err(ChangerError::parameter_validation(
                "slot count must be at least 1",
            ));
        }

        let changer_root = args.changer_device.trim_end_matches('/').to_string();
        if changer_root.is_empty() {
            return Err(ChangerError::parameter_validation(
                "changer device must not be empty",
            ));
        }

        Ok(Self {
            changer_root,
            slot_count: args.slots,
            vtape_prefix: args.prefix.clone(),
            lock_file: args.lockfile.clone().unwrap_or_else(default_lock_file),
            state_file: args.statefile.clone().unwrap_or_else(default_state_file),
            transfer: TransferOptions {
                binary: args.transfer_bin.clone(),
                config: args.transfer_config.clone(),
                log_file: args.transfer_log.clone(),
                extra_args: args
                    .transfer_opts
                    .split_whitespace()
                    .map(str::to_string)
                    .collect(),
            },
        })
    }
}

fn default_lock_file() -> PathBuf {
    std::env::temp_dir().join("rustvchanger.lock")
}

fn default_state_file() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("rustvchanger")
        .join("state.json")
}
