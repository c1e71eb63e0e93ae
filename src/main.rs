mod changer;
mod cli;
mod commands;
mod config;
mod error;
mod lock;
mod logger;
mod state;
mod transfer;
mod utils;

use crate::changer::Changer;
use crate::cli::Cli;
use crate::commands::Command;
use crate::config::Config;
use crate::error::Result;
use crate::lock::RunLock;
use crate::state::StateStore;
use crate::transfer::TransferClient;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse_args();

    // Initialize logging system
    logger::init(args.verbose, args.logfile.as_deref())?;

    debug!("rustvchanger starting");

    match run(args).await {
        Ok(_) => {
            info!("Operation completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Operation failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(args: Cli) -> Result<()> {
    // Resolve the command and configuration before touching any state.
    let command = Command::from_name(&args.command)?;
    let config = Config::from_cli(&args)?;

    // One changer invocation at a time on this host.
    let _run_lock = RunLock::acquire(&config.lock_file)?;

    let store = StateStore::new(&config.state_file);
    let state = store.load();

    let client = TransferClient::new(config.transfer.clone());
    let mut changer = Changer::new(client, &config.changer_root, state);

    commands::dispatch(
        command,
        &mut changer,
        &config,
        args.slot,
        args.archive_device.as_deref(),
    )
    .await?;

    // Persist only after the handler succeeded; a failed operation leaves
    // the previously saved state authoritative.
    store.save(&changer.state())?;
    Ok(())
}
