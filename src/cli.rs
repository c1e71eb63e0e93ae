use clap::Parser;
use std::path::PathBuf;

/// Changer control program for backup software. The daemon invokes it with
/// the positional protocol `CHANGER-DEVICE COMMAND SLOT ARCHIVE-DEVICE`.
#[derive(Parser)]
#[command(name = "rustvchanger")]
#[command(about = "Emulates a tape autochanger on top of a remote archive store")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Remote path acting as the changer library (e.g. remote:backup/changer)
    #[arg(value_name = "CHANGER-DEVICE")]
    pub changer_device: String,

    /// Changer operation: loaded, load, unload, list or slots
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Slot the operation applies to (required for load/unload)
    #[arg(value_name = "SLOT")]
    pub slot: Option<u32>,

    /// Local virtual tape file standing in for the drive
    #[arg(value_name = "ARCHIVE-DEVICE")]
    pub archive_device: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Lock file serializing changer invocations on this host
    #[arg(long, value_name = "FILE")]
    pub lockfile: Option<PathBuf>,

    /// Append log output to this file in addition to stderr
    #[arg(long, value_name = "FILE")]
    pub logfile: Option<PathBuf>,

    /// State file remembering which slot is in the drive
    #[arg(long, value_name = "FILE")]
    pub statefile: Option<PathBuf>,

    /// Transfer tool binary
    #[arg(long, value_name = "PATH", default_value = "rclone")]
    pub transfer_bin: PathBuf,

    /// Transfer tool configuration file
    #[arg(long, value_name = "FILE")]
    pub transfer_config: Option<PathBuf>,

    /// Transfer tool log file
    #[arg(long, value_name = "FILE")]
    pub transfer_log: Option<PathBuf>,

    /// Extra options passed to the transfer tool (space separated)
    #[arg(long, value_name = "OPTS", default_value = "", allow_hyphen_values = true)]
    pub transfer_opts: String,

    /// Number of slots in the emulated library
    #[arg(long, value_name = "N", default_value = "8192")]
    pub slots: u32,

    /// Label prefix for virtual tape volumes
    #[arg(long, value_name = "PREFIX", default_value = "VTAPE")]
    pub prefix: String,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
