use crate::commands::Commands;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "rewards")]
#[command(about = "Rewards hub: points, daily streaks, referrals and redemptions")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Config directory (defaults to RH_CONFIG_DIR, then the platform config dir)
    #[arg(long, global = true)]
    pub(crate) config_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub(crate) pretty: bool,
}
