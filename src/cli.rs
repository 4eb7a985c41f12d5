use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sysmaint", about = "Apt maintenance runner", version)]
pub struct Cli {
    /// Print results as JSON instead of decorated text
    #[arg(long, global = true)]
    pub json: bool,

    /// Undecorated output (no colors, panels, or spinners)
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// With no subcommand, sysmaint runs the full pipeline: check, then
/// upgrade, fix-broken, and autoremove if anything is pending.
#[derive(Subcommand)]
pub enum Command {
    /// Query apt for pending upgrades and removable packages (read-only)
    Check,
    /// Show current CPU and memory usage
    Info,
}
