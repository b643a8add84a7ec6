//! CLI subcommand definitions

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Start the refresh timer (default)
    Run,
    /// Show the derived lock state without touching the network
    Inspect,
}
