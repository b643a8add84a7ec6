mod app;
mod cli;
mod config;
mod consts;
mod error;
mod lock;
mod page;
mod utils;

use clap::Parser;

use cli::{Cli, Commands};
use config::Config;
use utils::set_tick_debug;

fn main() {
    let cli = Cli::parse();

    // Keep stdout clean when the caller asked for JSON
    let config = if cli.json {
        Config::load_quiet()
    } else {
        Config::load()
    };
    let cli = cli.with_config(&config);

    set_tick_debug(cli.debug);

    let result = match &cli.command {
        Some(Commands::Inspect) => app::inspect(&cli),
        Some(Commands::Run) | None => app::run(&cli),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
