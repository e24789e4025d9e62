use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

mod cli_bin;

use cli_bin::args::Cli;
use cli_bin::commands::migrate_command;

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };

    // RUST_LOG, when set, overrides the flag-derived level
    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    migrate_command(&cli)
}
