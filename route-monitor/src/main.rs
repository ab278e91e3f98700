mod cli;
mod config;
mod monitor;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::load(cli.config.as_deref())?;
    log::debug!("Loaded config: {:?}", config);

    match cli.command {
        Commands::Report(args) => cli::commands::report::handle_report_command(args, &config),
    }
}
