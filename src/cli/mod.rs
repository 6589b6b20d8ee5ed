//! Command line interface: parsing and subcommand dispatch.

pub mod handlers;
mod parser;

pub use parser::{Cli, Commands};

use crate::config::Settings;

/// Runs the selected subcommand. `serve` is the default.
pub async fn execute(cli: Cli, settings: Settings) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Migrate) => handlers::migrate::run(&settings),
        Some(Commands::Serve) | None => handlers::serve::run(settings).await,
    }
}
