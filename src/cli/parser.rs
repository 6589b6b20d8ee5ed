//! Command line argument parsing.

use clap::{Parser, Subcommand};

/// Washhub car-wash marketplace backend
#[derive(Debug, Parser)]
#[command(name = "washhub", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Run pending database migrations and exit
    Migrate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn subcommands_parse() {
        let cli = Cli::parse_from(["washhub", "serve"]);
        assert!(matches!(cli.command, Some(Commands::Serve)));

        let cli = Cli::parse_from(["washhub", "migrate"]);
        assert!(matches!(cli.command, Some(Commands::Migrate)));

        let cli = Cli::parse_from(["washhub"]);
        assert!(cli.command.is_none());
    }
}
