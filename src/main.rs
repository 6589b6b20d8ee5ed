use clap::Parser;

use washhub::cli::{self, Cli};
use washhub::config::ConfigLoader;
use washhub::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loader = ConfigLoader::new()?;
    let settings = loader.load()?;

    init_logger(&settings.logger)?;

    cli::execute(cli, settings).await
}
