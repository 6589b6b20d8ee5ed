//! Serve subcommand: runs the HTTP server until shutdown.

use crate::config::Settings;
use crate::server::Server;

pub async fn run(settings: Settings) -> anyhow::Result<()> {
    Server::new(settings).run().await
}
