//! Restore the artifact cache and start the HTTP API

use clap::Args;
use color_eyre::eyre::{eyre, Result};
use console::style;

use super::DatabaseArgs;
use crate::server::ServerConfig;

/// Restore the artifact cache and start the HTTP API
#[derive(Args)]
pub struct ServeCommand {
    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to PORT, then 63500)
    #[arg(long, short)]
    pub port: Option<u16>,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

impl ServeCommand {
    pub async fn run(self) -> Result<()> {
        let config = self.db.load_config()?;
        let server_config = ServerConfig {
            host: config.host(self.host.as_deref()),
            port: config.port(self.port)?,
            request_timeout: config.request_timeout(),
        };

        // Fail fast: no listener until every product is cached
        println!("{} Restoring artifacts...", style("→").blue());
        let store = self.db.restore(&config).await?;
        println!(
            "{} Cached {} product(s)",
            style("✓").green(),
            store.len()
        );
        println!();
        println!(
            "  {} API: {}",
            style("◆").cyan(),
            style(format!(
                "http://{}:{}/api",
                server_config.host, server_config.port
            ))
            .underlined()
            .cyan()
        );
        println!();
        println!("  Press {} to stop the server", style("Ctrl+C").yellow());
        println!();

        crate::server::run_server(store, server_config)
            .await
            .map_err(|e| eyre!("Server error: {}", e))?;

        Ok(())
    }
}
