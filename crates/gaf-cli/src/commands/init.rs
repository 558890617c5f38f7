//! Create the storage schema for a fresh database

use clap::Args;
use color_eyre::eyre::Result;
use console::style;

use super::DatabaseArgs;

/// Create the crypto_gaf schema and tables if missing
#[derive(Args)]
pub struct InitCommand {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

impl InitCommand {
    pub async fn run(self) -> Result<()> {
        let config = self.db.load_config()?;
        let pool = self.db.connect(&config)?;

        pool.init_schema().await?;
        pool.close().await;

        println!("{} Initialized crypto_gaf schema", style("✓").green());
        println!();
        println!("Next steps:");
        println!(
            "  1. Insert one row per product into {}",
            style("crypto_gaf.gafs").cyan()
        );
        println!(
            "  2. Run {} to serve the artifacts",
            style("gaf serve").cyan()
        );

        Ok(())
    }
}
