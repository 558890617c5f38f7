use clap::Args;
use color_eyre::eyre::Result;
use gaf_core::Error;

use super::DatabaseArgs;

/// Print one product's artifact as JSON
#[derive(Args)]
pub struct GetCommand {
    /// Product id, e.g. BTC-USD
    pub product: String,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

impl GetCommand {
    pub async fn run(self) -> Result<()> {
        let config = self.db.load_config()?;
        let store = self.db.restore(&config).await?;

        let artifact = store
            .refresh(&self.product)
            .await?
            .ok_or_else(|| Error::ArtifactNotFound(self.product.clone()))?;

        // Plain JSON for easy piping: gaf get BTC-USD | jq .size
        println!("{}", serde_json::to_string_pretty(&artifact.view())?);
        Ok(())
    }
}
