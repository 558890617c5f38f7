//! List all cached products

use clap::Args;
use color_eyre::eyre::Result;
use console::style;

use super::DatabaseArgs;

/// List every cached product
#[derive(Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

impl ListCommand {
    pub async fn run(self) -> Result<()> {
        let config = self.db.load_config()?;
        let store = self.db.restore(&config).await?;

        if store.is_empty() {
            println!("No products found.");
            println!(
                "Run {} and let the calculate job populate it.",
                style("gaf init").yellow()
            );
            return Ok(());
        }

        println!(
            "{:<16} {:<8} {:<10} {:<18} {:<8}",
            "Product", "Size", "Max Size", "Midpoint", "Images"
        );
        println!("{}", "-".repeat(64));

        for product in store.products() {
            let Some(artifact) = store.retrieve(&product) else {
                continue;
            };
            let view = artifact.view();
            let images = view.midpoint_images.len()
                + view.ask_price_images.len()
                + view.bid_price_images.len();

            println!(
                "{:<16} {:<8} {:<10} {:<18} {:<8}",
                view.product,
                view.size,
                view.max_size,
                view.midpoint
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                images
            );
        }

        println!();
        println!("Total: {} product(s)", store.len());

        Ok(())
    }
}
