use clap::Parser;
use std::path::PathBuf;
use storefront_scraper::{scrape_to_csv, HttpFetcher, ShopName};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

/// Scrape a shop's new arrivals listing and product pages into a CSV file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Shop to scrape
    #[arg(value_enum)]
    shop: ShopName,

    /// Output file, defaults to `<shop>.csv`
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let args = Args::parse();
    let shop = args.shop.shop();
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.csv", shop.name())));

    let fetcher = HttpFetcher::new()?;
    scrape_to_csv(shop, &fetcher, &output).await?;

    Ok(())
}
