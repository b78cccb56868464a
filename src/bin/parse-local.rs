use clap::Parser;
use scraper::Html;
use std::path::PathBuf;
use storefront_scraper::ShopName;

/// Run a shop's extraction rules against a saved HTML file.
#[derive(Debug, Parser)]
#[command(about)]
struct Args {
    #[arg(value_enum)]
    shop: ShopName,

    /// Saved listing page, or detail page with `--detail`
    file: PathBuf,

    /// Treat the file as a product detail page
    #[arg(long)]
    detail: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let shop = args.shop.shop();
    let html = std::fs::read_to_string(&args.file)?;
    let doc = Html::parse_document(&html);

    if args.detail {
        match shop.extract_detail(&doc) {
            Some(text) => println!("{}", text),
            None => println!("No detail text found"),
        }
        return Ok(());
    }

    let records = shop.parse_listing(&doc);
    for record in &records {
        println!("{}", record);
    }
    println!("==== {} products ====", records.len());

    Ok(())
}
