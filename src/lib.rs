use reqwest::Url;
use scraper::Html;
use std::path::Path;
use tracing::{debug, info, warn};

pub mod detail;
pub mod fetch;
pub mod listing;
pub mod peppermayo;
pub mod reformation;
pub mod utils;

mod data;
mod error;

pub use data::{write_csv, write_csv_file, Price, ProductRecord, CSV_HEADER};
pub use detail::DetailExtractor;
pub use error::ScraperError;
pub use fetch::{Fetcher, HttpFetcher, Page};
pub use listing::ListingRules;

/// A source site: where its listing lives and how its pages are read.
pub trait Shop {
    fn name(&self) -> &'static str;
    fn base_url(&self) -> &Url;
    fn listing_url(&self) -> &str;
    fn listing_rules(&self) -> &ListingRules;
    fn detail_extractor(&self) -> &dyn DetailExtractor;

    fn parse_listing(&self, doc: &Html) -> Vec<ProductRecord> {
        self.listing_rules().parse(doc, self.base_url())
    }

    fn extract_detail(&self, doc: &Html) -> Option<String> {
        self.detail_extractor().extract(doc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ShopName {
    Reformation,
    Peppermayo,
}

impl ShopName {
    pub fn shop(self) -> &'static dyn Shop {
        match self {
            ShopName::Reformation => &reformation::Reformation,
            ShopName::Peppermayo => &peppermayo::Peppermayo,
        }
    }
}

/// Fetches the listing, then every product's detail page in listing order.
///
/// Only the listing request can fail the run. A failed detail request
/// leaves that product's `detail_text` empty.
pub async fn run_scraper<S, F>(
    shop: &S,
    fetcher: &F,
) -> Result<Vec<ProductRecord>, ScraperError>
where
    S: Shop + ?Sized,
    F: Fetcher + ?Sized,
{
    let html = fetcher.fetch(shop.listing_url(), Page::Listing).await?;
    let mut records = {
        let doc = Html::parse_document(&html);
        shop.parse_listing(&doc)
    };
    info!(
        "Found {} products on {}. Fetching detail pages...",
        records.len(),
        shop.listing_url()
    );

    for record in records.iter_mut() {
        let Some(link) = record.link.as_deref() else {
            debug!("Skip detail page of {:?}, no link", record.name);
            continue;
        };

        record.detail_text = match fetcher.fetch(link, Page::Detail).await {
            Ok(html) => {
                let doc = Html::parse_document(&html);
                shop.extract_detail(&doc)
            }
            Err(e) => {
                warn!("Failed to fetch detail page {}: {}", link, e);
                None
            }
        };
    }

    Ok(records)
}

/// Runs the scraper and writes the CSV only once every page was handled.
pub async fn scrape_to_csv<S, F, P>(
    shop: &S,
    fetcher: &F,
    path: P,
) -> Result<usize, ScraperError>
where
    S: Shop + ?Sized,
    F: Fetcher + ?Sized,
    P: AsRef<Path>,
{
    let records = run_scraper(shop, fetcher).await?;
    let written = write_csv_file(&records, path.as_ref())?;
    info!("Saved {} products to {}", written, path.as_ref().display());
    Ok(written)
}
