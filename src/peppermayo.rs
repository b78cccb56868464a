use crate::detail::{DetailExtractor, MarkerBounded};
use crate::listing::{Extract, FieldRule, ListingRules};
use crate::Shop;
use lazy_static::lazy_static;
use reqwest::Url;
use scraper::Selector;

pub const BASE_URL: &str = "https://us.peppermayo.com";
pub const LISTING_URL: &str = "https://us.peppermayo.com/collections/new-arrivals";

// Name and link are read from the same anchor.
const PRODUCT_ANCHOR: &[&str] = &[".product-item__name a", ".product-item__image a"];

const E: &str = "Invalid selector";
lazy_static! {
    static ref BASE: Url = Url::parse(BASE_URL).expect("Invalid base url");
    static ref LISTING: ListingRules = ListingRules {
        container: Selector::parse(".product-item__body").expect(E),
        name: FieldRule::new(PRODUCT_ANCHOR, Extract::Text(" ")),
        price: FieldRule::new(&[".product-item__prices .price"], Extract::Text("")),
        image: FieldRule::new(
            &[".product-item__image img"],
            Extract::Image {
                srcs: &["src", "data-src"],
                srcsets: &["srcset", "data-srcset"],
            },
        ),
        link: FieldRule::new(PRODUCT_ANCHOR, Extract::Attr(&["href"])),
    };
    static ref DESCRIPTION: MarkerBounded = MarkerBounded {
        marker: Selector::parse("div.spaces").expect(E),
        fallbacks: [
            ".product__description",
            ".product-description",
            ".product__details",
            ".rte.product__description",
            "[data-product-description]",
        ]
        .iter()
        .map(|s| Selector::parse(s).expect(E))
        .collect(),
    };
}

#[derive(Debug)]
pub struct Peppermayo;

impl Shop for Peppermayo {
    fn name(&self) -> &'static str {
        "peppermayo"
    }

    fn base_url(&self) -> &Url {
        &BASE
    }

    fn listing_url(&self) -> &str {
        LISTING_URL
    }

    fn listing_rules(&self) -> &ListingRules {
        &LISTING
    }

    fn detail_extractor(&self) -> &dyn DetailExtractor {
        &*DESCRIPTION
    }
}
