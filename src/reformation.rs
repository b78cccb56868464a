use crate::detail::{DetailExtractor, VisibleItems};
use crate::listing::{Extract, FieldRule, ListingRules};
use crate::Shop;
use lazy_static::lazy_static;
use reqwest::Url;
use scraper::Selector;

pub const BASE_URL: &str = "https://www.thereformation.com";
pub const LISTING_URL: &str = "https://www.thereformation.com/new";

const E: &str = "Invalid selector";
lazy_static! {
    static ref BASE: Url = Url::parse(BASE_URL).expect("Invalid base url");
    static ref LISTING: ListingRules = ListingRules {
        container: Selector::parse(".product-tile[data-product-tile]").expect(E),
        name: FieldRule::new(&[".product-tile__name"], Extract::Text(" ")),
        price: FieldRule::new(&[".price .value"], Extract::AttrOrText(&["content"])),
        image: FieldRule::new(
            &["img.tile-image-primary", "img.tile-image"],
            Extract::Image {
                srcs: &["src"],
                srcsets: &["cl-data-srcset", "data-srcset", "srcset"],
            },
        ),
        link: FieldRule::new(
            &[".product-tile__name-price-container a.product-tile__anchor"],
            Extract::Attr(&["href"]),
        ),
    };
    static ref FIT_DETAILS: VisibleItems = VisibleItems {
        items: Selector::parse(".pdp_fit-details-item").expect(E),
        summary: Selector::parse(".model-info").expect(E),
        separator: " | ",
    };
}

#[derive(Debug)]
pub struct Reformation;

impl Shop for Reformation {
    fn name(&self) -> &'static str {
        "reformation"
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
        &*FIT_DETAILS
    }
}
