use crate::data::ProductRecord;
use crate::detail::flatten_text;
use crate::utils::{parse_price, resolve_image};
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

const E: &str = "Invalid selector";

/// How a value is read from the element a [`FieldRule`] matched.
#[derive(Debug, Clone, Copy)]
pub enum Extract {
    /// Element text, pieces joined by the given separator.
    Text(&'static str),
    /// First non-empty attribute among the names.
    Attr(&'static [&'static str]),
    /// First non-empty attribute among the names, else the element text.
    AttrOrText(&'static [&'static str]),
    /// The first usable direct source among `srcs` (lazy-loading pages keep
    /// the real URL in `data-src`), or the best candidate of the first
    /// non-empty `srcsets` attribute when every source is missing or a
    /// `data:` placeholder.
    Image {
        srcs: &'static [&'static str],
        srcsets: &'static [&'static str],
    },
}

fn first_attr<'a>(el: ElementRef<'a>, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| el.value().attr(name))
        .find(|value| !value.is_empty())
}

impl Extract {
    pub fn apply(self, el: ElementRef<'_>) -> Option<String> {
        match self {
            Extract::Text(separator) => Some(flatten_text(el, separator)),
            Extract::Attr(names) => first_attr(el, names).map(ToString::to_string),
            Extract::AttrOrText(names) => first_attr(el, names)
                .map(ToString::to_string)
                .or_else(|| Some(flatten_text(el, ""))),
            Extract::Image { srcs, srcsets } => {
                let src = srcs
                    .iter()
                    .filter_map(|name| el.value().attr(name))
                    .find(|src| !src.trim().is_empty() && !src.trim().starts_with("data:"));
                resolve_image(src, first_attr(el, srcsets))
            }
        }
    }
}

/// Ordered selector chain for one field.
///
/// The first selector that matches any element wins, even when the value
/// read from that element turns out empty.
#[derive(Debug)]
pub struct FieldRule {
    pub chain: Vec<Selector>,
    pub extract: Extract,
}

impl FieldRule {
    /// Panics on an invalid selector, rules are built from constants.
    pub fn new(selectors: &[&str], extract: Extract) -> Self {
        FieldRule {
            chain: selectors
                .iter()
                .map(|s| Selector::parse(s).expect(E))
                .collect(),
            extract,
        }
    }

    pub fn find<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.chain
            .iter()
            .find_map(|selector| scope.select(selector).next())
    }

    pub fn value(&self, scope: ElementRef<'_>) -> Option<String> {
        self.find(scope).and_then(|el| self.extract.apply(el))
    }
}

/// Per-site strategy table for listing pages.
#[derive(Debug)]
pub struct ListingRules {
    pub container: Selector,
    pub name: FieldRule,
    pub price: FieldRule,
    pub image: FieldRule,
    pub link: FieldRule,
}

impl ListingRules {
    /// One record per matched container, in document order.
    pub fn parse(&self, doc: &Html, base_url: &Url) -> Vec<ProductRecord> {
        doc.select(&self.container)
            .map(|container| self.record(container, base_url))
            .collect()
    }

    fn record(&self, container: ElementRef<'_>, base_url: &Url) -> ProductRecord {
        ProductRecord {
            name: self.name.value(container),
            price: parse_price(self.price.value(container).as_deref()),
            image: self
                .image
                .value(container)
                .and_then(|src| resolve_url(base_url, &src)),
            link: self
                .link
                .value(container)
                .and_then(|href| resolve_url(base_url, &href)),
            detail_text: None,
        }
    }
}

pub fn resolve_url(base_url: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base_url.join(href).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Price;
    use pretty_assertions::assert_eq;

    fn rules() -> ListingRules {
        ListingRules {
            container: Selector::parse(".card").unwrap(),
            name: FieldRule::new(&[".title a", ".thumb a"], Extract::Text(" ")),
            price: FieldRule::new(&[".price"], Extract::AttrOrText(&["content"])),
            image: FieldRule::new(
                &["img.primary", "img"],
                Extract::Image {
                    srcs: &["src", "data-src"],
                    srcsets: &["data-srcset", "srcset"],
                },
            ),
            link: FieldRule::new(&[".title a", ".thumb a"], Extract::Attr(&["href"])),
        }
    }

    fn base() -> Url {
        Url::parse("https://shop.example.com").unwrap()
    }

    #[test]
    fn no_containers_gives_empty_listing() {
        let doc = Html::parse_document("<div class=\"grid\"><p>Nothing here</p></div>");
        assert!(rules().parse(&doc, &base()).is_empty());
    }

    #[test]
    fn records_in_document_order() {
        let doc = Html::parse_document(
            r#"<div class="card">
                 <h3 class="title"><a href="/products/first"> First   Dress </a></h3>
                 <span class="price" content="120.00">$120</span>
                 <img class="primary" src="//cdn.example.com/first.jpg">
               </div>
               <div class="card">
                 <h3 class="title"><a href="https://shop.example.com/products/second">Second</a></h3>
                 <span class="price">$1,234.50</span>
                 <img src="data:image/gif;base64,R0lGOD" data-srcset="s.jpg 100w, m.jpg 400w, l.jpg 800w">
               </div>"#,
        );

        assert_eq!(
            rules().parse(&doc, &base()),
            vec![
                ProductRecord {
                    name: Some("First Dress".into()),
                    price: Some(Price::Amount(120.0)),
                    image: Some("https://cdn.example.com/first.jpg".into()),
                    link: Some("https://shop.example.com/products/first".into()),
                    detail_text: None,
                },
                ProductRecord {
                    name: Some("Second".into()),
                    price: Some(Price::Amount(1234.5)),
                    image: Some("https://shop.example.com/l.jpg".into()),
                    link: Some("https://shop.example.com/products/second".into()),
                    detail_text: None,
                },
            ]
        );
    }

    #[test]
    fn fields_fail_independently() {
        let doc = Html::parse_document(
            r#"<div class="card"><div class="thumb"><a href="only-link">Fallback name</a></div></div>
               <div class="card"><span class="price">Sold Out</span></div>"#,
        );

        assert_eq!(
            rules().parse(&doc, &base()),
            vec![
                ProductRecord {
                    name: Some("Fallback name".into()),
                    link: Some("https://shop.example.com/only-link".into()),
                    ..Default::default()
                },
                ProductRecord {
                    price: Some(Price::Raw("Sold Out".into())),
                    ..Default::default()
                },
            ]
        );
    }

    #[test]
    fn first_matching_selector_wins_even_when_empty() {
        let doc = Html::parse_document(
            r#"<div class="card">
                 <h3 class="title"><a></a></h3>
                 <div class="thumb"><a href="/products/thumb">Thumb name</a></div>
                 <img class="primary">
                 <img src="other.jpg">
               </div>"#,
        );

        assert_eq!(
            rules().parse(&doc, &base()),
            vec![ProductRecord {
                name: Some("".into()),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn price_attribute_preferred_over_text() {
        let doc = Html::parse_fragment(
            r#"<div class="card"><span class="price" content="">$45</span></div>
               <div class="card"><span class="price" content="88.5">$99</span></div>
               <div class="card"><span class="price"></span></div>"#,
        );
        let prices = rules()
            .parse(&doc, &base())
            .into_iter()
            .map(|record| record.price)
            .collect::<Vec<_>>();
        assert_eq!(
            prices,
            vec![Some(Price::Amount(45.0)), Some(Price::Amount(88.5)), None]
        );
    }

    #[test]
    fn lazy_loaded_image_source() {
        let doc = Html::parse_document(
            r#"<div class="card"><img src="data:image/gif;base64,R0lGOD" data-src="/lazy/first.jpg" srcset="s.jpg 100w"></div>
               <div class="card"><img data-src="//cdn.example.com/second.jpg"></div>
               <div class="card"><img src="direct.jpg" data-src="lazy.jpg"></div>
               <div class="card"><img data-src="" srcset="s.jpg 100w, l.jpg 800w"></div>"#,
        );
        let images = rules()
            .parse(&doc, &base())
            .into_iter()
            .map(|record| record.image)
            .collect::<Vec<_>>();
        assert_eq!(
            images,
            vec![
                Some("https://shop.example.com/lazy/first.jpg".to_string()),
                Some("https://cdn.example.com/second.jpg".to_string()),
                Some("https://shop.example.com/direct.jpg".to_string()),
                Some("https://shop.example.com/l.jpg".to_string()),
            ]
        );
    }

    #[test]
    fn resolves_links_against_base() {
        let base = base();
        assert_eq!(
            resolve_url(&base, "/products/a?variant=1"),
            Some("https://shop.example.com/products/a?variant=1".to_string())
        );
        assert_eq!(
            resolve_url(&base, "https://other.example.com/x"),
            Some("https://other.example.com/x".to_string())
        );
        assert_eq!(resolve_url(&base, "  "), None);
    }
}
