use crate::data::Price;
use itertools::Itertools;
use lazy_regex::regex;
use std::collections::HashSet;
use std::hash::Hash;

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₹'];
const THOUSANDS_SEPARATOR: char = ',';

/// Cleans a price string and parses it as a number when possible.
///
/// Text that is still not numeric after removing currency symbols and
/// thousands separators ("Sold Out", "$20 - $40") is returned as the
/// cleaned string. `None` or an empty source yields `None`.
pub fn parse_price(raw: Option<&str>) -> Option<Price> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;

    let cleaned = raw
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != THOUSANDS_SEPARATOR)
        .collect::<String>();
    let cleaned = cleaned.trim();

    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Some(Price::Amount(amount)),
        _ => Some(Price::Raw(cleaned.to_string())),
    }
}

/// Picks the URL of the last candidate of a `srcset`-like attribute.
///
/// Sites list candidates from smallest to largest, so the last one is the
/// highest resolution.
pub fn pick_best_from_srcset(srcset: &str) -> Option<String> {
    srcset
        .split(',')
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .last()
        .and_then(|candidate| candidate.split_whitespace().next())
        .map(ToString::to_string)
}

/// A direct image source wins unless it is missing or an inlined
/// `data:` placeholder, in which case the candidate list is consulted.
pub fn resolve_image(src: Option<&str>, srcset: Option<&str>) -> Option<String> {
    match src.map(str::trim) {
        Some(src) if !src.is_empty() && !src.starts_with("data:") => Some(src.to_string()),
        _ => srcset.and_then(pick_best_from_srcset),
    }
}

pub fn normalize_multiline(text: &str) -> Option<String> {
    let text = regex!(r"\r\n?").replace_all(text, "\n");
    let text = text.split('\n').map(str::trim).join("\n");
    let text = regex!(r"\n{3,}").replace_all(&text, "\n\n");
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Insertion-ordered set: keeps the first occurrence of every item.
#[derive(Debug, Clone)]
pub struct OrderedSet<T> {
    items: Vec<T>,
    seen: HashSet<T>,
}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    pub fn new() -> Self {
        OrderedSet {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Returns `false` when the item was already present.
    pub fn insert(&mut self, item: T) -> bool {
        if self.seen.contains(&item) {
            return false;
        }
        self.seen.insert(item.clone());
        self.items.push(item);
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Eq + Hash + Clone> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Eq + Hash + Clone> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}
