use crate::ScraperError;
use serde::Serialize;
use std::{fmt, fs::File, io, path::Path};

pub const CSV_HEADER: [&str; 5] = ["name", "price", "image", "link", "detail_text"];

/// Listing price: a number when the cleaned text parses, otherwise the
/// cleaned text itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Price {
    Amount(f64),
    Raw(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `{:?}` keeps the decimal point on whole numbers (98.0).
            Price::Amount(amount) => write!(f, "{:?}", amount),
            Price::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRecord {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub detail_text: Option<String>,
}

impl fmt::Display for ProductRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Name        : {}",
            self.name.as_deref().unwrap_or("None")
        )?;
        if let Some(price) = self.price.as_ref() {
            writeln!(f, "Price       : {}", price)?;
        } else {
            writeln!(f, "Price       : None")?;
        };
        writeln!(
            f,
            "Image       : {}",
            self.image.as_deref().unwrap_or("None")
        )?;
        writeln!(
            f,
            "Link        : {}",
            self.link.as_deref().unwrap_or("None")
        )?;
        match self.detail_text.as_ref() {
            Some(text) => writeln!(f, "Detail      : {}", text.replace('\n', "\n              "))?,
            None => writeln!(f, "Detail      : None")?,
        };

        Ok(())
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    name: Option<&'a str>,
    price: Option<String>,
    image: Option<&'a str>,
    link: Option<&'a str>,
    detail_text: Option<&'a str>,
}

impl<'a> From<&'a ProductRecord> for CsvRow<'a> {
    fn from(record: &'a ProductRecord) -> Self {
        CsvRow {
            name: record.name.as_deref(),
            price: record.price.as_ref().map(ToString::to_string),
            image: record.image.as_deref(),
            link: record.link.as_deref(),
            detail_text: record.detail_text.as_deref(),
        }
    }
}

/// Writes the header and one row per record, returning the row count.
pub fn write_csv<W: io::Write>(
    records: &[ProductRecord],
    writer: W,
) -> Result<usize, ScraperError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    writer.flush()?;

    Ok(records.len())
}

pub fn write_csv_file<P: AsRef<Path>>(
    records: &[ProductRecord],
    path: P,
) -> Result<usize, ScraperError> {
    let file = File::create(path)?;
    write_csv(records, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn to_csv(records: &[ProductRecord]) -> String {
        let mut out = Vec::new();
        write_csv(records, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn price_display() {
        assert_eq!(Price::Amount(1234.5).to_string(), "1234.5");
        assert_eq!(Price::Amount(98.0).to_string(), "98.0");
        assert_eq!(Price::Raw("Sold Out".into()).to_string(), "Sold Out");
    }

    #[test]
    fn header_is_written_without_records() {
        assert_eq!(to_csv(&[]), "name,price,image,link,detail_text\n");
    }

    #[test]
    fn rows_keep_order_and_blank_missing_fields() {
        let records = vec![
            ProductRecord {
                name: Some("Juliette Dress".into()),
                price: Some(Price::Amount(278.0)),
                image: Some("https://cdn.example.com/j.jpg".into()),
                link: Some("https://www.example.com/juliette".into()),
                detail_text: Some("Fits true to size. | Model is 5'9\"".into()),
            },
            ProductRecord {
                name: Some("Mystery".into()),
                price: Some(Price::Raw("Sold Out".into())),
                ..Default::default()
            },
        ];

        assert_eq!(
            to_csv(&records),
            "name,price,image,link,detail_text\n\
             Juliette Dress,278.0,https://cdn.example.com/j.jpg,https://www.example.com/juliette,\"Fits true to size. | Model is 5'9\"\"\"\n\
             Mystery,Sold Out,,,\n"
        );
    }

    #[test]
    fn record_display() {
        let record = ProductRecord {
            name: Some("Top".into()),
            price: Some(Price::Amount(60.0)),
            detail_text: Some("a\nb".into()),
            ..Default::default()
        };
        assert_eq!(
            record.to_string(),
            "Name        : Top\n\
             Price       : 60.0\n\
             Image       : None\n\
             Link        : None\n\
             Detail      : a\n              b\n"
        );
    }
}
