use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest unit price a catalog may carry. Keeps `price * quantity` summed over
/// the whole catalog well inside `Decimal` range for any `u32` quantity.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// One product record as supplied by the catalog file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(rename = "pic", default)]
    pub picture: String,
    pub price: Decimal,
    #[serde(rename = "sellNumber", default)]
    pub sell_count: u64,
    #[serde(rename = "favorRate", default)]
    pub favor_rate: Decimal,
}

impl CatalogEntry {
    pub fn new(title: impl Into<String>, price: Decimal) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            picture: String::new(),
            price,
            sell_count: 0,
            favor_rate: Decimal::ZERO,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = picture.into();
        self
    }

    pub fn sales(mut self, sell_count: u64, favor_rate: Decimal) -> Self {
        self.sell_count = sell_count;
        self.favor_rate = favor_rate;
        self
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: serde_json::Error },
    #[error("catalog entry {index} has an empty title")]
    EmptyTitle { index: usize },
    #[error("catalog entry {index} (`{title}`) has a negative price {price}")]
    NegativePrice { index: usize, title: String, price: Decimal },
    #[error("catalog entry {index} (`{title}`) has price {price} above the maximum 1000000000")]
    PriceTooLarge { index: usize, title: String, price: Decimal },
}

/// Fixed, ordered list of entries. Order is the display order of the cart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        for (index, entry) in entries.iter().enumerate() {
            if entry.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle { index });
            }
            if entry.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice {
                    index,
                    title: entry.title.clone(),
                    price: entry.price,
                });
            }
            if entry.price > MAX_PRICE {
                return Err(CatalogError::PriceTooLarge {
                    index,
                    title: entry.title.clone(),
                    price: entry.price,
                });
            }
        }

        Ok(Self { entries })
    }

    pub fn from_json_str(raw: &str, path: &Path) -> Result<Self, CatalogError> {
        let entries = serde_json::from_str::<Vec<CatalogEntry>>(raw)
            .map_err(|source| CatalogError::ParseFile { path: path.to_path_buf(), source })?;
        Self::new(entries)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        Self::from_json_str(&raw, path)
    }

    /// Small built-in catalog used when no catalog file is configured.
    pub fn demo() -> Self {
        Self {
            entries: vec![
                CatalogEntry::new("Seasonal fruit tea", Decimal::new(1990, 2))
                    .description("Fresh seasonal fruit over jasmine green tea")
                    .picture("./assets/g1.png")
                    .sales(1200, Decimal::from(95)),
                CatalogEntry::new("Brown sugar milk tea", Decimal::new(1500, 2))
                    .description("Slow-cooked brown sugar syrup with fresh milk")
                    .picture("./assets/g2.png")
                    .sales(860, Decimal::from(93)),
                CatalogEntry::new("Cheese foam oolong", Decimal::new(1250, 2))
                    .description("Roasted oolong topped with salted cheese foam")
                    .picture("./assets/g3.png")
                    .sales(430, Decimal::from(91)),
                CatalogEntry::new("Mango pomelo sago", Decimal::new(2200, 2))
                    .description("Mango puree, pomelo pulp and sago pearls")
                    .picture("./assets/g4.png")
                    .sales(312, Decimal::from(97)),
            ],
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use super::{Catalog, CatalogEntry, CatalogError, MAX_PRICE};

    #[test]
    fn parses_catalog_file_field_names() {
        let raw = r#"[
            {
                "title": "Green tea",
                "desc": "Hot jasmine green tea",
                "pic": "./assets/g1.png",
                "price": 12.5,
                "sellNumber": 200,
                "favorRate": 98
            }
        ]"#;

        let catalog = Catalog::from_json_str(raw, Path::new("inline.json")).expect("catalog");
        let entry = &catalog.entries()[0];

        assert_eq!(entry.title, "Green tea");
        assert_eq!(entry.description, "Hot jasmine green tea");
        assert_eq!(entry.picture, "./assets/g1.png");
        assert_eq!(entry.price, Decimal::new(125, 1));
        assert_eq!(entry.sell_count, 200);
        assert_eq!(entry.favor_rate, Decimal::from(98));
    }

    #[test]
    fn rejects_negative_price() {
        let error = Catalog::new(vec![CatalogEntry::new("Refund", Decimal::new(-100, 2))])
            .expect_err("negative price should be rejected");

        assert!(matches!(error, CatalogError::NegativePrice { index: 0, .. }));
    }

    #[test]
    fn rejects_price_above_maximum() {
        let raw = r#"[{"title":"A","price":"50000000000000000000000000000"}]"#;

        let error = Catalog::from_json_str(raw, Path::new("inline.json"))
            .expect_err("oversized price should be rejected");

        assert!(matches!(error, CatalogError::PriceTooLarge { index: 0, .. }));
    }

    #[test]
    fn maximum_price_totals_stay_in_range_at_saturated_quantities() {
        let entries = (0..64).map(|index| CatalogEntry::new(format!("item-{index}"), MAX_PRICE));
        let catalog = Catalog::new(entries.collect()).expect("maximum price is accepted");

        let worst_case = catalog
            .entries()
            .iter()
            .try_fold(Decimal::ZERO, |total, entry| {
                entry.price.checked_mul(Decimal::from(u32::MAX))?.checked_add(total)
            });

        assert!(worst_case.is_some());
    }

    #[test]
    fn rejects_blank_title() {
        let error = Catalog::new(vec![
            CatalogEntry::new("Tea", Decimal::ONE),
            CatalogEntry::new("   ", Decimal::ONE),
        ])
        .expect_err("blank title should be rejected");

        assert!(matches!(error, CatalogError::EmptyTitle { index: 1 }));
    }

    #[test]
    fn load_reports_path_on_parse_failure() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{ not json").expect("write catalog");

        let error = Catalog::load(&path).expect_err("malformed catalog should fail");

        assert!(matches!(error, CatalogError::ParseFile { .. }));
        assert!(error.to_string().contains("catalog.json"));
    }

    #[test]
    fn load_reads_catalog_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"[{"title":"A","price":10},{"title":"B","price":25}]"#)
            .expect("write catalog");

        let catalog = Catalog::load(&path).expect("catalog should load");

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[1].price, Decimal::from(25));
    }

    #[test]
    fn demo_catalog_is_valid() {
        let demo = Catalog::demo();
        let revalidated = Catalog::new(demo.entries().to_vec()).expect("demo should validate");

        assert!(!revalidated.is_empty());
    }
}
