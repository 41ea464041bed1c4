use crate::error::LoadError;
use crate::grid::PriceCell;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One row of `all.json`: a store and its priced items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreEntry {
    pub store: StoreInfo,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreInfo {
    pub name: String,
    pub address: Address,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "postalZip")]
    pub postal_zip: String,
    /// Street, city and whatever else the export carries; kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Address {
    /// Looks up a free-form address field such as `city`.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(serde_json::Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub price: f64,
    pub categories: Vec<String>,
}

impl Item {
    /// True when at least one of the item's categories is selected.
    pub fn in_any(&self, selected: &BTreeSet<String>) -> bool {
        self.categories.iter().any(|c| selected.contains(c))
    }
}

impl StoreEntry {
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Grid cell for an item column; items the store does not list are N/A.
    pub fn price_of(&self, name: &str) -> PriceCell {
        self.item(name)
            .map_or(PriceCell::NotApplicable, |item| PriceCell::Price(item.price))
    }
}

/// The loaded list of stores. Read-only once constructed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    stores: Vec<StoreEntry>,
}

impl Dataset {
    pub fn from_stores(stores: Vec<StoreEntry>) -> Result<Self, LoadError> {
        for entry in &stores {
            for item in &entry.items {
                if !item.price.is_finite() || item.price < 0.0 {
                    return Err(LoadError::InvalidPrice {
                        store: entry.store.name.clone(),
                        item: item.name.clone(),
                        price: item.price,
                    });
                }
                if item.categories.is_empty() {
                    tracing::warn!(
                        store = %entry.store.name,
                        item = %item.name,
                        "item has no categories and will never appear in store details"
                    );
                }
            }
        }

        tracing::debug!(stores = stores.len(), "dataset validated");
        Ok(Self { stores })
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let stores: Vec<StoreEntry> = serde_json::from_str(json)?;
        Self::from_stores(stores)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let stores: Vec<StoreEntry> = serde_json::from_slice(bytes)?;
        Self::from_stores(stores)
    }

    pub fn stores(&self) -> &[StoreEntry] {
        &self.stores
    }

    pub fn store(&self, index: usize) -> Option<&StoreEntry> {
        self.stores.get(index)
    }

    pub fn find_store(&self, name: &str) -> Option<&StoreEntry> {
        self.stores.iter().find(|entry| entry.store.name == name)
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Item columns, taken from the first store. Every store is expected to
    /// list the same names in the same order.
    pub fn columns(&self) -> Vec<&str> {
        self.stores.first().map_or_else(Vec::new, |first| {
            first.items.iter().map(|item| item.name.as_str()).collect()
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{Address, Dataset, Item, Location, StoreEntry, StoreInfo};
    use std::collections::BTreeMap;

    pub fn item(name: &str, price: f64, categories: &[&str]) -> Item {
        Item {
            name: name.to_string(),
            price,
            categories: categories.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn store(name: &str, postal: &str, items: Vec<Item>) -> StoreEntry {
        StoreEntry {
            store: StoreInfo {
                name: name.to_string(),
                address: Address {
                    postal_zip: postal.to_string(),
                    extra: BTreeMap::new(),
                },
                location: Location {
                    latitude: 47.6,
                    longitude: -122.3,
                },
            },
            items,
        }
    }

    /// Two stores selling Milk, Bread and Apples.
    pub fn two_stores() -> Dataset {
        Dataset::from_stores(vec![
            store(
                "SEATTLE STORE WA",
                "98101",
                vec![
                    item("Milk", 2.0, &["Dairy"]),
                    item("Bread", 3.0, &["Bakery"]),
                    item("Apples", 1.5, &["Produce", "Fruit"]),
                ],
            ),
            store(
                "TACOMA STORE II WA",
                "98402",
                vec![
                    item("Milk", 3.0, &["Dairy"]),
                    item("Bread", 2.5, &["Bakery"]),
                    item("Apples", 1.0, &["Produce", "Fruit"]),
                ],
            ),
        ])
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "store": {
                "name": "SPOKANE STORE WA",
                "address": { "postalZip": "99201", "city": "Spokane" },
                "location": { "latitude": 47.65, "longitude": -117.42 }
            },
            "items": [
                { "name": "Milk", "price": 2.49, "categories": ["Dairy"] },
                { "name": "Eggs", "price": 3.1, "categories": ["Dairy", "Breakfast"] }
            ]
        }
    ]"#;

    #[test]
    fn parses_export_shape() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 1);

        let entry = &dataset.stores()[0];
        assert_eq!(entry.store.address.postal_zip, "99201");
        assert_eq!(entry.store.address.field("city"), Some("Spokane"));
        assert!((entry.store.location.longitude + 117.42).abs() < 1e-9);
        assert_eq!(dataset.columns(), vec!["Milk", "Eggs"]);
    }

    #[test]
    fn rejects_malformed_payload() {
        let err = Dataset::from_json_str("{ \"store\": 1 }").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn rejects_negative_price() {
        let json = SAMPLE.replace("2.49", "-1");
        let err = Dataset::from_json_str(&json).unwrap_err();
        assert!(matches!(err, LoadError::InvalidPrice { ref item, .. } if item == "Milk"));
    }

    #[test]
    fn missing_item_is_not_applicable() {
        let dataset = fixtures::two_stores();
        let entry = &dataset.stores()[0];
        assert_eq!(entry.price_of("Milk"), PriceCell::Price(2.0));
        assert_eq!(entry.price_of("Caviar"), PriceCell::NotApplicable);
    }

    #[test]
    fn empty_dataset_has_no_columns() {
        let dataset = Dataset::from_json_str("[]").unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.columns().is_empty());
    }
}
