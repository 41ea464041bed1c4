//! Indexes derived once from a loaded [`Dataset`].
//!
//! Both indexes are immutable after construction and are handed to the grid
//! and detail views by reference.

use crate::model::Dataset;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Item name to every price observed for it, in store order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceIndex {
    prices: HashMap<String, Vec<f64>>,
}

/// Distribution of one item's prices across stores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl PriceIndex {
    pub fn build(dataset: &Dataset) -> Self {
        let mut prices: HashMap<String, Vec<f64>> = HashMap::new();
        for entry in dataset.stores() {
            for item in &entry.items {
                prices.entry(item.name.clone()).or_default().push(item.price);
            }
        }

        tracing::debug!(items = prices.len(), "price index built");
        Self { prices }
    }

    pub fn prices(&self, name: &str) -> Option<&[f64]> {
        self.prices.get(name).map(Vec::as_slice)
    }

    /// Mean price across stores, `None` for names never seen.
    pub fn average(&self, name: &str) -> Option<f64> {
        self.prices(name).and_then(mean)
    }

    pub fn summary(&self, name: &str) -> Option<PriceSummary> {
        let prices = self.prices(name)?;
        let mean = mean(prices)?;
        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(PriceSummary {
            count: prices.len(),
            min,
            max,
            mean,
        })
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(prices: &[f64]) -> Option<f64> {
    if prices.is_empty() {
        return None;
    }
    Some(prices.iter().sum::<f64>() / prices.len() as f64)
}

/// Category label to the item names tagged with it.
///
/// Labels keep the order in which they were first seen so that category
/// toggles are listed consistently between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    labels: Vec<String>,
    items: HashMap<String, BTreeSet<String>>,
}

impl CategoryIndex {
    pub fn build(dataset: &Dataset) -> Self {
        let mut labels = Vec::new();
        let mut items: HashMap<String, BTreeSet<String>> = HashMap::new();

        for entry in dataset.stores() {
            for item in &entry.items {
                for category in &item.categories {
                    let members = items.entry(category.clone()).or_insert_with(|| {
                        labels.push(category.clone());
                        BTreeSet::new()
                    });
                    members.insert(item.name.clone());
                }
            }
        }

        tracing::debug!(categories = labels.len(), "category index built");
        Self { labels, items }
    }

    /// All labels, first-seen order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Items in a category. Unknown labels have no items.
    pub fn items(&self, label: &str) -> impl Iterator<Item = &str> + '_ {
        self.items
            .get(label)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.items.contains_key(label)
    }

    pub fn item_count(&self, label: &str) -> usize {
        self.items.get(label).map_or(0, BTreeSet::len)
    }

    pub fn all_labels(&self) -> BTreeSet<String> {
        self.labels.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{item, store, two_stores};
    use proptest::prelude::*;

    #[test]
    fn collects_prices_in_store_order() {
        let index = PriceIndex::build(&two_stores());
        assert_eq!(index.prices("Milk"), Some(&[2.0, 3.0][..]));
        assert_eq!(index.average("Milk"), Some(2.5));
        assert_eq!(index.prices("Caviar"), None);
    }

    #[test]
    fn summary_reports_distribution() {
        let index = PriceIndex::build(&two_stores());
        let summary = index.summary("Bread").unwrap();
        assert_eq!(summary.count, 2);
        assert!((summary.min - 2.5).abs() < f64::EPSILON);
        assert!((summary.max - 3.0).abs() < f64::EPSILON);
        assert!((summary.mean - 2.75).abs() < f64::EPSILON);
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let index = CategoryIndex::build(&two_stores());
        assert_eq!(index.labels(), ["Dairy", "Bakery", "Produce", "Fruit"]);
        assert_eq!(index.items("Fruit").collect::<Vec<_>>(), vec!["Apples"]);
        assert_eq!(index.items("Unknown").count(), 0);
    }

    #[test]
    fn duplicate_names_are_not_double_counted_in_categories() {
        let dataset = Dataset::from_stores(vec![
            store("A", "1", vec![item("Milk", 1.0, &["Dairy"])]),
            store("B", "2", vec![item("Milk", 1.5, &["Dairy"])]),
            store("C", "3", vec![item("Cheese", 4.0, &["Dairy"])]),
        ])
        .unwrap();

        let categories = CategoryIndex::build(&dataset);
        assert_eq!(categories.item_count("Dairy"), 2);

        let prices = PriceIndex::build(&dataset);
        assert_eq!(prices.prices("Milk").map(<[f64]>::len), Some(2));
    }

    fn arb_dataset() -> impl Strategy<Value = Dataset> {
        let names = ["Milk", "Bread", "Eggs", "Rice"];
        let labels = ["Dairy", "Bakery", "Pantry"];

        let arb_item = (0..names.len(), 0.0..50.0_f64, prop::sample::subsequence(labels.to_vec(), 1..=3))
            .prop_map(move |(n, price, cats)| item(names[n], price, &cats));

        prop::collection::vec(prop::collection::vec(arb_item, 0..6), 0..8).prop_map(|stores| {
            let entries = stores
                .into_iter()
                .enumerate()
                .map(|(i, mut items)| {
                    let mut seen = BTreeSet::new();
                    items.retain(|it| seen.insert(it.name.clone()));
                    store(&format!("Store {i}"), "00000", items)
                })
                .collect();
            Dataset::from_stores(entries).unwrap()
        })
    }

    proptest! {
        #[test]
        fn price_count_matches_carrying_stores(dataset in arb_dataset()) {
            let index = PriceIndex::build(&dataset);
            for name in ["Milk", "Bread", "Eggs", "Rice"] {
                let carrying = dataset
                    .stores()
                    .iter()
                    .filter(|entry| entry.item(name).is_some())
                    .count();
                prop_assert_eq!(index.prices(name).map_or(0, <[f64]>::len), carrying);
            }
        }

        #[test]
        fn category_members_match_tagged_items(dataset in arb_dataset()) {
            let index = CategoryIndex::build(&dataset);
            for label in ["Dairy", "Bakery", "Pantry"] {
                let expected: BTreeSet<&str> = dataset
                    .stores()
                    .iter()
                    .flat_map(|entry| entry.items.iter())
                    .filter(|it| it.categories.iter().any(|c| c == label))
                    .map(|it| it.name.as_str())
                    .collect();
                let actual: BTreeSet<&str> = index.items(label).collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
