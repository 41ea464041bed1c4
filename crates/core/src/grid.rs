use crate::model::{Dataset, StoreEntry};
use crate::naming::normalize;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::Ordering;
use std::fmt;

/// Value shown in an item column for one store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceCell {
    Price(f64),
    NotApplicable,
}

impl fmt::Display for PriceCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Price(price) => f.write_str(&format_currency(*price)),
            Self::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// Two-decimal dollar amount, e.g. `$2.50`.
pub fn format_currency(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${value:.2}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortColumn {
    Post,
    Name,
    Item(String),
}

impl SortColumn {
    pub fn label(&self) -> &str {
        match self {
            Self::Post => "Post",
            Self::Name => "Name",
            Self::Item(name) => name,
        }
    }
}

/// Single-column sort of the store grid. Defaults to name ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSort {
    pub column: SortColumn,
    pub descending: bool,
}

impl Default for StoreSort {
    fn default() -> Self {
        Self {
            column: SortColumn::Name,
            descending: false,
        }
    }
}

impl StoreSort {
    /// Store indexes in display order. N/A cells sort after every price
    /// regardless of direction.
    pub fn order(&self, dataset: &Dataset) -> Vec<usize> {
        let stores = dataset.stores();
        let mut order: Vec<usize> = (0..stores.len()).collect();

        match &self.column {
            SortColumn::Post => {
                order.sort_by(|&a, &b| {
                    self.direct(postal(&stores[a]).cmp(postal(&stores[b])))
                });
            }
            SortColumn::Name => {
                let names: Vec<String> = stores
                    .iter()
                    .map(|entry| normalize(&entry.store.name))
                    .collect();
                order.sort_by(|&a, &b| self.direct(names[a].cmp(&names[b])));
            }
            SortColumn::Item(name) => {
                order.sort_by(|&a, &b| {
                    match (stores[a].price_of(name), stores[b].price_of(name)) {
                        (PriceCell::Price(x), PriceCell::Price(y)) => self.direct(x.total_cmp(&y)),
                        (PriceCell::Price(_), PriceCell::NotApplicable) => Ordering::Less,
                        (PriceCell::NotApplicable, PriceCell::Price(_)) => Ordering::Greater,
                        (PriceCell::NotApplicable, PriceCell::NotApplicable) => Ordering::Equal,
                    }
                });
            }
        }

        order
    }

    const fn direct(&self, ordering: Ordering) -> Ordering {
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Text a store search matches against: post and display name.
pub fn store_search_text(entry: &StoreEntry) -> String {
    format!("{} {}", postal(entry), normalize(&entry.store.name))
}

/// Keeps the stores of `order` whose search text fuzzily matches `query`,
/// in their current order. A blank query keeps everything.
pub fn filter_stores(dataset: &Dataset, order: Vec<usize>, query: &str) -> Vec<usize> {
    let query = query.trim();
    if query.is_empty() {
        return order;
    }

    let matcher = SkimMatcherV2::default();
    let stores = dataset.stores();
    order
        .into_iter()
        .filter(|&i| {
            stores
                .get(i)
                .is_some_and(|entry| matcher.fuzzy_match(&store_search_text(entry), query).is_some())
        })
        .collect()
}

fn postal(entry: &StoreEntry) -> &str {
    &entry.store.address.postal_zip
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{item, store, two_stores};

    #[test]
    fn formats_cells() {
        assert_eq!(PriceCell::Price(2.5).to_string(), "$2.50");
        assert_eq!(PriceCell::NotApplicable.to_string(), "N/A");
        assert_eq!(format_currency(-1.5), "-$1.50");
    }

    #[test]
    fn store_filter_matches_post_and_display_name() {
        let dataset = two_stores();
        let order = StoreSort::default().order(&dataset);

        assert_eq!(filter_stores(&dataset, order.clone(), "tacoma 2"), vec![1]);
        assert_eq!(filter_stores(&dataset, order.clone(), "98101"), vec![0]);
        assert_eq!(filter_stores(&dataset, order.clone(), " "), order);
        assert!(filter_stores(&dataset, order, "spokane").is_empty());
    }

    #[test]
    fn default_sort_is_name_ascending() {
        let dataset = two_stores();
        let sort = StoreSort {
            descending: true,
            ..StoreSort::default()
        };
        assert_eq!(StoreSort::default().order(&dataset), vec![0, 1]);
        assert_eq!(sort.order(&dataset), vec![1, 0]);
    }

    #[test]
    fn not_applicable_sorts_last_both_ways() {
        let dataset = Dataset::from_stores(vec![
            store("A", "3", vec![item("Milk", 2.0, &["Dairy"])]),
            store("B", "1", vec![]),
            store("C", "2", vec![item("Milk", 1.0, &["Dairy"])]),
        ])
        .unwrap();

        let mut sort = StoreSort {
            column: SortColumn::Item("Milk".to_string()),
            descending: false,
        };
        assert_eq!(sort.order(&dataset), vec![2, 0, 1]);

        sort.descending = true;
        assert_eq!(sort.order(&dataset), vec![0, 2, 1]);

        sort.column = SortColumn::Post;
        assert_eq!(sort.order(&dataset), vec![0, 2, 1]);
    }
}
