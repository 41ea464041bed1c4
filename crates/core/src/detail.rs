use crate::aggregate::PriceIndex;
use crate::model::StoreEntry;
use crate::view_state::contains_ignore_case;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Relative difference between an item's price and the cross-store average,
/// as a fraction of the item's own price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum Deviation {
    Ratio(f64),
    /// The item is free, so the ratio has no finite value.
    Undefined,
}

impl Deviation {
    #[allow(clippy::float_cmp)]
    fn between(price: f64, average: f64) -> Self {
        if price == 0.0 {
            Self::Undefined
        } else {
            Self::Ratio((price - average) / price)
        }
    }

    pub const fn ratio(self) -> Option<f64> {
        match self {
            Self::Ratio(value) => Some(value),
            Self::Undefined => None,
        }
    }

    /// Orders ratios numerically with `Undefined` below all of them.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Ratio(a), Self::Ratio(b)) => a.total_cmp(b),
            (Self::Ratio(_), Self::Undefined) => Ordering::Greater,
            (Self::Undefined, Self::Ratio(_)) => Ordering::Less,
            (Self::Undefined, Self::Undefined) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ratio(value) => write!(f, "{:.2}%", value * 100.0),
            Self::Undefined => f.write_str("n/a"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Above,
    Below,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub name: String,
    pub price: f64,
    pub average: f64,
    pub relative_deviation: Deviation,
    pub categories: Vec<String>,
}

impl DetailRow {
    /// Above average only for a strictly positive ratio.
    pub fn trend(&self) -> Trend {
        match self.relative_deviation {
            Deviation::Ratio(value) if value > 0.0 => Trend::Above,
            _ => Trend::Below,
        }
    }
}

/// Per-item comparison of `store` against every store's prices, limited to
/// items in at least one selected category. Keeps the store's item order.
pub fn compute_details(
    store: &StoreEntry,
    prices: &PriceIndex,
    selected: &BTreeSet<String>,
) -> Vec<DetailRow> {
    let rows: Vec<DetailRow> = store
        .items
        .iter()
        .filter(|item| item.in_any(selected))
        .map(|item| {
            let average = prices.average(&item.name).unwrap_or_else(|| {
                tracing::warn!(
                    store = %store.store.name,
                    item = %item.name,
                    "item missing from price index, using its own price"
                );
                item.price
            });

            DetailRow {
                name: item.name.clone(),
                price: item.price,
                average,
                relative_deviation: Deviation::between(item.price, average),
                categories: item.categories.clone(),
            }
        })
        .collect();

    tracing::debug!(
        store = %store.store.name,
        rows = rows.len(),
        of = store.items.len(),
        "store details computed"
    );
    rows
}

/// Keeps the rows whose item name contains `query`, ignoring case.
/// A blank query keeps everything.
pub fn retain_matching(rows: &mut Vec<DetailRow>, query: &str) {
    let query = query.trim();
    if query.is_empty() {
        return;
    }
    rows.retain(|row| contains_ignore_case(&row.name, query));
}

/// Default presentation order: largest deviation first.
pub fn sort_by_deviation(rows: &mut [DetailRow]) {
    rows.sort_by(|a, b| b.relative_deviation.total_cmp(&a.relative_deviation));
}
