use crate::aggregate::{CategoryIndex, PriceIndex};
use crate::model::Dataset;
use crate::view_state::{ColumnVisibility, ViewController};
use std::sync::Arc;

/// A loaded dataset together with the indexes derived from it.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub dataset: Dataset,
    pub prices: PriceIndex,
    pub categories: Arc<CategoryIndex>,
}

impl Catalog {
    pub fn new(dataset: Dataset) -> Self {
        let prices = PriceIndex::build(&dataset);
        let categories = Arc::new(CategoryIndex::build(&dataset));

        tracing::info!(
            stores = dataset.len(),
            items = prices.len(),
            categories = categories.len(),
            "catalog ready"
        );

        Self {
            dataset,
            prices,
            categories,
        }
    }

    pub fn columns(&self) -> Vec<String> {
        self.dataset.columns().into_iter().map(String::from).collect()
    }

    /// Fresh grid view state: nothing searched, every category selected.
    pub fn view_controller(&self) -> ViewController {
        ViewController::new(Arc::clone(&self.categories), self.columns())
    }

    /// Every item column visible.
    pub fn column_visibility(&self) -> ColumnVisibility {
        ColumnVisibility::new(self.columns())
    }
}
