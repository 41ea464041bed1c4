// Core data handling for the store prices dashboards.
// Front ends (terminal and web) build on these modules.

pub mod aggregate;
pub mod catalog;
pub mod debounce;
pub mod detail;
pub mod error;
pub mod geo;
pub mod grid;
pub mod model;
pub mod naming;
pub mod view_state;

pub use aggregate::{CategoryIndex, PriceIndex, PriceSummary};
pub use catalog::Catalog;
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use detail::{
    compute_details, retain_matching, sort_by_deviation, Deviation, DetailRow, Trend,
};
pub use error::LoadError;
pub use geo::{geo_bounds, GeoBounds};
pub use grid::{
    filter_stores, format_currency, store_search_text, PriceCell, SortColumn, StoreSort,
};
pub use model::{Address, Dataset, Item, Location, StoreEntry, StoreInfo};
pub use naming::normalize;
pub use view_state::{CategorySelection, ColumnVisibility, GridSurface, ViewController, ViewState};
