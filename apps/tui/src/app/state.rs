use crate::app::input::helpers::{step_clamped, wrap_decrement, wrap_increment};
use std::time::{Duration, Instant};
use store_prices_core::{
    compute_details, filter_stores, retain_matching, sort_by_deviation, Catalog,
    CategorySelection, ColumnVisibility, Debouncer, DetailRow, SortColumn, StoreEntry, StoreSort,
    ViewController,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Stores,
    StoreDetails,
    Map,
}

/// Which part of the stores screen receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Grid,
    ItemSearch,
    StoreSearch,
    Categories,
}

/// The open detail popup for one store.
#[derive(Debug, Clone)]
pub struct DetailsState {
    pub store_index: usize,
    pub categories: CategorySelection,
    /// 0 is "Show All", then one entry per category label
    pub category_cursor: usize,
    pub rows: Vec<DetailRow>,
    pub selected_row: usize,
    /// Item name filter typed into the popup
    pub search: String,
    pub searching: bool,
    pub return_to: AppScreen,
}

impl DetailsState {
    fn open(catalog: &Catalog, store_index: usize, return_to: AppScreen) -> Self {
        let mut details = Self {
            store_index,
            return_to,
            categories: CategorySelection::new(catalog.categories.labels()),
            category_cursor: 0,
            rows: Vec::new(),
            selected_row: 0,
            search: String::new(),
            searching: false,
        };
        details.recompute(catalog);
        details
    }

    fn recompute(&mut self, catalog: &Catalog) {
        let Some(store) = catalog.dataset.store(self.store_index) else {
            self.rows.clear();
            return;
        };

        let mut rows = compute_details(store, &catalog.prices, self.categories.selected());
        retain_matching(&mut rows, &self.search);
        sort_by_deviation(&mut rows);
        self.rows = rows;
        self.selected_row = self.selected_row.min(self.rows.len().saturating_sub(1));
    }

    pub fn cursor_label(&self) -> Option<&str> {
        self.category_cursor
            .checked_sub(1)
            .and_then(|i| self.categories.labels().get(i))
            .map(String::as_str)
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub focus: Focus,
    pub show_help: bool,
    pub catalog: Catalog,
    pub view: ViewController,
    pub columns: ColumnVisibility,
    pub search_input: String,
    pub search_debounce: Debouncer<String>,
    pub store_query: String,
    pub sort: StoreSort,
    /// Dataset indexes of the stores shown, in display order
    pub store_order: Vec<usize>,
    pub selected_row: usize,
    pub column_offset: usize,
    /// 0 is "Show All", then one entry per category label
    pub category_cursor: usize,
    pub details: Option<DetailsState>,
    pub status_message: String,
}

impl App {
    pub fn new(catalog: Catalog, search_debounce: Duration) -> Self {
        let view = catalog.view_controller();
        let columns = catalog.column_visibility();

        let mut app = Self {
            running: true,
            screen: AppScreen::Stores,
            focus: Focus::Grid,
            show_help: false,
            catalog,
            view,
            columns,
            search_input: String::new(),
            search_debounce: Debouncer::new(search_debounce),
            store_query: String::new(),
            sort: StoreSort::default(),
            store_order: Vec::new(),
            selected_row: 0,
            column_offset: 0,
            category_cursor: 0,
            details: None,
            status_message: String::new(),
        };
        app.refresh_store_order();
        app
    }

    /// Applies a settled item search once its quiet period has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(text) = self.search_debounce.poll(now) {
            self.apply_item_search(&text);
        }
    }

    pub fn search_input_changed(&mut self, now: Instant) {
        self.search_debounce.call(self.search_input.clone(), now);
    }

    pub fn apply_item_search(&mut self, text: &str) {
        self.view.set_search(text, &mut self.columns);
        self.clamp_column_offset();

        self.status_message = if text.is_empty() {
            String::new()
        } else {
            format!(
                "{} of {} items match \"{text}\"",
                self.columns.visible_count(),
                self.columns.columns().len()
            )
        };
    }

    pub fn category_labels(&self) -> &[String] {
        self.catalog.categories.labels()
    }

    pub fn category_cursor_label(&self) -> Option<&str> {
        self.category_cursor
            .checked_sub(1)
            .and_then(|i| self.category_labels().get(i))
            .map(String::as_str)
    }

    pub fn move_category_cursor(&mut self, forward: bool) {
        let len = self.category_labels().len() + 1;
        self.category_cursor = if forward {
            wrap_increment(self.category_cursor, len)
        } else {
            wrap_decrement(self.category_cursor, len)
        };
    }

    /// Flips the category (or "Show All") under the cursor.
    pub fn toggle_category_at_cursor(&mut self) {
        match self.category_cursor_label().map(str::to_string) {
            Some(label) => {
                let on = !self.view.state().categories.is_selected(&label);
                self.view.toggle_category(&label, on, &mut self.columns);
            }
            None => {
                let on = !self.view.state().categories.all_selected();
                self.view.toggle_all(on, &mut self.columns);
            }
        }
        self.clamp_column_offset();
    }

    pub fn visible_item_columns(&self) -> Vec<&str> {
        self.columns.visible_columns().collect()
    }

    pub fn scroll_columns(&mut self, forward: bool) {
        if forward {
            self.column_offset += 1;
            self.clamp_column_offset();
        } else {
            self.column_offset = self.column_offset.saturating_sub(1);
        }
    }

    fn clamp_column_offset(&mut self) {
        let visible = self.columns.visible_count();
        self.column_offset = self.column_offset.min(visible.saturating_sub(1));
    }

    /// Rebuilds the displayed store list from the sort and the store query,
    /// keeping the current store selected when it is still listed.
    pub fn refresh_store_order(&mut self) {
        let previous = self.selected_store_index();
        let order = self.sort.order(&self.catalog.dataset);

        self.store_order = filter_stores(&self.catalog.dataset, order, &self.store_query);

        self.selected_row = previous
            .and_then(|index| self.store_order.iter().position(|&i| i == index))
            .unwrap_or(0);
    }

    pub fn selected_store_index(&self) -> Option<usize> {
        self.store_order.get(self.selected_row).copied()
    }

    pub fn selected_store(&self) -> Option<&StoreEntry> {
        self.selected_store_index()
            .and_then(|index| self.catalog.dataset.store(index))
    }

    pub fn select_relative(&mut self, delta: isize) {
        self.selected_row = step_clamped(self.selected_row, delta, self.store_order.len());
    }

    pub fn select_first(&mut self) {
        self.selected_row = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_row = self.store_order.len().saturating_sub(1);
    }

    /// Name, then post, then the leftmost visible item column.
    pub fn cycle_sort(&mut self) {
        let next = match &self.sort.column {
            SortColumn::Name => SortColumn::Post,
            SortColumn::Post => self
                .visible_item_columns()
                .get(self.column_offset)
                .map_or(SortColumn::Name, |name| SortColumn::Item((*name).to_string())),
            SortColumn::Item(_) => SortColumn::Name,
        };
        self.sort = StoreSort {
            column: next,
            descending: false,
        };
        self.refresh_store_order();
        self.status_message = format!("Sorted by {}", self.sort.column.label());
    }

    pub fn reverse_sort(&mut self) {
        self.sort.descending = !self.sort.descending;
        self.refresh_store_order();
    }

    pub fn open_details(&mut self) {
        let Some(store_index) = self.selected_store_index() else {
            return;
        };
        tracing::debug!(store_index, "opening store details");
        let return_to = match self.screen {
            AppScreen::Map => AppScreen::Map,
            AppScreen::Stores | AppScreen::StoreDetails => AppScreen::Stores,
        };
        self.details = Some(DetailsState::open(&self.catalog, store_index, return_to));
        self.screen = AppScreen::StoreDetails;
    }

    pub fn close_details(&mut self) {
        if let Some(details) = self.details.take() {
            self.screen = details.return_to;
        } else {
            self.screen = AppScreen::Stores;
        }
    }

    pub fn details_store(&self) -> Option<&StoreEntry> {
        self.details
            .as_ref()
            .and_then(|details| self.catalog.dataset.store(details.store_index))
    }

    pub fn move_details_category_cursor(&mut self, forward: bool) {
        let len = self.category_labels().len() + 1;
        if let Some(details) = self.details.as_mut() {
            details.category_cursor = if forward {
                wrap_increment(details.category_cursor, len)
            } else {
                wrap_decrement(details.category_cursor, len)
            };
        }
    }

    /// Flips a category of the popup's own filter and recomputes its rows.
    pub fn toggle_details_category_at_cursor(&mut self) {
        let Some(details) = self.details.as_mut() else {
            return;
        };

        match details.cursor_label().map(str::to_string) {
            Some(label) => {
                let on = !details.categories.is_selected(&label);
                details.categories.toggle(&label, on);
            }
            None => {
                let on = !details.categories.all_selected();
                details.categories.set_all(on);
            }
        }
        details.recompute(&self.catalog);
    }

    /// Re-filters the popup rows after its search text changed.
    pub fn details_search_changed(&mut self) {
        if let Some(details) = self.details.as_mut() {
            details.recompute(&self.catalog);
        }
    }

    pub fn select_details_row(&mut self, delta: isize) {
        if let Some(details) = self.details.as_mut() {
            details.selected_row = step_clamped(details.selected_row, delta, details.rows.len());
        }
    }
}
