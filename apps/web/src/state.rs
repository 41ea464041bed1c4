use ratzilla::event::KeyCode;
use std::time::Duration;
use store_prices_core::{
    compute_details, filter_stores, retain_matching, sort_by_deviation, Catalog,
    CategorySelection, ColumnVisibility, Debouncer, DetailRow, StoreSort, ViewController,
    DEFAULT_DEBOUNCE,
};

pub const TABS: [&str; 3] = ["Stores", "Map", "Details"];

/// Progress of the `all.json` download.
#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready(Box<Dashboard>),
    Failed(String),
}

/// Text box receiving typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Typing {
    Items,
    Stores,
    DetailItems,
}

/// Everything the browser dashboard shows once data has arrived.
///
/// Time is a [`Duration`] since page load since the browser has no
/// `Instant`.
#[derive(Debug)]
pub struct Dashboard {
    pub catalog: Catalog,
    pub view: ViewController,
    pub columns: ColumnVisibility,
    pub store_order: Vec<usize>,
    pub store_query: String,
    pub tab: usize,
    pub selected: usize,
    pub column_offset: usize,
    /// 0 is "Show All", then one entry per category label
    pub category_cursor: usize,
    pub typing: Option<Typing>,
    pub search_input: String,
    pub debounce: Debouncer<String, Duration>,
    pub detail_categories: CategorySelection,
    pub detail_query: String,
    pub detail_rows: Vec<DetailRow>,
}

impl Dashboard {
    pub fn new(catalog: Catalog) -> Self {
        let view = catalog.view_controller();
        let columns = catalog.column_visibility();
        let detail_categories = CategorySelection::new(catalog.categories.labels());

        let mut dashboard = Self {
            catalog,
            view,
            columns,
            store_order: Vec::new(),
            store_query: String::new(),
            tab: 0,
            selected: 0,
            column_offset: 0,
            category_cursor: 0,
            typing: None,
            search_input: String::new(),
            debounce: Debouncer::new(DEFAULT_DEBOUNCE),
            detail_categories,
            detail_query: String::new(),
            detail_rows: Vec::new(),
        };
        dashboard.refresh_store_order();
        dashboard
    }

    pub fn selected_store_index(&self) -> Option<usize> {
        self.store_order.get(self.selected).copied()
    }

    /// Label under the category cursor, `None` on "Show All".
    pub fn cursor_label(&self) -> Option<&str> {
        self.category_cursor
            .checked_sub(1)
            .and_then(|i| self.catalog.categories.labels().get(i))
            .map(String::as_str)
    }

    /// Applies a settled search; called once per frame.
    pub fn tick(&mut self, now: Duration) {
        if let Some(text) = self.debounce.poll(now) {
            self.view.set_search(&text, &mut self.columns);
            self.clamp_column_offset();
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Duration) {
        if let Some(target) = self.typing {
            self.handle_typing_key(target, code, now);
            return;
        }

        match code {
            KeyCode::Left => self.switch_tab(TABS.len() - 1),
            KeyCode::Right | KeyCode::Tab => self.switch_tab(1),
            KeyCode::Up => self.select(false),
            KeyCode::Down => self.select(true),
            KeyCode::Char('[') => self.column_offset = self.column_offset.saturating_sub(1),
            KeyCode::Char(']') => {
                self.column_offset += 1;
                self.clamp_column_offset();
            }
            KeyCode::Char(',') => self.move_category_cursor(false),
            KeyCode::Char('.') => self.move_category_cursor(true),
            KeyCode::Char(' ') => self.toggle_at_cursor(),
            KeyCode::Char('/') if self.tab == 0 => self.typing = Some(Typing::Items),
            KeyCode::Char('/') if self.tab == 2 => self.typing = Some(Typing::DetailItems),
            KeyCode::Char('f') => self.typing = Some(Typing::Stores),
            KeyCode::Char('a') => {
                self.category_cursor = 0;
                self.toggle_at_cursor();
            }
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as usize - '0' as usize;
                if index <= self.catalog.categories.labels().len() {
                    self.category_cursor = index;
                    self.toggle_at_cursor();
                }
            }
            _ => {}
        }
    }

    fn handle_typing_key(&mut self, target: Typing, code: KeyCode, now: Duration) {
        let text = match target {
            Typing::Items => &mut self.search_input,
            Typing::Stores => &mut self.store_query,
            Typing::DetailItems => &mut self.detail_query,
        };

        match code {
            KeyCode::Enter | KeyCode::Esc => {
                self.typing = None;
                return;
            }
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Char(ch) => text.push(ch),
            _ => return,
        }

        match target {
            Typing::Items => self.debounce.call(self.search_input.clone(), now),
            Typing::Stores => self.refresh_store_order(),
            Typing::DetailItems => self.refresh_details(),
        }
    }

    fn switch_tab(&mut self, step: usize) {
        self.tab = (self.tab + step) % TABS.len();
    }

    fn select(&mut self, forward: bool) {
        let last = self.store_order.len().saturating_sub(1);
        let selected = if forward {
            (self.selected + 1).min(last)
        } else {
            self.selected.saturating_sub(1)
        };
        if selected != self.selected {
            self.selected = selected;
            self.reset_details();
        }
    }

    /// Rebuilds the listed stores from the store query, keeping the
    /// current store selected when it is still listed.
    fn refresh_store_order(&mut self) {
        let previous = self.selected_store_index();
        let order = StoreSort::default().order(&self.catalog.dataset);
        self.store_order = filter_stores(&self.catalog.dataset, order, &self.store_query);

        let position = previous.and_then(|index| self.store_order.iter().position(|&i| i == index));
        self.selected = position.unwrap_or(0);
        if position.is_some() {
            self.refresh_details();
        } else {
            self.reset_details();
        }
    }

    fn move_category_cursor(&mut self, forward: bool) {
        let len = self.catalog.categories.labels().len() + 1;
        self.category_cursor = if forward {
            (self.category_cursor + 1) % len
        } else {
            (self.category_cursor + len - 1) % len
        };
    }

    /// Toggles the label (or "Show All") under the cursor. The grid owns
    /// the toggles on the stores tab, the details filter everywhere else.
    fn toggle_at_cursor(&mut self) {
        let label = self.cursor_label().map(str::to_string);

        if self.tab == 0 {
            let categories = &self.view.state().categories;
            match label {
                Some(label) => {
                    let on = !categories.is_selected(&label);
                    self.view.toggle_category(&label, on, &mut self.columns);
                }
                None => {
                    let on = !categories.all_selected();
                    self.view.toggle_all(on, &mut self.columns);
                }
            }
            self.clamp_column_offset();
        } else {
            match label {
                Some(label) => {
                    let on = !self.detail_categories.is_selected(&label);
                    self.detail_categories.toggle(&label, on);
                }
                None => {
                    let on = !self.detail_categories.all_selected();
                    self.detail_categories.set_all(on);
                }
            }
            self.refresh_details();
        }
    }

    fn clamp_column_offset(&mut self) {
        let visible = self.columns.visible_count();
        self.column_offset = self.column_offset.min(visible.saturating_sub(1));
    }

    /// A newly selected store starts with every category and no search.
    fn reset_details(&mut self) {
        self.detail_categories.set_all(true);
        self.detail_query.clear();
        self.refresh_details();
    }

    fn refresh_details(&mut self) {
        let Some(store) = self
            .selected_store_index()
            .and_then(|index| self.catalog.dataset.store(index))
        else {
            self.detail_rows.clear();
            return;
        };

        let mut rows = compute_details(
            store,
            &self.catalog.prices,
            self.detail_categories.selected(),
        );
        retain_matching(&mut rows, &self.detail_query);
        sort_by_deviation(&mut rows);
        self.detail_rows = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store_prices_core::Dataset;

    fn dashboard() -> Dashboard {
        let dataset = Dataset::from_json_str(
            r#"[
            {
                "store": {
                    "name": "SPOKANE STORE WA",
                    "address": { "postalZip": "99201" },
                    "location": { "latitude": 47.66, "longitude": -117.43 }
                },
                "items": [
                    { "name": "Eggs", "price": 4.0, "categories": ["Dairy"] },
                    { "name": "Rice", "price": 1.0, "categories": ["Pantry"] }
                ]
            },
            {
                "store": {
                    "name": "BELLEVUE STORE WA",
                    "address": { "postalZip": "98004" },
                    "location": { "latitude": 47.61, "longitude": -122.2 }
                },
                "items": [
                    { "name": "Eggs", "price": 2.0, "categories": ["Dairy"] },
                    { "name": "Rice", "price": 3.0, "categories": ["Pantry"] }
                ]
            }
        ]"#,
        )
        .unwrap();
        Dashboard::new(Catalog::new(dataset))
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn stores_are_ordered_by_name_and_details_follow_selection() {
        let mut dashboard = dashboard();
        assert_eq!(dashboard.store_order, vec![1, 0]);
        assert_eq!(dashboard.detail_rows[0].name, "Rice");

        dashboard.handle_key(KeyCode::Down, ms(0));
        assert_eq!(dashboard.selected_store_index(), Some(0));
        assert_eq!(dashboard.detail_rows[0].name, "Eggs");
    }

    #[test]
    fn digits_toggle_grid_or_detail_categories_by_tab() {
        let mut dashboard = dashboard();

        dashboard.handle_key(KeyCode::Char('1'), ms(0));
        assert!(!dashboard.columns.is_visible("Eggs"));
        assert_eq!(dashboard.detail_rows.len(), 2);

        dashboard.handle_key(KeyCode::Right, ms(0));
        dashboard.handle_key(KeyCode::Right, ms(0));
        assert_eq!(TABS[dashboard.tab], "Details");
        dashboard.handle_key(KeyCode::Char('2'), ms(0));
        assert_eq!(dashboard.detail_rows.len(), 1);
        assert!(dashboard.columns.is_visible("Rice"));
    }

    #[test]
    fn search_waits_for_quiet_period() {
        let mut dashboard = dashboard();

        dashboard.handle_key(KeyCode::Char('/'), ms(0));
        dashboard.handle_key(KeyCode::Char('r'), ms(0));
        dashboard.handle_key(KeyCode::Char('i'), ms(100));
        dashboard.tick(ms(300));
        assert_eq!(dashboard.columns.visible_count(), 2);

        dashboard.tick(ms(400));
        assert_eq!(dashboard.view.search(), "ri");
        assert!(!dashboard.columns.is_visible("Eggs"));

        dashboard.handle_key(KeyCode::Esc, ms(500));
        assert_eq!(dashboard.typing, None);
    }

    #[test]
    fn left_wraps_to_last_tab() {
        let mut dashboard = dashboard();
        dashboard.handle_key(KeyCode::Left, ms(0));
        assert_eq!(TABS[dashboard.tab], "Details");
    }

    fn ten_category_dashboard() -> Dashboard {
        let items: Vec<String> = (1..=10)
            .map(|n| format!(r#"{{ "name": "Item{n}", "price": {n}.0, "categories": ["Cat{n}"] }}"#))
            .collect();
        let json = format!(
            r#"[{{
                "store": {{
                    "name": "YAKIMA STORE WA",
                    "address": {{ "postalZip": "98901" }},
                    "location": {{ "latitude": 46.6, "longitude": -120.5 }}
                }},
                "items": [{}]
            }}]"#,
            items.join(",")
        );
        Dashboard::new(Catalog::new(Dataset::from_json_str(&json).unwrap()))
    }

    #[test]
    fn category_cursor_reaches_labels_past_nine() {
        let mut dashboard = ten_category_dashboard();
        assert_eq!(dashboard.catalog.categories.labels().len(), 10);

        dashboard.handle_key(KeyCode::Char(','), ms(0));
        assert_eq!(dashboard.cursor_label(), Some("Cat10"));
        dashboard.handle_key(KeyCode::Char(' '), ms(0));
        assert!(!dashboard.columns.is_visible("Item10"));
        assert!(dashboard.columns.is_visible("Item9"));

        dashboard.handle_key(KeyCode::Char('.'), ms(0));
        assert_eq!(dashboard.cursor_label(), None);
        dashboard.handle_key(KeyCode::Char(' '), ms(0));
        assert_eq!(dashboard.columns.visible_count(), 10);

        dashboard.handle_key(KeyCode::Right, ms(0));
        dashboard.handle_key(KeyCode::Right, ms(0));
        dashboard.handle_key(KeyCode::Char(','), ms(0));
        dashboard.handle_key(KeyCode::Char(' '), ms(0));
        assert_eq!(dashboard.detail_rows.len(), 9);
        assert!(dashboard.detail_rows.iter().all(|row| row.name != "Item10"));
    }

    #[test]
    fn store_filter_narrows_list_and_keeps_selection() {
        let mut dashboard = dashboard();
        dashboard.handle_key(KeyCode::Down, ms(0));
        assert_eq!(dashboard.selected_store_index(), Some(0));

        dashboard.handle_key(KeyCode::Char('f'), ms(0));
        for ch in "spokane".chars() {
            dashboard.handle_key(KeyCode::Char(ch), ms(0));
        }
        assert_eq!(dashboard.store_order, vec![0]);
        assert_eq!(dashboard.selected, 0);
        assert_eq!(dashboard.selected_store_index(), Some(0));

        for _ in 0..7 {
            dashboard.handle_key(KeyCode::Backspace, ms(0));
        }
        for ch in "98004".chars() {
            dashboard.handle_key(KeyCode::Char(ch), ms(0));
        }
        assert_eq!(dashboard.selected_store_index(), Some(1));
        assert_eq!(dashboard.detail_rows[0].name, "Rice");

        dashboard.handle_key(KeyCode::Enter, ms(0));
        assert_eq!(dashboard.typing, None);
        assert_eq!(dashboard.store_query, "98004");
    }

    #[test]
    fn details_tab_searches_rows_by_name() {
        let mut dashboard = dashboard();
        dashboard.handle_key(KeyCode::Left, ms(0));
        dashboard.handle_key(KeyCode::Char('/'), ms(0));
        assert_eq!(dashboard.typing, Some(Typing::DetailItems));

        dashboard.handle_key(KeyCode::Char('E'), ms(0));
        dashboard.handle_key(KeyCode::Char('g'), ms(0));
        assert_eq!(dashboard.detail_rows.len(), 1);
        assert_eq!(dashboard.detail_rows[0].name, "Eggs");
        assert_eq!(dashboard.columns.visible_count(), 2);

        dashboard.handle_key(KeyCode::Esc, ms(0));
        dashboard.handle_key(KeyCode::Char('a'), ms(0));
        assert!(dashboard.detail_rows.is_empty());
    }

    #[test]
    fn detail_filters_reset_when_selection_moves() {
        let mut dashboard = dashboard();
        dashboard.handle_key(KeyCode::Left, ms(0));
        dashboard.handle_key(KeyCode::Char('1'), ms(0));
        dashboard.handle_key(KeyCode::Char('/'), ms(0));
        dashboard.handle_key(KeyCode::Char('r'), ms(0));
        dashboard.handle_key(KeyCode::Enter, ms(0));
        assert_eq!(dashboard.detail_rows.len(), 1);
        assert!(!dashboard.detail_categories.is_selected("Dairy"));

        dashboard.handle_key(KeyCode::Down, ms(0));
        assert!(dashboard.detail_categories.all_selected());
        assert!(dashboard.detail_query.is_empty());
        assert_eq!(dashboard.detail_rows.len(), 2);

        dashboard.handle_key(KeyCode::Down, ms(0));
        dashboard.handle_key(KeyCode::Char('2'), ms(0));
        assert_eq!(dashboard.detail_rows.len(), 1);
    }
}
