//! Search text and category selection, and how they drive column visibility.

use crate::aggregate::CategoryIndex;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Column visibility setter exposed by a grid.
///
/// Updates issued between `begin_update` and `end_update` belong to one
/// batch; a grid should recompute its layout once, at `end_update`.
pub trait GridSurface {
    fn begin_update(&mut self) {}
    fn set_column_visible(&mut self, column: &str, visible: bool);
    fn end_update(&mut self) {}
}

/// In-memory visibility of the item columns of a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnVisibility {
    columns: Vec<String>,
    visible: HashMap<String, bool>,
}

impl ColumnVisibility {
    /// Every column starts visible.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let visible = columns.iter().map(|c| (c.clone(), true)).collect();
        Self { columns, visible }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_visible(&self, column: &str) -> bool {
        self.visible.get(column).copied().unwrap_or(false)
    }

    /// Visible columns in grid order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| self.is_visible(c))
    }

    pub fn visible_count(&self) -> usize {
        self.visible_columns().count()
    }
}

impl GridSurface for ColumnVisibility {
    fn set_column_visible(&mut self, column: &str, visible: bool) {
        if let Some(slot) = self.visible.get_mut(column) {
            *slot = visible;
        }
    }
}

/// Which category labels are switched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySelection {
    labels: Vec<String>,
    selected: BTreeSet<String>,
}

impl CategorySelection {
    /// Starts with every label selected.
    pub fn new(labels: &[String]) -> Self {
        Self {
            labels: labels.to_vec(),
            selected: labels.iter().cloned().collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selected.contains(label)
    }

    pub fn all_selected(&self) -> bool {
        self.selected.len() == self.labels.len()
    }

    pub fn toggle(&mut self, label: &str, on: bool) {
        if on {
            self.selected.insert(label.to_string());
        } else {
            self.selected.remove(label);
        }
    }

    pub fn set_all(&mut self, on: bool) {
        if on {
            self.selected.extend(self.labels.iter().cloned());
        } else {
            self.selected.clear();
        }
    }
}

/// Current search text and category selection of the store grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search: String,
    pub categories: CategorySelection,
}

impl ViewState {
    pub fn new(categories: &CategoryIndex) -> Self {
        Self {
            search: String::new(),
            categories: CategorySelection::new(categories.labels()),
        }
    }
}

/// Applies user toggles and searches to a [`GridSurface`].
///
/// A non-empty search is re-applied after every category change, so the
/// search filter has the last word on a column's visibility.
#[derive(Debug, Clone)]
pub struct ViewController {
    index: Arc<CategoryIndex>,
    columns: Vec<String>,
    state: ViewState,
}

impl ViewController {
    pub fn new(index: Arc<CategoryIndex>, columns: Vec<String>) -> Self {
        let state = ViewState::new(&index);
        Self {
            index,
            columns,
            state,
        }
    }

    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn search(&self) -> &str {
        &self.state.search
    }

    pub fn selected_categories(&self) -> &BTreeSet<String> {
        self.state.categories.selected()
    }

    pub fn toggle_category(&mut self, label: &str, on: bool, surface: &mut impl GridSurface) {
        if !self.index.contains(label) {
            tracing::debug!(category = label, "ignoring toggle for unknown category");
            return;
        }

        self.state.categories.toggle(label, on);
        tracing::debug!(category = label, on, "category toggled");

        surface.begin_update();
        for item in self.index.items(label) {
            surface.set_column_visible(item, on);
        }
        self.apply_search(surface, false);
        surface.end_update();
    }

    pub fn toggle_all(&mut self, on: bool, surface: &mut impl GridSurface) {
        self.state.categories.set_all(on);
        tracing::debug!(on, "all categories toggled");

        surface.begin_update();
        for label in self.index.labels() {
            for item in self.index.items(label) {
                surface.set_column_visible(item, on);
            }
        }
        self.apply_search(surface, false);
        surface.end_update();
    }

    /// Stores the settled search text and re-filters item columns.
    ///
    /// Clearing a previously non-empty search shows every column again.
    pub fn set_search(&mut self, text: &str, surface: &mut impl GridSurface) {
        let previous = std::mem::replace(&mut self.state.search, text.to_string());
        let reset = text.trim().is_empty() && previous != text;
        tracing::debug!(search = text, reset, "item search applied");

        surface.begin_update();
        self.apply_search(surface, reset);
        surface.end_update();
    }

    /// Whether the current search alone lets `name` through.
    pub fn matches_search(&self, name: &str) -> bool {
        self.state.search.is_empty() || contains_ignore_case(name, &self.state.search)
    }

    fn apply_search(&self, surface: &mut impl GridSurface, reset: bool) {
        if self.state.search.is_empty() && !reset {
            return;
        }

        for column in &self.columns {
            let visible = reset || contains_ignore_case(column, &self.state.search);
            surface.set_column_visible(column, visible);
        }
    }
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
