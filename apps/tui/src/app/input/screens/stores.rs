use crate::app::state::{App, AppScreen, Focus};
use crossterm::event::KeyCode;
use std::time::Instant;

const PAGE: isize = 5;

pub fn handle_stores_input(app: &mut App, key: KeyCode, now: Instant) {
    match app.focus {
        Focus::Grid => handle_grid_input(app, key),
        Focus::ItemSearch => handle_item_search_input(app, key, now),
        Focus::StoreSearch => handle_store_search_input(app, key),
        Focus::Categories => handle_categories_input(app, key),
    }
}

fn handle_grid_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        KeyCode::Enter => app.open_details(),
        KeyCode::Up => app.select_relative(-1),
        KeyCode::Down => app.select_relative(1),
        KeyCode::PageUp => app.select_relative(-PAGE),
        KeyCode::PageDown => app.select_relative(PAGE),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Left => app.scroll_columns(false),
        KeyCode::Right => app.scroll_columns(true),
        KeyCode::Char('/') => {
            app.focus = Focus::ItemSearch;
        }
        KeyCode::Char('f') => {
            app.focus = Focus::StoreSearch;
        }
        KeyCode::Char('c') | KeyCode::Tab => {
            app.focus = Focus::Categories;
        }
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('r') => app.reverse_sort(),
        KeyCode::Char('m') => {
            app.screen = AppScreen::Map;
        }
        _ => {}
    }
}

fn handle_item_search_input(app: &mut App, key: KeyCode, now: Instant) {
    match key {
        KeyCode::Esc => {
            app.focus = Focus::Grid;
        }
        KeyCode::Enter => {
            // Settle right away instead of waiting out the quiet period
            if let Some(text) = app.search_debounce.cancel() {
                app.apply_item_search(&text);
            }
            app.focus = Focus::Grid;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            app.search_input_changed(now);
        }
        KeyCode::Char(ch) => {
            app.search_input.push(ch);
            app.search_input_changed(now);
        }
        _ => {}
    }
}

fn handle_store_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.store_query.clear();
            app.refresh_store_order();
            app.focus = Focus::Grid;
        }
        KeyCode::Enter => {
            app.focus = Focus::Grid;
        }
        KeyCode::Backspace => {
            app.store_query.pop();
            app.refresh_store_order();
        }
        KeyCode::Char(ch) => {
            app.store_query.push(ch);
            app.refresh_store_order();
        }
        KeyCode::Up => app.select_relative(-1),
        KeyCode::Down => app.select_relative(1),
        _ => {}
    }
}

fn handle_categories_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Tab => {
            app.focus = Focus::Grid;
        }
        KeyCode::Up => app.move_category_cursor(false),
        KeyCode::Down => app.move_category_cursor(true),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_category_at_cursor(),
        KeyCode::Char('a') => {
            app.category_cursor = 0;
            app.toggle_category_at_cursor();
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        _ => {}
    }
}
