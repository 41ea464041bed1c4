use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;
use std::time::Instant;

mod help;
mod map;
mod store_details;
mod stores;

pub fn dispatch_input(app: &mut App, key: KeyCode, now: Instant) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Stores => stores::handle_stores_input(app, key, now),
        AppScreen::StoreDetails => store_details::handle_store_details_input(app, key),
        AppScreen::Map => map::handle_map_input(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::sample_catalog;
    use crate::app::state::Focus;
    use std::time::Duration;

    fn app() -> App {
        App::new(sample_catalog(), Duration::from_millis(300))
    }

    fn press(app: &mut App, keys: &[KeyCode], now: Instant) {
        for key in keys {
            dispatch_input(app, *key, now);
        }
    }

    #[test]
    fn typing_item_search_is_debounced() {
        let mut app = app();
        let start = Instant::now();

        press(
            &mut app,
            &[KeyCode::Char('/'), KeyCode::Char('b'), KeyCode::Char('r')],
            start,
        );
        assert_eq!(app.focus, Focus::ItemSearch);
        assert_eq!(app.search_input, "br");
        assert_eq!(app.columns.visible_count(), 3);

        app.tick(start + Duration::from_millis(300));
        assert_eq!(app.visible_item_columns(), vec!["Bread"]);
    }

    #[test]
    fn enter_applies_search_immediately() {
        let mut app = app();
        let now = Instant::now();
        press(
            &mut app,
            &[KeyCode::Char('/'), KeyCode::Char('o'), KeyCode::Enter],
            now,
        );
        assert_eq!(app.focus, Focus::Grid);
        assert_eq!(app.view.search(), "o");
        assert!(!app.search_debounce.is_pending());
    }

    #[test]
    fn question_mark_is_typed_while_searching() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, &[KeyCode::Char('f'), KeyCode::Char('?')], now);
        assert!(!app.show_help);
        assert_eq!(app.store_query, "?");

        press(&mut app, &[KeyCode::Esc, KeyCode::Char('?')], now);
        assert!(app.show_help);
        assert!(app.store_query.is_empty());
    }

    #[test]
    fn details_return_to_the_opening_screen() {
        let mut app = app();
        let now = Instant::now();

        press(&mut app, &[KeyCode::Char('m'), KeyCode::Enter], now);
        assert_eq!(app.screen, AppScreen::StoreDetails);

        press(&mut app, &[KeyCode::Esc], now);
        assert_eq!(app.screen, AppScreen::Map);

        press(&mut app, &[KeyCode::Esc, KeyCode::Enter, KeyCode::Esc], now);
        assert_eq!(app.screen, AppScreen::Stores);
    }

    #[test]
    fn category_panel_toggles_columns() {
        let mut app = app();
        let now = Instant::now();
        press(
            &mut app,
            &[KeyCode::Char('c'), KeyCode::Down, KeyCode::Char(' ')],
            now,
        );
        assert_eq!(app.focus, Focus::Categories);
        assert_eq!(app.visible_item_columns(), vec!["Bread"]);

        press(&mut app, &[KeyCode::Char('a')], now);
        assert_eq!(app.columns.visible_count(), 3);
    }

    #[test]
    fn details_search_takes_typed_keys() {
        let mut app = app();
        let now = Instant::now();
        press(
            &mut app,
            &[KeyCode::Enter, KeyCode::Char('/'), KeyCode::Char('q'), KeyCode::Char('?')],
            now,
        );
        assert!(app.running);
        assert!(!app.show_help);
        let details = app.details.as_ref().unwrap();
        assert_eq!(details.search, "q?");
        assert!(details.rows.is_empty());

        press(&mut app, &[KeyCode::Esc], now);
        let details = app.details.as_ref().unwrap();
        assert!(!details.searching);
        assert_eq!(details.rows.len(), 3);

        press(&mut app, &[KeyCode::Char('/'), KeyCode::Char('b'), KeyCode::Enter], now);
        assert_eq!(app.details.as_ref().unwrap().rows.len(), 1);
        assert_eq!(app.screen, AppScreen::StoreDetails);
    }

    #[test]
    fn q_quits_from_the_grid() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('q')], Instant::now());
        assert!(!app.running);
    }
}
