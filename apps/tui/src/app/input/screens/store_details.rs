use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_store_details_input(app: &mut App, key: KeyCode) {
    if app.details.as_ref().is_some_and(|details| details.searching) {
        handle_details_search_input(app, key);
        return;
    }

    match key {
        KeyCode::Esc => app.close_details(),
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Up => app.select_details_row(-1),
        KeyCode::Down => app.select_details_row(1),
        KeyCode::PageUp => app.select_details_row(-5),
        KeyCode::PageDown => app.select_details_row(5),
        KeyCode::Left | KeyCode::BackTab => app.move_details_category_cursor(false),
        KeyCode::Right | KeyCode::Tab => app.move_details_category_cursor(true),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_details_category_at_cursor(),
        KeyCode::Char('/') => {
            if let Some(details) = app.details.as_mut() {
                details.searching = true;
            }
        }
        KeyCode::Char('a') => {
            if let Some(details) = app.details.as_mut() {
                details.category_cursor = 0;
            }
            app.toggle_details_category_at_cursor();
        }
        _ => {}
    }
}

fn handle_details_search_input(app: &mut App, key: KeyCode) {
    let Some(details) = app.details.as_mut() else {
        return;
    };

    match key {
        KeyCode::Enter => details.searching = false,
        KeyCode::Esc => {
            details.searching = false;
            details.search.clear();
        }
        KeyCode::Backspace => {
            details.search.pop();
        }
        KeyCode::Char(ch) => details.search.push(ch),
        _ => return,
    }
    app.details_search_changed();
}
