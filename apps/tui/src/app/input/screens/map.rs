use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_map_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Char('m') => {
            app.screen = AppScreen::Stores;
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Up | KeyCode::Left => app.select_relative(-1),
        KeyCode::Down | KeyCode::Right => app.select_relative(1),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Enter => app.open_details(),
        _ => {}
    }
}
