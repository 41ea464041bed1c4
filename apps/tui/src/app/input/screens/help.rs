use crate::app::state::{App, AppScreen, Focus};
use crossterm::event::KeyCode;

/// F1 always toggles help; `?` does too unless a search box is being typed in.
pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    let typing = match app.screen {
        AppScreen::Stores => matches!(app.focus, Focus::ItemSearch | Focus::StoreSearch),
        AppScreen::StoreDetails => app.details.as_ref().is_some_and(|details| details.searching),
        AppScreen::Map => false,
    };

    if key == KeyCode::F(1) || (key == KeyCode::Char('?') && !typing) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}
