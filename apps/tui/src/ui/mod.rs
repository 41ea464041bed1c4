// Rendering for every screen of the store prices dashboard

pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Stores => screens::stores::render_stores_view(app, f),
        AppScreen::StoreDetails => {
            // The popup sits over the screen it was opened from
            match app.details.as_ref().map(|details| details.return_to) {
                Some(AppScreen::Map) => screens::map::render_map_view(app, f),
                _ => screens::stores::render_stores_view(app, f),
            }
            screens::store_details::render_store_details(app, f);
        }
        AppScreen::Map => screens::map::render_map_view(app, f),
    }

    if app.show_help {
        let area = f.area();
        screens::help::render_help_popup(app, f, area);
    }
}
