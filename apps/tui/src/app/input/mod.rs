pub mod helpers;
pub mod screens;

use crate::app::state::App;
use crossterm::event::KeyCode;
use std::time::Instant;

pub fn handle_input(app: &mut App, key: KeyCode, now: Instant) {
    screens::dispatch_input(app, key, now);
}
