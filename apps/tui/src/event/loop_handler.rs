use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::time::{Duration, Instant};

use crate::app::state::Focus;
use crate::app::{handle_input, App};
use crate::terminal::Tui;
use crate::ui;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Run the main application event loop
pub fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    while app.running {
        // Settle a pending item search before drawing
        app.tick(Instant::now());

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if !matches!(event::poll(EVENT_POLL_TIMEOUT), Ok(true)) {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                handle_input(app, key.code, Instant::now());
            }
            Ok(Event::Resize(width, height)) => {
                tracing::debug!(width, height, "terminal resized");
            }
            Ok(Event::Paste(text))
                if matches!(app.focus, Focus::ItemSearch | Focus::StoreSearch) =>
            {
                let now = Instant::now();
                for ch in text.chars().filter(|ch| !ch.is_control()) {
                    handle_input(app, KeyCode::Char(ch), now);
                }
            }
            Ok(
                Event::Key(_)
                | Event::Paste(_)
                | Event::Mouse(_)
                | Event::FocusGained
                | Event::FocusLost,
            ) => {}
            Err(e) => {
                tracing::warn!(error = %e, "failed to read terminal event");
            }
        }
    }

    tracing::info!("event loop finished");
    Ok(())
}
