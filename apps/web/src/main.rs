mod render;
mod state;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use ratzilla::ratatui::{
    layout::{Alignment, Margin},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Text},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use state::{Dashboard, LoadState};
use store_prices_core::{Catalog, Dataset, StoreEntry};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Request, RequestInit, RequestMode, Response};

const DATA_URL: &str = "all.json";

fn main() -> io::Result<()> {
    let load_state = Rc::new(RefCell::new(LoadState::Loading));

    spawn_local(fetch_dataset(load_state.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let load_state = load_state.clone();
        move |event| {
            if let LoadState::Ready(dashboard) = &mut *load_state.borrow_mut() {
                dashboard.handle_key(event.code, now());
            }
        }
    });

    terminal.draw_web(move |f| {
        let area = f.area();
        let block = Block::default()
            .title("Store Prices")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area).inner(Margin::new(1, 1));
        f.render_widget(block, area);

        let mut load_state = load_state.borrow_mut();
        let message = match &mut *load_state {
            LoadState::Ready(dashboard) => {
                dashboard.tick(now());
                render::render_dashboard(dashboard, f, inner);
                return;
            }
            LoadState::Loading => format!("Loading {DATA_URL}..."),
            LoadState::Failed(error) => format!("Could not load {DATA_URL}: {error}"),
        };

        let paragraph =
            Paragraph::new(Text::from(TextLine::from(message))).alignment(Alignment::Center);
        f.render_widget(paragraph, inner);
    });

    Ok(())
}

/// Milliseconds since the epoch as a monotonic-enough clock for debouncing.
fn now() -> Duration {
    let millis = js_sys::Date::now();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Duration::from_millis(millis.max(0.0) as u64)
}

async fn fetch_dataset(state: Rc<RefCell<LoadState>>) {
    let next = match load_catalog().await {
        Ok(catalog) => LoadState::Ready(Box::new(Dashboard::new(catalog))),
        Err(error) => {
            web_sys::console::error_1(&format!("Failed to load {DATA_URL}: {error}").into());
            LoadState::Failed(error)
        }
    };
    *state.borrow_mut() = next;
}

async fn load_catalog() -> Result<Catalog, String> {
    let window = web_sys::window().ok_or("no window")?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(DATA_URL, &opts)
        .map_err(|_| "could not build request".to_string())?;

    let response_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| "request failed".to_string())?;

    let response = response_value
        .dyn_into::<Response>()
        .map_err(|_| "unexpected fetch result".to_string())?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let body = response
        .json()
        .map_err(|_| "response has no body".to_string())?;
    let json = wasm_bindgen_futures::JsFuture::from(body)
        .await
        .map_err(|_| "body is not JSON".to_string())?;

    let stores: Vec<StoreEntry> =
        serde_wasm_bindgen::from_value(json).map_err(|error| error.to_string())?;
    let dataset = Dataset::from_stores(stores).map_err(|error| error.to_string())?;

    Ok(Catalog::new(dataset))
}
