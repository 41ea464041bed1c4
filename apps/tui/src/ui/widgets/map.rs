use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use store_prices_core::{geo_bounds, normalize, Dataset};

/// Degrees added around the outermost stores.
const MARGIN: f64 = 0.5;

pub fn render_store_map(f: &mut Frame<'_>, area: Rect, dataset: &Dataset, selected: Option<usize>) {
    let block = Block::default()
        .title("Store Map")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let locations = dataset.stores().iter().map(|entry| &entry.store.location);
    let Some(bounds) = geo_bounds(locations, MARGIN) else {
        let paragraph = Paragraph::new("No store locations available")
            .block(block)
            .alignment(ratatui::layout::Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    };

    let coords: Vec<(f64, f64)> = dataset
        .stores()
        .iter()
        .map(|entry| (entry.store.location.longitude, entry.store.location.latitude))
        .collect();
    let highlight = selected.and_then(|index| {
        dataset
            .store(index)
            .map(|entry| (coords[index], normalize(&entry.store.name)))
    });

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(bounds.longitude)
        .y_bounds(bounds.latitude)
        .paint(move |ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.layer();

            ctx.draw(&Points {
                coords: &coords,
                color: Color::Cyan,
            });

            if let Some(((x, y), name)) = &highlight {
                ctx.draw(&Points {
                    coords: &[(*x, *y)],
                    color: Color::Yellow,
                });
                ctx.print(
                    *x,
                    *y,
                    Span::styled(format!(" {name}"), Style::default().fg(Color::Yellow)),
                );
            }
        });

    f.render_widget(canvas, area);
}
