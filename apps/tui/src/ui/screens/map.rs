use crate::app::App;
use crate::ui::widgets::hints::shortcut_line;
use crate::ui::widgets::map::render_store_map;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use store_prices_core::normalize;

pub fn render_map_view(app: &App, f: &mut Frame<'_>) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(2)])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(34)])
        .split(chunks[0]);

    render_store_map(f, body[0], &app.catalog.dataset, app.selected_store_index());

    let label = |text: &'static str| Span::styled(text, Style::default().add_modifier(Modifier::BOLD));
    let lines = app.selected_store().map_or_else(
        || vec![TextLine::from("No store selected")],
        |entry| {
            let location = &entry.store.location;
            vec![
                TextLine::from(Span::styled(
                    normalize(&entry.store.name),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                TextLine::from(""),
                TextLine::from(vec![label("Post: "), Span::raw(entry.store.address.postal_zip.clone())]),
                TextLine::from(vec![
                    label("Lat/Lon: "),
                    Span::raw(format!("{:.4}, {:.4}", location.latitude, location.longitude)),
                ]),
                TextLine::from(vec![label("Items: "), Span::raw(entry.items.len().to_string())]),
                TextLine::from(""),
                TextLine::from(Span::styled(
                    format!("{} of {} stores", app.selected_row + 1, app.store_order.len()),
                    Style::default().fg(Color::Gray),
                )),
            ]
        },
    );

    let info = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Store").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(info, body[1]);

    let footer = Paragraph::new(shortcut_line(&[
        ("↑/↓", "Select store"),
        ("Enter", "Details"),
        ("Esc/m", "Back to grid"),
        ("q", "Quit"),
    ]))
    .block(Block::default().borders(Borders::TOP))
    .alignment(Alignment::Center);
    f.render_widget(footer, chunks[1]);
}
