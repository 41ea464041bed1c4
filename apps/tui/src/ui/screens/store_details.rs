use crate::app::App;
use crate::ui::widgets::hints::shortcut_line;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;
use store_prices_core::{format_currency, normalize, Trend};

pub fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Above => Color::LightRed,
        Trend::Below => Color::LightGreen,
    }
}

/// Popup comparing one store's prices with the average over all stores.
pub fn render_store_details(app: &App, f: &mut Frame<'_>) {
    let (Some(details), Some(store)) = (app.details.as_ref(), app.details_store()) else {
        return;
    };

    let popup_area = centered_rect(80, 80, f.area());
    f.render_widget(ClearWidget, popup_area);

    let block = Block::default()
        .title(format!(
            "Details: {} ({})",
            normalize(&store.store.name),
            store.store.address.postal_zip
        ))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(inner);

    // Category filter of the popup, independent of the grid's
    let mut spans = Vec::new();
    let labels = std::iter::once(("Show All", details.categories.all_selected())).chain(
        details
            .categories
            .labels()
            .iter()
            .map(|label| (label.as_str(), details.categories.is_selected(label))),
    );
    for (i, (label, on)) in labels.enumerate() {
        let mark = if on { "[x]" } else { "[ ]" };
        let style = if i == details.category_cursor {
            Style::default()
                .bg(Color::Rgb(0, 0, 238))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else if on {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{mark} {label}"), style));
        spans.push(Span::raw("  "));
    }
    let categories = Paragraph::new(TextLine::from(spans))
        .block(Block::default().title("Categories").borders(Borders::BOTTOM))
        .wrap(Wrap { trim: true });
    f.render_widget(categories, chunks[0]);

    let search_style = if details.searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if details.searching { "_" } else { "" };
    let search = Paragraph::new(TextLine::from(vec![
        Span::styled("Search items: ", search_style),
        Span::raw(format!("{}{cursor}", details.search)),
    ]));
    f.render_widget(search, chunks[1]);

    if details.rows.is_empty() {
        let empty = Paragraph::new("No items match the categories and search.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(empty, chunks[2]);
    } else {
        let header = Row::new(vec![
            Cell::from("Name"),
            Cell::from("Price"),
            Cell::from("Diff."),
            Cell::from("State Avg."),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let max_visible_rows = chunks[2].height.saturating_sub(1) as usize;
        let offset = scroll_offset(details.rows.len(), max_visible_rows, details.selected_row);

        let rows = details
            .rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(max_visible_rows)
            .map(|(i, row)| {
                let mut style = Style::default().fg(trend_color(row.trend()));
                if i == details.selected_row {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Row::new(vec![
                    Cell::from(row.name.clone()),
                    Cell::from(format_currency(row.price)),
                    Cell::from(row.relative_deviation.to_string()),
                    Cell::from(format_currency(row.average)),
                ])
                .style(style)
            });

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(11),
            ],
        )
        .header(header)
        .column_spacing(1);
        f.render_widget(table, chunks[2]);
    }

    let footer = Paragraph::new(shortcut_line(&[
        ("↑/↓", "Items"),
        ("←/→", "Category"),
        ("Space", "Toggle"),
        ("a", "Show all"),
        ("/", "Search"),
        ("Esc", "Close"),
    ]))
    .block(Block::default().borders(Borders::TOP))
    .alignment(Alignment::Center);
    f.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::sample_catalog;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Duration;

    #[test]
    fn popup_shows_comparison_columns() {
        let mut app = App::new(sample_catalog(), Duration::from_millis(300));
        app.select_last();
        app.open_details();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render_store_details(&app, f)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();

        assert!(text.contains("Details: Tacoma Store 2 (98402)"));
        assert!(text.contains("State Avg."));
        assert!(text.contains("16.67%"));
        assert!(text.contains("n/a"));
        assert!(text.contains("Search items:"));
    }
}
