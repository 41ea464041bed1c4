use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span, Text},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap,
    },
    Frame,
};
use store_prices_core::{format_currency, geo_bounds, normalize, PriceCell, Trend};

use crate::state::{Dashboard, Typing, TABS};

const ITEM_WIDTH: u16 = 10;

pub fn render_dashboard(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(dashboard, f, layout[0]);

    let tabs = Tabs::new(TABS.iter().map(|title| TextLine::from(*title)))
        .select(dashboard.tab)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0, 0, 238))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));
    f.render_widget(tabs, layout[1]);

    render_category_line(dashboard, f, layout[2]);

    match dashboard.tab {
        0 => render_store_table(dashboard, f, layout[3]),
        1 => render_map(dashboard, f, layout[3]),
        _ => render_details(dashboard, f, layout[3]),
    }

    let keys = match dashboard.typing {
        Some(Typing::Items) => "Type to search items  Enter/Esc: done",
        Some(Typing::Stores) => "Type to filter stores  Enter/Esc: done",
        Some(Typing::DetailItems) => "Type to search detail rows  Enter/Esc: done",
        None => {
            "←/→: tabs  ↑/↓: store  ,/.: category  space: toggle  1-9: category  a: all  \
             [ ]: scroll items  /: search  f: filter stores"
        }
    };
    let footer = Paragraph::new(keys)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(footer, layout[4]);
}

fn render_header(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let catalog = &dashboard.catalog;
    let cursor = |target| {
        if dashboard.typing == Some(target) {
            "_"
        } else {
            ""
        }
    };
    let line = TextLine::from(vec![
        Span::styled(
            format!(
                "Stores: {}  Items: {}  Categories: {}",
                catalog.dataset.len(),
                catalog.prices.len(),
                catalog.categories.len()
            ),
            Style::default().fg(Color::White),
        ),
        Span::raw("   "),
        Span::styled("Search: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}{}", dashboard.search_input, cursor(Typing::Items)),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("   "),
        Span::styled("Stores: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}{}", dashboard.store_query, cursor(Typing::Stores)),
            Style::default().fg(Color::Yellow),
        ),
    ]);

    let paragraph = Paragraph::new(Text::from(line))
        .block(
            Block::default()
                .title("Overview")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_category_line(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let labels = dashboard.catalog.categories.labels();
    let (selections, all_on) = if dashboard.tab == 0 {
        let categories = &dashboard.view.state().categories;
        (categories, categories.all_selected())
    } else {
        (
            &dashboard.detail_categories,
            dashboard.detail_categories.all_selected(),
        )
    };

    let marker = if all_on { "[x]" } else { "[ ]" };
    let mut spans = vec![Span::styled(
        format!("{marker} Show All "),
        category_style(all_on, dashboard.category_cursor == 0),
    )];

    for (index, label) in labels.iter().enumerate() {
        let on = selections.is_selected(label);
        let key = if index < 9 {
            format!("{}:", index + 1)
        } else {
            String::new()
        };
        spans.push(Span::styled(
            format!("{key}{label} "),
            category_style(on, dashboard.category_cursor == index + 1),
        ));
    }

    let paragraph = Paragraph::new(TextLine::from(spans)).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn category_style(on: bool, under_cursor: bool) -> Style {
    let style = if on {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    if under_cursor {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

fn render_store_table(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let dataset = &dashboard.catalog.dataset;
    if dashboard.store_order.is_empty() {
        let message = if dashboard.store_query.trim().is_empty() {
            "No stores in all.json"
        } else {
            "No stores match the filter"
        };
        let paragraph = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let fits = usize::from(area.width.saturating_sub(34) / (ITEM_WIDTH + 1)).max(1);
    let items: Vec<&str> = dashboard
        .columns
        .visible_columns()
        .skip(dashboard.column_offset)
        .take(fits)
        .collect();

    let mut header = vec![Cell::from("Post"), Cell::from("Name")];
    header.extend(items.iter().map(|name| Cell::from(*name)));

    let max_rows = area.height.saturating_sub(1) as usize;
    let first = dashboard.selected.saturating_sub(max_rows.saturating_sub(1));

    let rows = dashboard
        .store_order
        .iter()
        .enumerate()
        .skip(first)
        .take(max_rows)
        .filter_map(|(row, &index)| dataset.store(index).map(|entry| (row, entry)))
        .map(|(row, entry)| {
            let mut cells = vec![
                Cell::from(entry.store.address.postal_zip.clone()),
                Cell::from(normalize(&entry.store.name)),
            ];
            cells.extend(items.iter().map(|name| match entry.price_of(name) {
                cell @ PriceCell::Price(_) => Cell::from(cell.to_string()),
                cell @ PriceCell::NotApplicable => {
                    Cell::from(cell.to_string()).style(Style::default().fg(Color::DarkGray))
                }
            }));

            let style = if row == dashboard.selected {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Rgb(0, 0, 238))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(cells).style(style)
        });

    let mut widths = vec![Constraint::Length(7), Constraint::Length(24)];
    widths.extend(items.iter().map(|_| Constraint::Length(ITEM_WIDTH)));

    let table = Table::new(rows, widths)
        .header(
            Row::new(header).style(
                Style::default()
                    .fg(Color::Rgb(0, 0, 238))
                    .bg(Color::Rgb(200, 200, 200))
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_map(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let stores = dashboard.catalog.dataset.stores();
    let block = Block::default()
        .title("Store Map")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(bounds) = geo_bounds(stores.iter().map(|entry| &entry.store.location), 0.5) else {
        let paragraph = Paragraph::new("No store locations available")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    };

    let coords: Vec<(f64, f64)> = stores
        .iter()
        .map(|entry| (entry.store.location.longitude, entry.store.location.latitude))
        .collect();
    let selected = dashboard
        .selected_store_index()
        .and_then(|index| stores.get(index))
        .map(|entry| {
            (
                entry.store.location.longitude,
                entry.store.location.latitude,
                normalize(&entry.store.name),
            )
        });

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(bounds.longitude)
        .y_bounds(bounds.latitude)
        .paint(move |ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::Gray,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &coords,
                color: Color::Cyan,
            });
            if let Some((x, y, name)) = &selected {
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

fn render_details(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let typing = dashboard.typing == Some(Typing::DetailItems);
    let search = Paragraph::new(format!(
        "Search items: {}{}",
        dashboard.detail_query,
        if typing { "_" } else { "" }
    ))
    .style(Style::default().fg(if typing { Color::Yellow } else { Color::Gray }));
    f.render_widget(search, chunks[0]);
    let area = chunks[1];

    let title = dashboard
        .selected_store_index()
        .and_then(|index| dashboard.catalog.dataset.store(index))
        .map_or_else(
            || "Details".to_string(),
            |entry| format!("Details: {}", normalize(&entry.store.name)),
        );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    if dashboard.detail_rows.is_empty() {
        let paragraph = Paragraph::new("No items match the categories and search")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let rows = dashboard.detail_rows.iter().map(|row| {
        let color = match row.trend() {
            Trend::Above => Color::LightRed,
            Trend::Below => Color::LightGreen,
        };
        Row::new(vec![
            Cell::from(row.name.clone()),
            Cell::from(format_currency(row.price)),
            Cell::from(row.relative_deviation.to_string()),
            Cell::from(format_currency(row.average)),
        ])
        .style(Style::default().fg(color))
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
    .header(
        Row::new(vec!["Name", "Price", "Diff.", "State Avg."]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    )
    .block(block)
    .column_spacing(1);
    f.render_widget(table, area);
}
