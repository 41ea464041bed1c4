use crate::app::state::Focus;
use crate::app::App;
use crate::ui::widgets::hints::shortcut_line;
use crate::ui::widgets::tables::{column_window, scroll_offset};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use store_prices_core::{normalize, PriceCell, SortColumn};

const POST_WIDTH: u16 = 7;
const NAME_WIDTH: u16 = 24;
const MIN_ITEM_WIDTH: u16 = 8;
const MAX_ITEM_WIDTH: u16 = 18;
const COLUMN_SPACING: u16 = 1;
const CATEGORY_PANEL_WIDTH: u16 = 26;

pub fn render_stores_view(app: &App, f: &mut Frame<'_>) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(area);

    render_search_bars(app, f, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(CATEGORY_PANEL_WIDTH), Constraint::Min(20)])
        .split(chunks[1]);

    render_category_panel(app, f, body[0]);
    render_store_grid(app, f, body[1]);

    let status = Paragraph::new(app.status_message.as_str()).style(Style::default().fg(Color::Gray));
    f.render_widget(status, chunks[2]);

    let shortcuts = match app.focus {
        Focus::Grid => shortcut_line(&[
            ("↑/↓", "Navigate"),
            ("←/→", "Scroll items"),
            ("Enter", "Details"),
            ("/", "Item search"),
            ("f", "Find store"),
            ("c", "Categories"),
            ("s/r", "Sort/Reverse"),
            ("m", "Map"),
            ("?", "Help"),
            ("q", "Quit"),
        ]),
        Focus::ItemSearch | Focus::StoreSearch => shortcut_line(&[
            ("Enter", "Apply"),
            ("Esc", "Back to grid"),
            ("F1", "Help"),
        ]),
        Focus::Categories => shortcut_line(&[
            ("↑/↓", "Move"),
            ("Space", "Toggle"),
            ("a", "Show all"),
            ("Esc/Tab", "Back to grid"),
        ]),
    };
    let footer = Paragraph::new(shortcuts)
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);
    f.render_widget(footer, chunks[3]);
}

fn focused_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_search_bars(app: &App, f: &mut Frame<'_>, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let pending = if app.search_debounce.is_pending() { " …" } else { "" };
    let item_search = Paragraph::new(format!("{}{pending}", app.search_input)).block(
        Block::default()
            .title("Search items (/)")
            .borders(Borders::ALL)
            .border_style(focused_border(app.focus == Focus::ItemSearch)),
    );
    f.render_widget(item_search, halves[0]);

    let store_search = Paragraph::new(app.store_query.as_str()).block(
        Block::default()
            .title("Find store (f)")
            .borders(Borders::ALL)
            .border_style(focused_border(app.focus == Focus::StoreSearch)),
    );
    f.render_widget(store_search, halves[1]);
}

fn checkbox(on: bool) -> &'static str {
    if on {
        "[x] "
    } else {
        "[ ] "
    }
}

fn render_category_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Focus::Categories;
    let selection = &app.view.state().categories;

    let mut entries = vec![(
        format!("{}Show All", checkbox(selection.all_selected())),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for label in app.category_labels() {
        entries.push((
            format!(
                "{}{label} ({})",
                checkbox(selection.is_selected(label)),
                app.catalog.categories.item_count(label)
            ),
            Style::default(),
        ));
    }

    let max_visible = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(entries.len(), max_visible, app.category_cursor);

    let lines: Vec<TextLine<'_>> = entries
        .into_iter()
        .enumerate()
        .skip(offset)
        .take(max_visible)
        .map(|(i, (text, style))| {
            let style = if focused && i == app.category_cursor {
                style.bg(Color::Rgb(0, 0, 238)).fg(Color::White)
            } else {
                style
            };
            TextLine::from(Span::styled(text, style))
        })
        .collect();

    let panel = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title("Categories (c)")
            .borders(Borders::ALL)
            .border_style(focused_border(focused)),
    );
    f.render_widget(panel, area);
}

fn sort_marker(app: &App, column: &SortColumn) -> &'static str {
    if &app.sort.column != column {
        ""
    } else if app.sort.descending {
        " ▼"
    } else {
        " ▲"
    }
}

fn item_width(name: &str) -> u16 {
    u16::try_from(name.chars().count() + 2)
        .unwrap_or(MAX_ITEM_WIDTH)
        .clamp(MIN_ITEM_WIDTH, MAX_ITEM_WIDTH)
}

fn render_store_grid(app: &App, f: &mut Frame<'_>, area: Rect) {
    let dataset = &app.catalog.dataset;
    let block_style = focused_border(app.focus == Focus::Grid);

    if app.store_order.is_empty() {
        let message = if dataset.is_empty() {
            "No stores in dataset."
        } else {
            "No stores match the search."
        };
        let paragraph = Paragraph::new(message)
            .block(
                Block::default()
                    .title("Stores")
                    .borders(Borders::ALL)
                    .border_style(block_style),
            )
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let items = app.visible_item_columns();
    let item_widths: Vec<u16> = items.iter().map(|name| item_width(name)).collect();
    let available = area
        .width
        .saturating_sub(2 + POST_WIDTH + NAME_WIDTH + 2 * COLUMN_SPACING);
    let shown = column_window(&item_widths, app.column_offset, available, COLUMN_SPACING);
    let window = app.column_offset..app.column_offset + shown;

    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut header = vec![
        Cell::from(format!("Post{}", sort_marker(app, &SortColumn::Post))),
        Cell::from(format!("Name{}", sort_marker(app, &SortColumn::Name))),
    ];
    for name in &items[window.clone()] {
        let marker = sort_marker(app, &SortColumn::Item((*name).to_string()));
        header.push(Cell::from(format!("{name}{marker}")));
    }

    let total_rows = app.store_order.len();
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.selected_row);

    let rows = app
        .store_order
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .filter_map(|(row, &index)| dataset.store(index).map(|entry| (row, entry)))
        .map(|(row, entry)| {
            let mut cells = vec![
                Cell::from(entry.store.address.postal_zip.clone()),
                Cell::from(normalize(&entry.store.name)),
            ];
            for name in &items[window.clone()] {
                let cell = entry.price_of(name);
                let style = match cell {
                    PriceCell::Price(_) => Style::default(),
                    PriceCell::NotApplicable => Style::default().fg(Color::DarkGray),
                };
                cells.push(Cell::from(cell.to_string()).style(style));
            }

            let style = if row == app.selected_row {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(cells).style(style)
        });

    let mut widths = vec![Constraint::Length(POST_WIDTH), Constraint::Length(NAME_WIDTH)];
    widths.extend(item_widths[window.clone()].iter().map(|w| Constraint::Length(*w)));

    let hidden = app.columns.columns().len() - items.len();
    let mut title = format!(
        "Stores ({} of {}) | items {}-{} of {}",
        app.selected_row + 1,
        total_rows,
        if shown == 0 { 0 } else { window.start + 1 },
        window.end,
        items.len()
    );
    if hidden > 0 {
        title.push_str(&format!(" | {hidden} hidden"));
    }

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(header_style))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(block_style),
        )
        .column_spacing(COLUMN_SPACING);

    f.render_widget(table, area);
}
