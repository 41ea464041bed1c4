use crate::app::App;
use crate::ui::widgets::hints::key_style;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_help_popup(_app: &App, f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };

    f.render_widget(hint, hint_area);
}

fn heading(text: &'static str) -> TextLine<'static> {
    TextLine::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn shortcut(key: &'static str, action: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(format!("  {key}"), key_style()),
        Span::raw(format!(" - {action}")),
    ])
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Store Prices",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Compare item prices across stores. Red rows in a store's details cost more than the average of all stores, green rows cost less.",
        ),
        TextLine::from(""),
        heading("Store grid:"),
        shortcut("↑/↓ PgUp/PgDn Home/End", "Move between stores"),
        shortcut("←/→", "Scroll item columns"),
        shortcut("/", "Search item columns (applied after a short pause)"),
        shortcut("f", "Find a store by name or post"),
        shortcut("c / Tab", "Category panel (Space toggles, a toggles Show All)"),
        shortcut("s", "Cycle sort: Name, Post, first shown item"),
        shortcut("r", "Reverse sort"),
        shortcut("Enter", "Open the selected store's details"),
        shortcut("m", "Store map"),
        TextLine::from(""),
        heading("Store details:"),
        shortcut("↑/↓", "Move between items"),
        shortcut("←/→", "Move between categories"),
        shortcut("Space", "Toggle category"),
        shortcut("/", "Search items by name (Enter keeps, Esc clears)"),
        shortcut("Esc", "Close"),
        TextLine::from(""),
        heading("Anywhere:"),
        shortcut("? / F1", "Toggle this help popup"),
        shortcut("q", "Quit application"),
        TextLine::from(""),
        heading("CLI Options:"),
    ];

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}
