use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};

pub fn key_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Footer line of `key: action` pairs.
pub fn shortcut_line(shortcuts: &[(&'static str, &'static str)]) -> TextLine<'static> {
    let mut spans = Vec::with_capacity(shortcuts.len() * 2);
    for (i, (key, action)) in shortcuts.iter().enumerate() {
        spans.push(Span::styled(*key, key_style()));
        let gap = if i + 1 == shortcuts.len() { "" } else { "   " };
        spans.push(Span::raw(format!(": {action}{gap}")));
    }
    TextLine::from(spans)
}
