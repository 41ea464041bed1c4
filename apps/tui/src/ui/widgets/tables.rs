/// First row to draw so that `selected_index` stays on screen.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

/// How many columns starting at `offset` fit into `available` cells,
/// counting `spacing` between neighbours. At least one column is shown
/// when any remain, so a narrow terminal still scrolls.
pub fn column_window(widths: &[u16], offset: usize, available: u16, spacing: u16) -> usize {
    let mut used: u16 = 0;
    let mut count = 0;

    for width in widths.iter().skip(offset) {
        let needed = if count == 0 { *width } else { width + spacing };
        if used.saturating_add(needed) > available && count > 0 {
            break;
        }
        used = used.saturating_add(needed);
        count += 1;
    }

    count
}
