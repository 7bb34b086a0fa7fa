pub mod about;
pub mod dialog;
pub mod help;
pub mod table;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Create a centered rectangle of the given width (columns) and height (rows).
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}

/// Truncate a string from the left to fit in `max_width` columns, prefixing
/// "\u{2026}" if truncated. Keeps the file-name end of long paths visible.
pub fn truncate_left(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let len = s.chars().count();
    if len <= max_width {
        return s.to_string();
    }
    let keep = max_width - 1;
    let mut truncated = String::from('\u{2026}');
    truncated.extend(s.chars().skip(len - keep));
    truncated
}
