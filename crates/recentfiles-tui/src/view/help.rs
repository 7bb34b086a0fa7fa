use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme::Theme;
use crate::view::centered_rect;

/// Render the key binding overlay as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let popup = centered_rect(60.min(area.width), 30.min(area.height), area);

    let lines = vec![
        Line::from(Span::styled(
            " Keyboard Shortcuts ",
            theme.header_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section_header("Navigation", theme),
        key_line("j / \u{2193}", "Move down", theme),
        key_line("k / \u{2191}", "Move up", theme),
        key_line("Ctrl+d / PgDn", "Page down", theme),
        key_line("Ctrl+u / PgUp", "Page up", theme),
        key_line("g / Home", "Go to top", theme),
        key_line("G / End", "Go to bottom", theme),
        Line::from(""),
        section_header("Sorting & Search", theme),
        key_line("1", "Sort by filename (again to reverse)", theme),
        key_line("2", "Sort by path (again to reverse)", theme),
        key_line("/", "Search paths", theme),
        key_line("Esc", "Clear search", theme),
        Line::from(""),
        section_header("Entries", theme),
        key_line("d / Delete", "Remove selected entry from the list", theme),
        key_line("Ctrl+s", "Save the list", theme),
        key_line("b", "Back up the file on disk", theme),
        Line::from(""),
        section_header("Global", theme),
        key_line("a", "About", theme),
        key_line("?", "Toggle this help", theme),
        key_line("q", "Quit", theme),
        key_line("Ctrl+c", "Force quit", theme),
        Line::from(""),
        section_header("Mouse", theme),
        key_line("Header click", "Sort by that column", theme),
        key_line("\u{274C} click", "Remove that entry", theme),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {key:<16}"), Style::default().fg(theme.text)),
        Span::styled(desc, Style::default().fg(theme.dim)),
    ])
}
