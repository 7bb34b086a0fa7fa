use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::theme::Theme;
use crate::view::centered_rect;

const MAX_WIDTH: u16 = 72;

/// Render a yes/no question as a centered popup. `verb` names what "yes" does.
pub fn render_confirm(f: &mut Frame, theme: &Theme, title: &str, prompt: &str, verb: &str) {
    let keys = Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(": {}   ", verb), Style::default().fg(theme.dim)),
        Span::styled(
            "n/Esc",
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": cancel", Style::default().fg(theme.dim)),
    ]);
    render_popup(f, theme, title, prompt, keys, theme.danger);
}

/// Render an informational or error message with an OK hint.
pub fn render_message(f: &mut Frame, theme: &Theme, title: &str, message: &str, accent: Color) {
    let keys = Line::from(vec![
        Span::styled(
            "Enter",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(": ok", Style::default().fg(theme.dim)),
    ]);
    render_popup(f, theme, title, message, keys, accent);
}

fn render_popup(
    f: &mut Frame,
    theme: &Theme,
    title: &str,
    body: &str,
    keys: Line<'_>,
    accent: Color,
) {
    let area = f.area();
    let width = area.width.saturating_sub(4).min(MAX_WIDTH);
    let text_width = width.saturating_sub(4).max(1) as usize;
    let text_lines = body.chars().count().div_ceil(text_width).max(1) as u16;
    // borders + blank line above the text + blank line and key hints below
    let height = (text_lines + 5).min(area.height);
    let popup = centered_rect(width, height, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            body.to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        keys,
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent))
                .padding(Padding::horizontal(1))
                .title(title.to_string()),
        );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
