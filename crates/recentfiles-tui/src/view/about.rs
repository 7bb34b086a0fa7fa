use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme::Theme;
use crate::view::centered_rect;

pub fn render(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let popup = centered_rect(64.min(area.width), 14.min(area.height), area);

    let lines = vec![
        Line::from(Span::styled(
            format!(" recentfiles {} ", env!("CARGO_PKG_VERSION")),
            theme.header_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Manage the MuseScore 4 recent files list.",
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Removing an entry only takes it off the list. The score itself \
             is never touched on disk.",
            Style::default().fg(theme.notice),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("License: ", Style::default().fg(theme.dim)),
            Span::styled(env!("CARGO_PKG_LICENSE"), Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            Span::styled("Source:  ", Style::default().fg(theme.dim)),
            Span::styled(env!("CARGO_PKG_REPOSITORY"), Style::default().fg(theme.text)),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(" About "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
