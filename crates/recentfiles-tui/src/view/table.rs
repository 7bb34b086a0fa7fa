use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use recentfiles_core::Column;

use crate::app::{App, InputMode, TableGeometry};
use crate::view::truncate_left;

const NOTICE: &str =
    "Scores are only removed from the recent files list and are not deleted from the filesystem.";

const COLUMN_WIDTHS: [Constraint; 3] = [
    Constraint::Fill(2), // Filename
    Constraint::Fill(5), // Path
    Constraint::Length(6), // Remove
];

/// Render the main screen: header, optional search bar, table, notice and footer.
pub fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let has_search =
        app.input_mode == InputMode::Search || !app.session.search_text().is_empty();

    let mut constraints = vec![Constraint::Length(1)]; // header
    if has_search {
        constraints.push(Constraint::Length(1)); // search bar
    }
    constraints.push(Constraint::Min(3)); // table
    constraints.push(Constraint::Length(1)); // notice
    constraints.push(Constraint::Length(1)); // footer

    let chunks = Layout::vertical(constraints).split(area);
    let mut chunk_idx = 0;

    render_header(f, chunks[chunk_idx], app);
    chunk_idx += 1;

    if has_search {
        render_search_bar(f, chunks[chunk_idx], app);
        chunk_idx += 1;
    }

    render_table(f, chunks[chunk_idx], app);
    chunk_idx += 1;

    f.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", NOTICE),
            Style::default().fg(app.theme.notice),
        )),
        chunks[chunk_idx],
    );
    chunk_idx += 1;

    render_footer(f, chunks[chunk_idx], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let path = app.session.store().path().display().to_string();
    let title = " Recent Files ";
    let dirty = if app.session.is_dirty() { " [modified]" } else { "" };
    let room = (area.width as usize).saturating_sub(title.len() + dirty.len() + 1);

    let mut spans = vec![
        Span::styled(title, theme.header_style()),
        Span::styled(
            format!(" {}", truncate_left(&path, room)),
            Style::default().fg(theme.dim),
        ),
    ];
    if app.session.is_dirty() {
        spans.push(Span::styled(
            dirty,
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_search_bar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let cursor = if app.input_mode == InputMode::Search {
        "\u{2588}"
    } else {
        ""
    };
    let line = Line::from(vec![
        Span::styled(
            " Search: ",
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.session.search_text(), Style::default().fg(theme.text)),
        Span::styled(cursor, Style::default().fg(theme.active)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn header_label(app: &App, column: Column) -> String {
    let arrow = column
        .sort_column()
        .and_then(|c| match app.session.active_sort() {
            Some((active, direction)) if active == c => Some(direction.arrow()),
            _ => None,
        });
    match arrow {
        Some(arrow) => format!("{} {}", column.identifier(), arrow),
        None => column.identifier().to_string(),
    }
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let total = app.session.store().document().len();
    let shown = app.session.rows().len();

    let block_title = if shown == total {
        format!(" {} entries ", total)
    } else {
        format!(" {} of {} entries ", shown, total)
    };

    let table = {
        let theme = &app.theme;
        let header = Row::new(Column::ALL.iter().map(|&column| {
            Cell::from(header_label(app, column))
                .style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        }))
        .height(1);

        let rows: Vec<Row> = app
            .session
            .rows()
            .iter()
            .map(|row| {
                Row::new(vec![
                    Cell::from(row.display_name.as_str()).style(Style::default().fg(theme.text)),
                    Cell::from(row.display_path.as_str()).style(Style::default().fg(theme.dim)),
                    Cell::from(Line::from("\u{274C}").centered())
                        .style(Style::default().fg(theme.danger)),
                ])
            })
            .collect();

        Table::new(rows, COLUMN_WIDTHS)
            .header(header)
            .column_spacing(1)
            .flex(Flex::Start)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style())
                    .title(block_title),
            )
            .row_highlight_style(theme.highlight_style())
    };

    app.table_state
        .select(if shown == 0 { None } else { Some(app.cursor) });
    f.render_stateful_widget(table, area, &mut app.table_state);

    // Same geometry the table used, kept for click mapping.
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let header_y = inner.y;
    let body = Rect {
        y: inner.y.saturating_add(1),
        height: inner.height.saturating_sub(1),
        ..inner
    };
    let spans = Layout::horizontal(COLUMN_WIDTHS)
        .flex(Flex::Start)
        .spacing(1)
        .split(inner);
    app.last_table = Some(TableGeometry {
        header_y,
        body,
        columns: Column::ALL
            .iter()
            .zip(spans.iter())
            .map(|(&column, rect)| (column, rect.x, rect.width))
            .collect(),
        offset: app.table_state.offset(),
    });
    app.visible_rows = body.height as usize;

    if shown == 0 && body.height > 0 {
        let message = if total == 0 {
            "No recent files.".to_string()
        } else {
            format!("No entries match \"{}\".", app.session.search_text())
        };
        let line_area = Rect { height: 1, ..body };
        f.render_widget(
            Paragraph::new(Line::from(message).centered())
                .style(Style::default().fg(app.theme.dim)),
            line_area,
        );
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let hints = match app.input_mode {
        InputMode::Search => " type to filter  Enter:done  Esc:clear  \u{2191}\u{2193}:move",
        InputMode::Normal => {
            " d:remove  1/2:sort name/path  /:search  Ctrl+s:save  b:backup  a:about  ?:help  q:quit"
        }
    };
    f.render_widget(
        Paragraph::new(Span::styled(hints, app.theme.footer_style())),
        area,
    );
}
