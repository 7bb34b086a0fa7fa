mod update;


use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::TableState;
use recentfiles_core::{Column, Session};

use crate::theme::Theme;

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Popup currently covering the table, if any. Dialogs are modal: while
/// one is open it receives every action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Remove prompt produced by the session; the answer goes back to it.
    ConfirmRemove(String),
    /// Quit with unsaved removals.
    ConfirmQuit,
    Info(String),
    Error(String),
    About,
    Help,
}

/// Where the table was last drawn, for mapping mouse clicks back to cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGeometry {
    pub header_y: u16,
    /// Area holding the data rows (below the header row).
    pub body: Rect,
    /// Column spans as `(column, x, width)`.
    pub columns: Vec<(Column, u16, u16)>,
    /// Index of the first visible row (table scroll offset).
    pub offset: usize,
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableHit {
    Header(Column),
    Cell { row: usize, column: Column },
}

impl TableGeometry {
    pub fn column_at(&self, x: u16) -> Option<Column> {
        self.columns
            .iter()
            .find(|(_, start, width)| x >= *start && x < start + width)
            .map(|(column, _, _)| *column)
    }

    /// Map a terminal position to a header or a row index (offset applied).
    /// Rows past the end of the data are the caller's to reject.
    pub fn hit(&self, x: u16, y: u16) -> Option<TableHit> {
        let column = self.column_at(x)?;
        if y == self.header_y {
            return Some(TableHit::Header(column));
        }
        if y >= self.body.y && y < self.body.y + self.body.height {
            let row = self.offset + (y - self.body.y) as usize;
            return Some(TableHit::Cell { row, column });
        }
        None
    }
}

/// Main application state.
pub struct App {
    pub session: Session,
    pub theme: Theme,
    /// Visual row index of the selection.
    pub cursor: usize,
    pub input_mode: InputMode,
    pub dialog: Option<Dialog>,
    pub should_quit: bool,
    /// Height of the visible table body (set on render, used for page up/down).
    pub visible_rows: usize,
    pub table_state: TableState,
    /// Last table geometry rendered (for mouse click → cell mapping).
    pub last_table: Option<TableGeometry>,
}

impl App {
    pub fn new(session: Session, theme: Theme) -> Self {
        Self {
            session,
            theme,
            cursor: 0,
            input_mode: InputMode::Normal,
            dialog: None,
            should_quit: false,
            visible_rows: 20,
            table_state: TableState::default(),
            last_table: None,
        }
    }

    pub fn view(&mut self, f: &mut Frame) {
        crate::view::table::render(f, self);

        let theme = &self.theme;
        match &self.dialog {
            None => {}
            Some(Dialog::ConfirmRemove(prompt)) => {
                crate::view::dialog::render_confirm(f, theme, " Remove ", prompt, "remove")
            }
            Some(Dialog::ConfirmQuit) => crate::view::dialog::render_confirm(
                f,
                theme,
                " Confirm Quit ",
                "Removed entries have not been saved. Quit anyway?",
                "quit",
            ),
            Some(Dialog::Info(message)) => {
                crate::view::dialog::render_message(f, theme, " Info ", message, theme.active)
            }
            Some(Dialog::Error(message)) => {
                crate::view::dialog::render_message(f, theme, " Error ", message, theme.danger)
            }
            Some(Dialog::About) => crate::view::about::render(f, theme),
            Some(Dialog::Help) => crate::view::help::render(f, theme),
        }
    }
}
