use recentfiles_core::{Column, Intent, Response};

use super::{App, Dialog, InputMode, TableHit};
use crate::action::Action;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        if action == Action::ForceQuit {
            self.should_quit = true;
            return true;
        }

        // Dialogs are modal
        if let Some(dialog) = self.dialog.clone() {
            self.update_dialog(dialog, action);
            return self.should_quit;
        }

        match action {
            Action::Quit => {
                if self.session.is_dirty() {
                    self.open_dialog(Dialog::ConfirmQuit);
                } else {
                    self.dispatch(Intent::ExitRequested);
                }
            }
            Action::MoveDown => {
                let len = self.session.rows().len();
                if len > 0 {
                    self.cursor = (self.cursor + 1).min(len - 1);
                }
            }
            Action::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Action::PageDown => {
                let len = self.session.rows().len();
                if len > 0 {
                    self.cursor = (self.cursor + self.visible_rows.max(1)).min(len - 1);
                }
            }
            Action::PageUp => {
                self.cursor = self.cursor.saturating_sub(self.visible_rows.max(1));
            }
            Action::GoTop => {
                self.cursor = 0;
            }
            Action::GoBottom => {
                self.cursor = self.session.rows().len().saturating_sub(1);
            }
            Action::RemoveSelected => {
                if self.cursor < self.session.rows().len() {
                    self.dispatch(Intent::RowAffordanceClicked {
                        row: self.cursor,
                        column: Column::Remove,
                    });
                }
            }
            Action::SortBy(column) => {
                self.dispatch(Intent::ColumnHeaderClicked(column.identifier().to_string()));
            }
            Action::StartSearch => {
                self.input_mode = InputMode::Search;
            }
            Action::SearchInput(ch) => {
                let mut text = self.session.search_text().to_string();
                text.push(ch);
                self.set_search(text);
            }
            Action::SearchBackspace => {
                let mut text = self.session.search_text().to_string();
                if text.pop().is_some() {
                    self.set_search(text);
                }
            }
            Action::SearchConfirm => {
                self.input_mode = InputMode::Normal;
            }
            Action::SearchCancel => {
                self.input_mode = InputMode::Normal;
                if !self.session.search_text().is_empty() {
                    self.set_search(String::new());
                }
            }
            Action::NavigateBack => {
                // Esc in normal mode clears an active search
                if !self.session.search_text().is_empty() {
                    self.set_search(String::new());
                }
            }
            Action::Save => self.dispatch(Intent::SaveRequested),
            Action::Backup => self.dispatch(Intent::BackupRequested),
            Action::ToggleAbout => {
                self.open_dialog(Dialog::About);
            }
            Action::ToggleHelp => {
                self.open_dialog(Dialog::Help);
            }
            Action::ClickAt(x, y) => {
                self.handle_click(x, y);
            }
            Action::Confirm
            | Action::Decline
            | Action::Resize(_, _)
            | Action::ForceQuit
            | Action::None => {}
        }

        self.should_quit
    }

    fn update_dialog(&mut self, dialog: Dialog, action: Action) {
        match dialog {
            Dialog::ConfirmRemove(_) => match action {
                Action::Confirm => {
                    self.dialog = None;
                    self.dispatch(Intent::ConfirmationAnswered(true));
                }
                Action::Decline | Action::NavigateBack | Action::Quit => {
                    self.dialog = None;
                    self.dispatch(Intent::ConfirmationAnswered(false));
                }
                _ => {}
            },
            Dialog::ConfirmQuit => match action {
                Action::Confirm | Action::Quit => {
                    self.dialog = None;
                    self.dispatch(Intent::ExitRequested);
                }
                Action::Decline | Action::NavigateBack => {
                    self.dialog = None;
                }
                _ => {}
            },
            Dialog::Info(_) | Dialog::Error(_) => {
                if matches!(
                    action,
                    Action::Confirm | Action::NavigateBack | Action::Quit | Action::ClickAt(_, _)
                ) {
                    self.dialog = None;
                }
            }
            Dialog::About => {
                if matches!(
                    action,
                    Action::ToggleAbout | Action::Confirm | Action::NavigateBack | Action::Quit
                ) {
                    self.dialog = None;
                }
            }
            Dialog::Help => {
                if matches!(
                    action,
                    Action::ToggleHelp | Action::Confirm | Action::NavigateBack | Action::Quit
                ) {
                    self.dialog = None;
                }
            }
        }
    }

    fn set_search(&mut self, text: String) {
        self.dispatch(Intent::SearchTextChanged(text));
        self.cursor = 0;
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        let Some(hit) = self.last_table.as_ref().and_then(|t| t.hit(x, y)) else {
            return;
        };
        match hit {
            TableHit::Header(column) => {
                self.dispatch(Intent::ColumnHeaderClicked(column.identifier().to_string()));
            }
            TableHit::Cell { row, column } => {
                if row < self.session.rows().len() {
                    self.cursor = row;
                    self.dispatch(Intent::RowAffordanceClicked { row, column });
                }
            }
        }
    }

    /// Hand an intent to the session and act on its response.
    fn dispatch(&mut self, intent: Intent) {
        let response = self.session.handle(intent);
        match response {
            Response::Refresh => self.clamp_cursor(),
            Response::Confirm(prompt) => {
                self.open_dialog(Dialog::ConfirmRemove(prompt));
            }
            Response::Info(message) => {
                self.open_dialog(Dialog::Info(message));
            }
            Response::Error(message) => {
                tracing::warn!(error = %message, "action failed");
                self.open_dialog(Dialog::Error(message));
            }
            Response::Exit => {
                self.should_quit = true;
            }
            Response::Ignored => {}
        }
    }

    /// Dialogs answer to normal-mode keys (y/n/Enter/Esc), so typing into
    /// the search bar stops while one is open. The search text stays.
    fn open_dialog(&mut self, dialog: Dialog) {
        self.input_mode = InputMode::Normal;
        self.dialog = Some(dialog);
    }

    fn clamp_cursor(&mut self) {
        let len = self.session.rows().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}
