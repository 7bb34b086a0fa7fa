use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use recentfiles_core::Column;

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::ForceQuit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::Search => map_key_search(key),
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::MoveDown,
        MouseEventKind::ScrollUp => Action::MoveUp,
        MouseEventKind::Down(MouseButton::Left) => Action::ClickAt(mouse.column, mouse.row),
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('g') | KeyCode::Home => Action::GoTop,
        KeyCode::Char('G') | KeyCode::End => Action::GoBottom,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Save,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::PageDown,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::PageUp,
        KeyCode::Char('d') | KeyCode::Delete => Action::RemoveSelected,
        KeyCode::Char('1') => Action::SortBy(Column::Filename),
        KeyCode::Char('2') => Action::SortBy(Column::Path),
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char('b') => Action::Backup,
        KeyCode::Char('a') => Action::ToggleAbout,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') => Action::Decline,
        KeyCode::Esc => Action::NavigateBack,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        _ => Action::None,
    }
}

fn map_key_search(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::SearchCancel,
        KeyCode::Enter => Action::SearchConfirm,
        KeyCode::Backspace => Action::SearchBackspace,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Up => Action::MoveUp,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Action::SearchInput(c)
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn normal_mode_keys() {
        let mode = InputMode::Normal;
        assert_eq!(map_event(&press(KeyCode::Char('d')), &mode), Action::RemoveSelected);
        assert_eq!(map_event(&press(KeyCode::Delete), &mode), Action::RemoveSelected);
        assert_eq!(
            map_event(&press(KeyCode::Char('1')), &mode),
            Action::SortBy(Column::Filename)
        );
        assert_eq!(map_event(&press(KeyCode::Char('2')), &mode), Action::SortBy(Column::Path));
        assert_eq!(map_event(&ctrl('s'), &mode), Action::Save);
        assert_eq!(map_event(&ctrl('d'), &mode), Action::PageDown);
        assert_eq!(map_event(&press(KeyCode::Char('q')), &mode), Action::Quit);
    }

    #[test]
    fn search_mode_types_characters() {
        let mode = InputMode::Search;
        assert_eq!(map_event(&press(KeyCode::Char('q')), &mode), Action::SearchInput('q'));
        assert_eq!(map_event(&press(KeyCode::Char('d')), &mode), Action::SearchInput('d'));
        assert_eq!(map_event(&press(KeyCode::Backspace), &mode), Action::SearchBackspace);
        assert_eq!(map_event(&press(KeyCode::Esc), &mode), Action::SearchCancel);
    }

    #[test]
    fn ctrl_c_quits_in_every_mode() {
        assert_eq!(map_event(&ctrl('c'), &InputMode::Normal), Action::ForceQuit);
        assert_eq!(map_event(&ctrl('c'), &InputMode::Search), Action::ForceQuit);
    }

    #[test]
    fn left_click_maps_to_position() {
        let event = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(&event, &InputMode::Normal), Action::ClickAt(12, 7));
    }
}
