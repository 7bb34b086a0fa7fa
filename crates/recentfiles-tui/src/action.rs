use recentfiles_core::Column;

/// Everything the terminal can ask the app to do, after key/mouse mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    /// `q`: quit, asking first when there are unsaved removals.
    Quit,
    /// Ctrl+C: leave immediately.
    ForceQuit,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoTop,
    GoBottom,
    /// Remove the entry under the cursor (after confirmation).
    RemoveSelected,
    SortBy(Column),
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    SearchConfirm,
    SearchCancel,
    Save,
    Backup,
    ToggleAbout,
    ToggleHelp,
    /// Yes / OK in a dialog.
    Confirm,
    /// No in a dialog.
    Decline,
    /// Esc: close dialog or clear search.
    NavigateBack,
    ClickAt(u16, u16),
    Resize(u16, u16),
}
