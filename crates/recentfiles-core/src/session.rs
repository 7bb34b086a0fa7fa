use std::path::PathBuf;

use crate::RecentFilesError;
use crate::projection::ProjectedRow;
use crate::query::{QueryEngine, SortColumn, SortDirection};
use crate::store::Store;

/// Table column as rendered by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Filename,
    Path,
    /// The per-row remove affordance.
    Remove,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Filename, Column::Path, Column::Remove];

    pub fn identifier(self) -> &'static str {
        match self {
            Self::Filename => "Filename",
            Self::Path => "Path",
            Self::Remove => "Remove",
        }
    }

    pub fn sort_column(self) -> Option<SortColumn> {
        match self {
            Self::Filename => Some(SortColumn::Filename),
            Self::Path => Some(SortColumn::Path),
            Self::Remove => None,
        }
    }
}

/// User intents reported by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// A cell of a rendered row was clicked. `row` indexes the current rows.
    RowAffordanceClicked { row: usize, column: Column },
    /// A header was clicked, identified by its header text.
    ColumnHeaderClicked(String),
    SearchTextChanged(String),
    /// Answer to the prompt carried by the last [`Response::Confirm`].
    ConfirmationAnswered(bool),
    SaveRequested,
    BackupRequested,
    ExitRequested,
}

/// What the view should do after an intent was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Rows changed; re-render them.
    Refresh,
    /// Ask the user a yes/no question and report the answer back.
    Confirm(String),
    Info(String),
    Error(String),
    Exit,
    /// Nothing happened.
    Ignored,
}

/// Row removal state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteFlow {
    #[default]
    Idle,
    AwaitingConfirmation(ProjectedRow),
}

/// The document, the query state over it, and the pending removal, driven
/// by [`Intent`]s.
#[derive(Debug)]
pub struct Session {
    store: Store,
    query: QueryEngine,
    delete_flow: DeleteFlow,
}

impl Session {
    pub fn new(store: Store) -> Self {
        let query = QueryEngine::new(store.document());
        Self {
            store,
            query,
            delete_flow: DeleteFlow::Idle,
        }
    }

    /// Load the list at `path` and start a session over it.
    pub fn open(path: PathBuf) -> Result<Self, RecentFilesError> {
        Ok(Self::new(Store::open(path)?))
    }

    /// Rows to render, in display order.
    pub fn rows(&self) -> &[ProjectedRow] {
        self.query.rows()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn search_text(&self) -> &str {
        self.query.search_text()
    }

    pub fn active_sort(&self) -> Option<(SortColumn, SortDirection)> {
        self.query.active_sort()
    }

    pub fn delete_flow(&self) -> &DeleteFlow {
        &self.delete_flow
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    pub fn handle(&mut self, intent: Intent) -> Response {
        tracing::debug!(?intent, "handling intent");

        // While a removal awaits an answer, only the answer counts.
        if matches!(self.delete_flow, DeleteFlow::AwaitingConfirmation(_)) {
            return match intent {
                Intent::ConfirmationAnswered(confirmed) => self.finish_delete(confirmed),
                _ => Response::Ignored,
            };
        }

        match intent {
            Intent::RowAffordanceClicked { row, column } => self.begin_delete(row, column),
            Intent::ColumnHeaderClicked(identifier) => {
                if identifier == Column::Remove.identifier() {
                    return Response::Ignored;
                }
                if self.query.sort_by_identifier(&identifier) {
                    Response::Refresh
                } else {
                    Response::Ignored
                }
            }
            Intent::SearchTextChanged(text) => {
                self.query.search(self.store.document(), &text);
                Response::Refresh
            }
            Intent::ConfirmationAnswered(_) => Response::Ignored,
            Intent::SaveRequested => match self.store.save() {
                Ok(()) => Response::Info("Changes have been saved.".to_string()),
                Err(e) => Response::Error(e.to_string()),
            },
            Intent::BackupRequested => match self.store.backup() {
                Ok(path) => Response::Info(format!("Backup created at {}", path.display())),
                Err(e) => Response::Error(e.to_string()),
            },
            Intent::ExitRequested => Response::Exit,
        }
    }

    fn begin_delete(&mut self, row: usize, column: Column) -> Response {
        if column != Column::Remove {
            return Response::Ignored;
        }
        let Some(target) = self.query.rows().get(row) else {
            tracing::debug!(row, rows = self.query.rows().len(), "remove click outside rendered rows");
            return Response::Ignored;
        };

        let prompt = format!(
            "Are you sure you want to remove '{}' from the recent files list?",
            target.display_name
        );
        self.delete_flow = DeleteFlow::AwaitingConfirmation(target.clone());
        Response::Confirm(prompt)
    }

    fn finish_delete(&mut self, confirmed: bool) -> Response {
        let DeleteFlow::AwaitingConfirmation(target) = std::mem::take(&mut self.delete_flow) else {
            return Response::Ignored;
        };
        if !confirmed {
            return Response::Ignored;
        }

        let result = self.store.delete_at(target.source_index);
        // Indices are stale after any length change, so rebuild either way.
        self.query.refresh(self.store.document());
        match result {
            Ok(removed) => {
                tracing::info!(path = removed.path(), "removed entry from recent files list");
                Response::Refresh
            }
            Err(e) => Response::Error(e.to_string()),
        }
    }
}
