use std::collections::HashMap;

use crate::projection::{ProjectedRow, project};
use crate::store::Document;

/// Sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Filename,
    Path,
}

impl SortColumn {
    /// Column identifier as shown in the table header.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Filename => "Filename",
            Self::Path => "Path",
        }
    }

    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            "Filename" => Some(Self::Filename),
            "Path" => Some(Self::Path),
            _ => None,
        }
    }

    fn key(self, row: &ProjectedRow) -> &str {
        match self {
            Self::Filename => &row.display_name,
            Self::Path => &row.display_path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "\u{25B2}",
            Self::Descending => "\u{25BC}",
        }
    }
}

/// Rebuild the projection of `document` and keep rows whose path or name
/// contains `query`, ignoring case. An empty query keeps every row.
pub fn search(document: &Document, query: &str) -> Vec<ProjectedRow> {
    let query_lower = query.to_lowercase();
    project(document)
        .into_iter()
        .filter(|row| {
            query.is_empty()
                || row.display_path.to_lowercase().contains(&query_lower)
                || row.display_name.to_lowercase().contains(&query_lower)
        })
        .collect()
}

/// Stable, case-sensitive sort. Rows with equal keys keep their relative
/// order in both directions.
pub fn sort_rows(rows: &mut [ProjectedRow], column: SortColumn, direction: SortDirection) {
    match direction {
        SortDirection::Ascending => rows.sort_by(|a, b| column.key(a).cmp(column.key(b))),
        SortDirection::Descending => rows.sort_by(|a, b| column.key(b).cmp(column.key(a))),
    }
}

/// Working view over the document: the current search text, the rows it
/// selects, and the per-column sort direction memory.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    rows: Vec<ProjectedRow>,
    search_text: String,
    /// Direction the next sort on each column will use.
    next_direction: HashMap<SortColumn, SortDirection>,
    active_sort: Option<(SortColumn, SortDirection)>,
}

impl QueryEngine {
    pub fn new(document: &Document) -> Self {
        Self {
            rows: project(document),
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[ProjectedRow] {
        &self.rows
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Column and direction of the sort applied to the current rows, if any.
    pub fn active_sort(&self) -> Option<(SortColumn, SortDirection)> {
        self.active_sort
    }

    /// Replace the rows with a fresh filtered projection. Any previous sort
    /// is discarded; the per-column direction memory is kept.
    pub fn search(&mut self, document: &Document, text: &str) -> &[ProjectedRow] {
        self.search_text = text.to_string();
        self.rows = search(document, text);
        self.active_sort = None;
        &self.rows
    }

    /// Sort the current rows by `column`, ascending the first time and
    /// alternating on every further call for the same column.
    pub fn sort_by(&mut self, column: SortColumn) -> &[ProjectedRow] {
        let direction = self
            .next_direction
            .get(&column)
            .copied()
            .unwrap_or(SortDirection::Ascending);
        self.next_direction.insert(column, direction.toggled());

        sort_rows(&mut self.rows, column, direction);
        self.active_sort = Some((column, direction));
        tracing::debug!(column = column.identifier(), ?direction, "sorted rows");
        &self.rows
    }

    /// [`QueryEngine::sort_by`] for a header identifier. Unknown identifiers
    /// leave the rows untouched. Returns whether a sort happened.
    pub fn sort_by_identifier(&mut self, identifier: &str) -> bool {
        match SortColumn::from_identifier(identifier) {
            Some(column) => {
                self.sort_by(column);
                true
            }
            None => {
                tracing::warn!(column = identifier, "unknown sort column");
                false
            }
        }
    }

    /// Rebuild rows after the document changed, keeping the current search
    /// text and re-applying the active sort without toggling it.
    pub fn refresh(&mut self, document: &Document) {
        self.rows = search(document, &self.search_text);
        if let Some((column, direction)) = self.active_sort {
            sort_rows(&mut self.rows, column, direction);
        }
    }
}
