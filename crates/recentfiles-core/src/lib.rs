//! Recent files list editing for MuseScore.
//!
//! Loads MuseScore's `recent_files.json`, derives display rows from it,
//! filters and sorts those rows, and removes entries on request. Score files
//! on disk are never touched; only the list that references them is edited.

pub mod config_file;
pub mod entry;
pub mod paths;
pub mod projection;
pub mod query;
pub mod session;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;

// Re-export for convenience
pub use entry::{CloudEntry, RecentEntry, basename};
pub use paths::resolve_path;
pub use projection::{ProjectedRow, project};
pub use query::{QueryEngine, SortColumn, SortDirection};
pub use session::{Column, DeleteFlow, Intent, Response, Session};
pub use store::{Document, Store, backup};

#[derive(Error, Debug)]
pub enum RecentFilesError {
    #[error("unsupported platform: no known location for the recent files list")]
    UnsupportedPlatform,
    #[error("malformed recent files document {}: {reason}", path.display())]
    MalformedDocument { path: PathBuf, reason: String },
    #[error("failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("backup of {} failed: {reason}", path.display())]
    BackupError { path: PathBuf, reason: String },
    #[error("entry index {index} out of range (document has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
}
