use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde_json::Value;

use crate::RecentFilesError;
use crate::entry::RecentEntry;

/// The recent files array held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Vec<RecentEntry>,
}

impl Document {
    pub fn new(entries: Vec<RecentEntry>) -> Self {
        Self { entries }
    }

    /// Read the list at `path`.
    ///
    /// A missing file is a fresh MuseScore install and yields an empty
    /// document. Anything unreadable or not shaped like a recent files list
    /// is [`RecentFilesError::MalformedDocument`].
    pub fn load(path: &Path) -> Result<Self, RecentFilesError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no recent files list, starting empty");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(RecentFilesError::MalformedDocument {
                    path: path.to_path_buf(),
                    reason: format!("cannot read file: {}", e),
                });
            }
        };
        let document = Self::parse(path, &content)?;
        tracing::info!(path = %path.display(), entries = document.len(), "loaded recent files list");
        Ok(document)
    }

    /// Parse the JSON text of a recent files list. `path` is only used for
    /// error reporting.
    pub fn parse(path: &Path, content: &str) -> Result<Self, RecentFilesError> {
        let malformed = |reason: String| RecentFilesError::MalformedDocument {
            path: path.to_path_buf(),
            reason,
        };

        let values: Vec<Value> = serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                RecentEntry::try_from(value).map_err(|e| malformed(format!("entry {}: {}", i, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Write the list to `path` as two-space indented JSON.
    ///
    /// The file is written to a temporary sibling first and renamed over the
    /// target, so a failed write leaves the previous list intact. When `path`
    /// is a symlink the file it points to is updated, and an existing file
    /// keeps its permissions.
    pub fn save(&self, path: &Path) -> Result<(), RecentFilesError> {
        let write_err = |source: std::io::Error| RecentFilesError::WriteError {
            path: path.to_path_buf(),
            source,
        };

        let target = match std::fs::canonicalize(path) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => path.to_path_buf(),
            Err(e) => return Err(write_err(e)),
        };
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_err)?;

        let content = self.to_json_pretty().map_err(|e| write_err(e.into()))?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        if let Ok(existing) = std::fs::metadata(&target) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(write_err)?;
        }
        tmp.persist(&target).map_err(|e| write_err(e.error))?;

        tracing::info!(path = %path.display(), entries = self.len(), "saved recent files list");
        Ok(())
    }

    /// Serialized form written by [`Document::save`].
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }

    /// Remove and return the entry at `index`.
    ///
    /// Indices come from a freshly built projection, so an out-of-range
    /// index means the projection and the document have drifted apart.
    pub fn delete_at(&mut self, index: usize) -> Result<RecentEntry, RecentFilesError> {
        if index >= self.entries.len() {
            tracing::error!(index, len = self.entries.len(), "delete index out of range");
            return Err(RecentFilesError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    pub fn entries(&self) -> &[RecentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Copy the on-disk list at `path` to a timestamped sibling
/// (`<name>_<YYYYMMDDHHMMSS>.bak`) and return the backup's path.
pub fn backup(path: &Path) -> Result<PathBuf, RecentFilesError> {
    backup_at(path, Local::now().naive_local())
}

/// [`backup`] with an explicit timestamp.
pub fn backup_at(path: &Path, at: NaiveDateTime) -> Result<PathBuf, RecentFilesError> {
    if !path.is_file() {
        return Err(RecentFilesError::BackupError {
            path: path.to_path_buf(),
            reason: "the recent files list does not exist on disk".to_string(),
        });
    }

    let target = backup_path_for(path, at);
    std::fs::copy(path, &target).map_err(|e| RecentFilesError::BackupError {
        path: path.to_path_buf(),
        reason: format!("cannot write {}: {}", target.display(), e),
    })?;

    tracing::info!(source = %path.display(), backup = %target.display(), "created backup");
    Ok(target)
}

/// Backup file name for `path` taken at `at`.
pub fn backup_path_for(path: &Path, at: NaiveDateTime) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!("_{}.bak", at.format("%Y%m%d%H%M%S")));
    path.with_file_name(name)
}

/// The document together with where it lives and whether it has unsaved
/// removals.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    document: Document,
    dirty: bool,
}

impl Store {
    /// Load the list at `path` (empty if the file does not exist yet).
    pub fn open(path: PathBuf) -> Result<Self, RecentFilesError> {
        let document = Document::load(&path)?;
        Ok(Self::new(path, document))
    }

    pub fn new(path: PathBuf, document: Document) -> Self {
        Self {
            path,
            document,
            dirty: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// True when entries were removed since the last successful save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn delete_at(&mut self, index: usize) -> Result<RecentEntry, RecentFilesError> {
        let removed = self.document.delete_at(index)?;
        self.dirty = true;
        Ok(removed)
    }

    pub fn save(&mut self) -> Result<(), RecentFilesError> {
        self.document.save(&self.path)?;
        self.dirty = false;
        Ok(())
    }

    pub fn backup(&self) -> Result<PathBuf, RecentFilesError> {
        backup(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample() -> Document {
        let value = json!(["C:/a/Song.mscz", {"path": "cloud://id1", "displayName": "Cloud Tune"}]);
        Document::parse(Path::new("test.json"), &value.to_string()).unwrap()
    }

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 10)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap()
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let doc = Document::load(&dir.path().join("recent_files.json")).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_load_mixed_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_files.json");
        std::fs::write(
            &path,
            r#"["/scores/A.mscz", {"path": "cloud://x", "displayName": "X"}]"#,
        )
        .unwrap();

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.entries()[0], RecentEntry::Local("/scores/A.mscz".into()));
        assert_eq!(doc.entries()[1].display_name(), "X");
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_files.json");
        std::fs::write(&path, "[\"unterminated").unwrap();

        let err = Document::load(&path).unwrap_err();
        assert!(matches!(err, RecentFilesError::MalformedDocument { .. }));
    }

    #[test]
    fn test_load_rejects_non_array_and_bad_entries() {
        let err = Document::parse(Path::new("x.json"), r#"{"path": "a"}"#).unwrap_err();
        assert!(matches!(err, RecentFilesError::MalformedDocument { .. }));

        let err = Document::parse(Path::new("x.json"), r#"["a", 5]"#).unwrap_err();
        match err {
            RecentFilesError::MalformedDocument { reason, .. } => {
                assert!(reason.starts_with("entry 1:"), "{}", reason)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_save_round_trip_preserves_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_files.json");
        let original = json!([
            "/scores/A.mscz",
            {"displayName": "Cloud", "path": "cloud://1", "scoreId": 991, "meta": {"k": [1, 2]}}
        ]);
        std::fs::write(&path, original.to_string()).unwrap();

        let doc = Document::load(&path).unwrap();
        doc.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(reparsed, original);
        // Key order survives, not just key set.
        assert_eq!(written, serde_json::to_string_pretty(&original).unwrap());
    }

    #[test]
    fn test_save_uses_two_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_files.json");
        sample().save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "[\n  \"C:/a/Song.mscz\",\n  {\n    \"path\": \"cloud://id1\",\n    \"displayName\": \"Cloud Tune\"\n  }\n]"
        );
    }

    #[test]
    fn test_save_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("recent_files.json");
        Document::default().save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_save_into_unwritable_location_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let path = blocker.join("recent_files.json");

        let err = sample().save(&path).unwrap_err();
        assert!(matches!(err, RecentFilesError::WriteError { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_files.json");
        std::fs::write(&path, "[\"/a.mscz\"]").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        sample().save(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_through_symlink_updates_link_target() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.json");
        std::fs::write(&real, "[\"/a.mscz\"]").unwrap();
        std::fs::set_permissions(&real, std::fs::Permissions::from_mode(0o644)).unwrap();
        let link = dir.path().join("recent_files.json");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        sample().save(&link).unwrap();

        let link_meta = std::fs::symlink_metadata(&link).unwrap();
        assert!(link_meta.file_type().is_symlink());
        assert_eq!(
            std::fs::read_to_string(&real).unwrap(),
            sample().to_json_pretty().unwrap()
        );
        let mode = std::fs::metadata(&real).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_delete_at_removes_exactly_one() {
        let mut doc = sample();
        let removed = doc.delete_at(0).unwrap();
        assert_eq!(removed, RecentEntry::Local("C:/a/Song.mscz".into()));
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.entries()[0].path(), "cloud://id1");
    }

    #[test]
    fn test_delete_at_keeps_relative_order() {
        let mut doc = Document::new(
            ["a", "b", "c", "d"]
                .iter()
                .map(|s| RecentEntry::Local(s.to_string()))
                .collect(),
        );
        doc.delete_at(1).unwrap();
        let paths: Vec<&str> = doc.entries().iter().map(|e| e.path()).collect();
        assert_eq!(paths, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_delete_at_out_of_range() {
        let mut doc = sample();
        let err = doc.delete_at(2).unwrap_err();
        assert!(matches!(
            err,
            RecentFilesError::IndexOutOfRange { index: 2, len: 2 }
        ));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_backup_path_name() {
        let path = Path::new("/data/recent_files.json");
        assert_eq!(
            backup_path_for(path, stamp()),
            PathBuf::from("/data/recent_files.json_20251110090503.bak")
        );
    }

    #[test]
    fn test_backup_copies_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_files.json");
        std::fs::write(&path, "[\"/a.mscz\"]").unwrap();

        let target = backup_at(&path, stamp()).unwrap();
        assert_eq!(target, dir.path().join("recent_files.json_20251110090503.bak"));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "[\"/a.mscz\"]");
        assert!(path.exists());
    }

    #[test]
    fn test_backup_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = backup(&dir.path().join("recent_files.json")).unwrap_err();
        assert!(matches!(err, RecentFilesError::BackupError { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_store_tracks_unsaved_removals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_files.json");
        sample().save(&path).unwrap();

        let mut store = Store::open(path.clone()).unwrap();
        assert!(!store.is_dirty());
        store.delete_at(0).unwrap();
        assert!(store.is_dirty());

        // Not persisted until saved.
        assert_eq!(Document::load(&path).unwrap().len(), 2);

        store.save().unwrap();
        assert!(!store.is_dirty());
        assert_eq!(Document::load(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_store_backup_leaves_document_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_files.json");
        sample().save(&path).unwrap();

        let mut store = Store::open(path).unwrap();
        store.delete_at(1).unwrap();
        let target = store.backup().unwrap();

        // Backup reflects the file on disk, not the in-memory removal.
        assert_eq!(Document::load(&target).unwrap().len(), 2);
        assert_eq!(store.document().len(), 1);
        assert!(store.is_dirty());
    }
}
