use crate::store::Document;

/// A display row derived from one document entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRow {
    pub display_path: String,
    pub display_name: String,
    /// Position of the entry in the document when this row was built.
    /// Invalid once the document's length changes.
    pub source_index: usize,
}

/// One row per entry, in document order.
pub fn project(document: &Document) -> Vec<ProjectedRow> {
    document
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| ProjectedRow {
            display_path: entry.path().to_string(),
            display_name: entry.display_name().to_string(),
            source_index: i,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::RecentEntry;
    use serde_json::json;
    use std::path::Path;

    fn doc(value: serde_json::Value) -> Document {
        Document::parse(Path::new("test.json"), &value.to_string()).unwrap()
    }

    #[test]
    fn test_project_mixed_document() {
        let d = doc(json!(["C:/a/Song.mscz", {"path": "cloud://id1", "displayName": "Cloud Tune"}]));
        assert_eq!(
            project(&d),
            vec![
                ProjectedRow {
                    display_path: "C:/a/Song.mscz".into(),
                    display_name: "Song.mscz".into(),
                    source_index: 0,
                },
                ProjectedRow {
                    display_path: "cloud://id1".into(),
                    display_name: "Cloud Tune".into(),
                    source_index: 1,
                },
            ]
        );
    }

    #[test]
    fn test_project_length_and_indices() {
        let d = Document::new(
            (0..25)
                .map(|i| RecentEntry::Local(format!("/scores/{}.mscz", i)))
                .collect(),
        );
        let rows = project(&d);
        assert_eq!(rows.len(), d.len());
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.source_index, i);
            assert_eq!(row.display_name, format!("{}.mscz", i));
        }
    }

    #[test]
    fn test_project_empty() {
        assert!(project(&Document::default()).is_empty());
    }

    #[test]
    fn test_project_after_delete_reindexes() {
        let mut d = doc(json!(["C:/a/Song.mscz", {"path": "cloud://id1", "displayName": "Cloud Tune"}]));
        d.delete_at(0).unwrap();
        let rows = project(&d);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].display_name, "Cloud Tune");
        assert_eq!(rows[0].source_index, 0);
    }
}
