use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// One element of the recent files array.
///
/// MuseScore writes local scores as bare path strings and cloud scores as
/// objects carrying a storage `path` plus a human readable `displayName`.
#[derive(Debug, Clone, PartialEq)]
pub enum RecentEntry {
    Local(String),
    Cloud(CloudEntry),
}

/// Object-form entry. The original JSON object is kept whole so that fields
/// this program does not know about are written back exactly as read.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudEntry {
    path: String,
    display_name: Option<String>,
    fields: Map<String, Value>,
}

impl CloudEntry {
    /// Build from a JSON object. Requires a string `path`; `displayName`,
    /// when present, must also be a string.
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self, String> {
        let path = match fields.get("path") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => return Err(format!("\"path\" must be a string, found {}", kind(other))),
            None => return Err("object entry has no \"path\" field".to_string()),
        };
        let display_name = match fields.get("displayName") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(format!(
                    "\"displayName\" must be a string, found {}",
                    kind(other)
                ));
            }
            None => None,
        };
        Ok(Self {
            path,
            display_name,
            fields,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The stored `displayName`, if the object has one.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Every field of the object, in file order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Fields other than `path` and `displayName`.
    pub fn extra_fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields
            .iter()
            .filter(|(k, _)| k.as_str() != "path" && k.as_str() != "displayName")
    }
}

impl RecentEntry {
    /// Path as stored in the list (not necessarily a filesystem path for
    /// cloud scores).
    pub fn path(&self) -> &str {
        match self {
            Self::Local(path) => path,
            Self::Cloud(cloud) => cloud.path(),
        }
    }

    /// Name shown in the Filename column.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Local(path) => basename(path),
            Self::Cloud(cloud) => cloud
                .display_name()
                .unwrap_or_else(|| basename(cloud.path())),
        }
    }

    pub fn is_cloud(&self) -> bool {
        matches!(self, Self::Cloud(_))
    }
}

impl TryFrom<Value> for RecentEntry {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(path) => Ok(Self::Local(path)),
            Value::Object(fields) => CloudEntry::from_fields(fields).map(Self::Cloud),
            other => Err(format!(
                "expected a path string or an object, found {}",
                kind(&other)
            )),
        }
    }
}

impl Serialize for RecentEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Local(path) => serializer.serialize_str(path),
            Self::Cloud(cloud) => cloud.fields.serialize(serializer),
        }
    }
}

/// Last path component, splitting on both `/` and `\` so Windows paths are
/// handled the same on every platform. A trailing separator yields `""`.
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basename() {
        assert_eq!(basename("C:/a/Song.mscz"), "Song.mscz");
        assert_eq!(basename("C:\\Scores\\Fugue.mscz"), "Fugue.mscz");
        assert_eq!(basename("/home/me/scores/Étude.mscz"), "Étude.mscz");
        assert_eq!(basename("plain.mscz"), "plain.mscz");
        assert_eq!(basename("dir/"), "");
        assert_eq!(basename(""), "");
    }

    #[test]
    fn test_local_entry() {
        let entry = RecentEntry::try_from(json!("C:/a/Song.mscz")).unwrap();
        assert_eq!(entry, RecentEntry::Local("C:/a/Song.mscz".into()));
        assert_eq!(entry.path(), "C:/a/Song.mscz");
        assert_eq!(entry.display_name(), "Song.mscz");
        assert!(!entry.is_cloud());
    }

    #[test]
    fn test_cloud_entry_uses_display_name_verbatim() {
        let entry =
            RecentEntry::try_from(json!({"path": "cloud://id1", "displayName": "Cloud Tune"}))
                .unwrap();
        assert!(entry.is_cloud());
        assert_eq!(entry.path(), "cloud://id1");
        assert_eq!(entry.display_name(), "Cloud Tune");
    }

    #[test]
    fn test_cloud_entry_without_display_name_falls_back_to_basename() {
        let entry = RecentEntry::try_from(json!({"path": "/scores/Waltz.mscz"})).unwrap();
        assert_eq!(entry.display_name(), "Waltz.mscz");
    }

    #[test]
    fn test_cloud_entry_keeps_extra_fields_in_order() {
        let value = json!({
            "thumbnail": "abc",
            "path": "cloud://id2",
            "displayName": "Nocturne",
            "revision": 7
        });
        let entry = RecentEntry::try_from(value.clone()).unwrap();
        let RecentEntry::Cloud(cloud) = &entry else {
            panic!("expected cloud entry");
        };
        let extra: Vec<&str> = cloud.extra_fields().map(|(k, _)| k.as_str()).collect();
        assert_eq!(extra, vec!["thumbnail", "revision"]);

        let written = serde_json::to_string(&entry).unwrap();
        assert_eq!(written, serde_json::to_string(&value).unwrap());
        assert!(written.starts_with("{\"thumbnail\""));
    }

    #[test]
    fn test_rejects_other_json_values() {
        assert!(RecentEntry::try_from(json!(42)).is_err());
        assert!(RecentEntry::try_from(json!(null)).is_err());
        assert!(RecentEntry::try_from(json!(["a"])).is_err());
    }

    #[test]
    fn test_rejects_bad_object_fields() {
        let err = RecentEntry::try_from(json!({"displayName": "x"})).unwrap_err();
        assert!(err.contains("path"));
        let err = RecentEntry::try_from(json!({"path": 3})).unwrap_err();
        assert!(err.contains("a number"));
        let err = RecentEntry::try_from(json!({"path": "p", "displayName": false})).unwrap_err();
        assert!(err.contains("displayName"));
    }
}
