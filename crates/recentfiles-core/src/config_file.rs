use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub document: Option<DocumentConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Recent files list to edit instead of the platform default.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
}

impl ConfigFile {
    /// Configured document location, if one is set and non-empty.
    pub fn document_path(&self) -> Option<PathBuf> {
        self.document
            .as_ref()
            .and_then(|d| d.path.as_deref())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    pub fn theme(&self) -> Option<&str> {
        self.display
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .filter(|t| !t.is_empty())
    }
}

/// Platform config directory path: `<config_dir>/recentfiles/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("recentfiles").join("config.toml"))
}

/// Load config by cascading CWD `.recentfiles.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".recentfiles.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        document: Some(DocumentConfig {
            path: overlay
                .document
                .as_ref()
                .and_then(|d| d.path.clone())
                .or_else(|| base.document.as_ref().and_then(|d| d.path.clone())),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\ntheme = \"modern\"\n").unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.theme(), Some("modern"));
        assert_eq!(config.document_path(), None);
    }

    #[test]
    fn test_load_missing_or_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_path(&dir.path().join("absent.toml")).is_none());

        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[display\ntheme=").unwrap();
        assert!(load_from_path(&path).is_none());
    }

    #[test]
    fn test_merge_overlay_wins() {
        let base = ConfigFile {
            document: Some(DocumentConfig {
                path: Some("/base/recent_files.json".into()),
            }),
            display: Some(DisplayConfig {
                theme: Some("hacker".into()),
            }),
        };
        let overlay = ConfigFile {
            document: None,
            display: Some(DisplayConfig {
                theme: Some("modern".into()),
            }),
        };

        let merged = merge(base, overlay);
        assert_eq!(
            merged.document_path(),
            Some(PathBuf::from("/base/recent_files.json"))
        );
        assert_eq!(merged.theme(), Some("modern"));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config: ConfigFile = toml::from_str("[document]\npath = \"\"\n[display]\ntheme = \"\"\n").unwrap();
        assert_eq!(config.document_path(), None);
        assert_eq!(config.theme(), None);
    }
}
