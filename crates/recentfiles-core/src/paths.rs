use std::path::PathBuf;

use crate::RecentFilesError;

/// File name MuseScore 4 uses for its recent files list.
pub const RECENT_FILES_NAME: &str = "recent_files.json";

/// Locate MuseScore 4's recent files list for the running platform.
///
/// - Windows: `%LOCALAPPDATA%\MuseScore\MuseScore4\recent_files.json`
/// - macOS: `~/Library/Application Support/MuseScore/MuseScore4/recent_files.json`
/// - Linux and other Unix: `~/.local/share/MuseScore/MuseScore4/recent_files.json`
///
/// Any other platform, or a platform whose base directory cannot be
/// determined, is [`RecentFilesError::UnsupportedPlatform`].
pub fn resolve_path() -> Result<PathBuf, RecentFilesError> {
    let base = platform_base_dir().ok_or(RecentFilesError::UnsupportedPlatform)?;
    Ok(base
        .join("MuseScore")
        .join("MuseScore4")
        .join(RECENT_FILES_NAME))
}

#[cfg(windows)]
fn platform_base_dir() -> Option<PathBuf> {
    dirs::data_local_dir()
}

#[cfg(target_os = "macos")]
fn platform_base_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Library").join("Application Support"))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn platform_base_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".local").join("share"))
}

#[cfg(not(any(windows, unix)))]
fn platform_base_dir() -> Option<PathBuf> {
    None
}
