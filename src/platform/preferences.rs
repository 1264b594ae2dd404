// iTermKit - platform/preferences.rs
//
// Locating and decoding the iTerm2 preference store.
//
// macOS keeps per-application preferences at
// ~/Library/Preferences/<bundle-id>.plist in either binary or XML form;
// `plist::Value::from_file` detects the encoding. The decoded tree is handed
// to core::profile for navigation and dropped after each resolution.

use crate::util::constants::{ITERM_BUNDLE_ID, PREFERENCES_SUBDIR};
use crate::util::error::PreferenceError;
use directories::BaseDirs;
use plist::Value;
use std::path::{Path, PathBuf};

/// Standard location of the iTerm2 preference file for the current user.
pub fn default_preferences_path() -> Result<PathBuf, PreferenceError> {
    let base = BaseDirs::new().ok_or(PreferenceError::HomeNotFound)?;
    Ok(preferences_path_in(base.home_dir()))
}

/// Preference file location relative to an explicit home directory.
pub fn preferences_path_in(home: &Path) -> PathBuf {
    home.join(PREFERENCES_SUBDIR)
        .join(format!("{ITERM_BUNDLE_ID}.plist"))
}

/// Decode the preference store at `path`.
pub fn load_store(path: &Path) -> Result<Value, PreferenceError> {
    tracing::debug!(path = %path.display(), "Reading preference store");
    Value::from_file(path).map_err(|source| PreferenceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_path_uses_bundle_id() {
        let path = preferences_path_in(Path::new("/Users/someone"));
        assert_eq!(
            path,
            PathBuf::from("/Users/someone/Library/Preferences/com.googlecode.iterm2.plist")
        );
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_store(&dir.path().join("absent.plist"));
        assert!(matches!(result, Err(PreferenceError::Read { .. })));
    }

    #[test]
    fn test_load_garbage_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.plist");
        std::fs::write(&path, b"definitely not a property list").unwrap();
        assert!(matches!(load_store(&path), Err(PreferenceError::Read { .. })));
    }
}
