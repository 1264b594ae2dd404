// iTermKit - tests/e2e_automation.rs
//
// End-to-end tests for profile resolution and hotkey dispatch.
//
// These tests exercise real property-list files (binary and XML), the real
// file-backed event log and, on Unix, a real child process standing in for
// osascript. Nothing talks to iTerm2.

use itermkit::app::dispatch::{dispatch, Overrides, Settings};
use itermkit::app::hotkey::HotkeyWindowController;
use itermkit::app::log_service::{EventLog, FileLogger};
use itermkit::app::profile_resolver::ProfileResolver;
use itermkit::core::model::ProfileResolution;
use itermkit::platform::config::{AppConfig, PlatformPaths};
use plist::{Dictionary, Value};
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// Helpers
// =============================================================================

fn bookmark(guid: &str, name: &str) -> Value {
    let mut entry = Dictionary::new();
    entry.insert("Guid".to_string(), Value::String(guid.to_string()));
    entry.insert("Name".to_string(), Value::String(name.to_string()));
    // Real profiles carry many more keys; include a couple of other types.
    entry.insert("Columns".to_string(), Value::Integer(80i64.into()));
    entry.insert("Use Bold Font".to_string(), Value::Boolean(true));
    Value::Dictionary(entry)
}

fn prefs(default_guid: Option<&str>, entries: Vec<Value>) -> Value {
    let mut root = Dictionary::new();
    if let Some(guid) = default_guid {
        root.insert(
            "Default Bookmark Guid".to_string(),
            Value::String(guid.to_string()),
        );
    }
    root.insert("New Bookmarks".to_string(), Value::Array(entries));
    root.insert("HotkeyDockClickAction".to_string(), Value::Integer(0i64.into()));
    Value::Dictionary(root)
}

fn write_binary(dir: &Path, value: &Value) -> PathBuf {
    let path = dir.join("binary.plist");
    value.to_file_binary(&path).unwrap();
    path
}

fn write_xml(dir: &Path, value: &Value) -> PathBuf {
    let path = dir.join("xml.plist");
    value.to_file_xml(&path).unwrap();
    path
}

fn log_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Profile resolution E2E
// =============================================================================

/// Binary and XML encodings of the same store resolve identically.
#[test]
fn e2e_binary_and_xml_resolve_identically() {
    let dir = tempfile::tempdir().unwrap();
    let store = prefs(
        Some("ABC-123"),
        vec![bookmark("XYZ-000", "Home"), bookmark("ABC-123", "Work")],
    );

    let binary = ProfileResolver::new(write_binary(dir.path(), &store)).resolve();
    let xml = ProfileResolver::new(write_xml(dir.path(), &store)).resolve();

    assert_eq!(binary, xml);
    assert_eq!(
        binary,
        ProfileResolution::Resolved {
            guid: "ABC-123".to_string(),
            name: "Work".to_string(),
        }
    );
}

/// Malformed entries before the match do not stop the scan.
#[test]
fn e2e_malformed_entries_interleaved() {
    let dir = tempfile::tempdir().unwrap();
    let mut nameless = Dictionary::new();
    nameless.insert("Name".to_string(), Value::String("No GUID".to_string()));
    let store = prefs(
        Some("ABC-123"),
        vec![
            Value::Dictionary(nameless),
            Value::String("not a profile".to_string()),
            bookmark("ABC-123", "Work"),
            Value::Integer(7i64.into()),
        ],
    );
    let path = write_xml(dir.path(), &store);

    assert_eq!(ProfileResolver::new(path).resolve().name(), "Work");
}

/// The resolved name and GUID land in the event log file.
#[test]
fn e2e_default_profile_name_logged_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let prefs_path = write_binary(
        dir.path(),
        &prefs(Some("ZZZ-999"), vec![bookmark("ABC-123", "Work")]),
    );
    let log_path = dir.path().join("itermkit.log");
    let logger = FileLogger::with_path(&log_path);

    let name = ProfileResolver::new(prefs_path).default_profile_name(&logger);

    assert_eq!(name, "Default");
    let lines = log_lines(&log_path);
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert!(lines[0].starts_with("DEBUG -- ["));
    assert!(lines[0].ends_with("] -- Default profile GUID: ZZZ-999"));
    assert!(lines[1].ends_with("] -- Default profile name: Default"));
}

/// A corrupt preference file degrades to the fallback name.
#[test]
fn e2e_corrupt_preferences_fall_back() {
    let dir = tempfile::tempdir().unwrap();
    let prefs_path = dir.path().join("corrupt.plist");
    fs::write(&prefs_path, b"bplist00\x00\x01garbage").unwrap();
    let log_path = dir.path().join("itermkit.log");
    let logger = FileLogger::with_path(&log_path);

    let name = ProfileResolver::new(prefs_path).default_profile_name(&logger);

    assert_eq!(name, "Default");
    let lines = log_lines(&log_path);
    assert!(lines[0].starts_with("WARN -- ["));
    assert!(lines[0].ends_with("Default profile GUID: (missing)"));
}

// =============================================================================
// Bootstrap + dispatch E2E
// =============================================================================

fn platform_under(root: &Path) -> PlatformPaths {
    PlatformPaths {
        config_dir: root.join("config"),
        data_dir: root.join("data"),
        log_dir: root.join("data").join("logs"),
    }
}

/// Bootstrap with the platform default log directory and no hotkey.
#[test]
fn e2e_bootstrap_without_hotkey_logs_once() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::resolve(
        &Overrides::default(),
        &AppConfig::default(),
        &platform_under(dir.path()),
    )
    .unwrap();
    settings.prepare_log_dir().unwrap();
    let logger = settings.build_logger();
    let controller = HotkeyWindowController::new(
        itermkit::platform::osascript::OsaScriptRunner::with_program(
            "itermkit-never-spawned",
            "-e",
            settings.automation_timeout,
        ),
    );

    dispatch(false, &logger, &controller).unwrap();

    let lines = log_lines(&settings.log_path());
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("INFO -- ["));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use itermkit::platform::osascript::OsaScriptRunner;
    use itermkit::util::error::{AutomationError, ItermKitError};
    use std::time::Duration;

    /// With the hotkey flag set, the script host runs and entry/exit are logged.
    #[test]
    fn e2e_hotkey_dispatch_runs_script_host() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("itermkit.log");
        let logger = FileLogger::with_path(&log_path);
        // `sh -c <applescript>` fails on the AppleScript text, so use `true`
        // as the host to stand in for a successful osascript.
        let controller = HotkeyWindowController::new(OsaScriptRunner::with_program(
            "true",
            "-e",
            Duration::from_secs(5),
        ));

        dispatch(true, &logger, &controller).unwrap();

        let lines = log_lines(&log_path);
        assert_eq!(lines.len(), 3, "{lines:?}");
        assert!(lines[1].ends_with("Revealing hotkey window"));
        assert!(lines[2].ends_with("Hotkey window revealed"));
    }

    /// A failing script host propagates out of dispatch; the caller logs it.
    #[test]
    fn e2e_hotkey_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("itermkit.log");
        let logger = FileLogger::with_path(&log_path);
        let controller = HotkeyWindowController::new(OsaScriptRunner::with_program(
            "false",
            "-e",
            Duration::from_secs(5),
        ));

        let err = dispatch(true, &logger, &controller).unwrap_err();
        assert!(matches!(err, AutomationError::Failed { .. }));
        let err = ItermKitError::from(err);
        assert!(logger.error(&err.to_string()));

        let lines = log_lines(&log_path);
        assert_eq!(lines.len(), 3, "{lines:?}");
        assert!(lines[2].starts_with("ERROR -- ["));
        assert!(lines[2].contains("] -- Automation error: Script exited with"));
    }
}
