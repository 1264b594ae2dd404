// iTermKit - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "iTermKit";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "iTermKit";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Automation target
// =============================================================================

/// Bundle identifier of iTerm2. Also the stem of its preference file.
pub const ITERM_BUNDLE_ID: &str = "com.googlecode.iterm2";

/// Application name used in AppleScript `tell application` blocks.
pub const ITERM_APP_NAME: &str = "iTerm2";

/// Directory holding per-application preference files, relative to `$HOME`.
pub const PREFERENCES_SUBDIR: &str = "Library/Preferences";

/// Executable used as the scripting bridge.
pub const OSASCRIPT_PROGRAM: &str = "osascript";

/// Flag that makes `osascript` take the script text as the next argument.
pub const OSASCRIPT_SCRIPT_FLAG: &str = "-e";

// =============================================================================
// Preference store keys
// =============================================================================

/// Top-level key holding the GUID of the default profile.
pub const KEY_DEFAULT_GUID: &str = "Default Bookmark Guid";

/// Top-level key holding the array of profile dictionaries.
pub const KEY_BOOKMARKS: &str = "New Bookmarks";

/// Per-profile GUID key.
pub const KEY_GUID: &str = "Guid";

/// Per-profile display name key.
pub const KEY_NAME: &str = "Name";

/// Name reported when the default profile cannot be resolved.
pub const FALLBACK_PROFILE_NAME: &str = "Default";

/// Placeholder logged in place of an absent default GUID.
pub const MISSING_GUID_LABEL: &str = "(missing)";

// =============================================================================
// Automation limits
// =============================================================================

/// Default upper bound on a single scripting bridge call (seconds).
pub const DEFAULT_AUTOMATION_TIMEOUT_SECS: u64 = 10;

/// Minimum user-configurable automation timeout (seconds).
pub const MIN_AUTOMATION_TIMEOUT_SECS: u64 = 1;

/// Maximum user-configurable automation timeout (seconds).
pub const MAX_AUTOMATION_TIMEOUT_SECS: u64 = 120;

/// How often a running script is polled for exit and cancellation (ms).
pub const AUTOMATION_POLL_INTERVAL_MS: u64 = 50;

/// Maximum number of stderr bytes carried in an `AutomationError::Failed`.
pub const MAX_SCRIPT_STDERR_BYTES: usize = 4 * 1024;

// =============================================================================
// Logging
// =============================================================================

/// Default diagnostic log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name of the append-only event log inside the log directory.
pub const LOG_FILE_NAME: &str = "itermkit.log";

/// Subdirectory of the platform data directory used for logs by default.
pub const LOGS_DIR_NAME: &str = "logs";

/// Separator between the fields of a rendered log line.
pub const LOG_FIELD_SEPARATOR: &str = " -- ";

/// `chrono` format string for the timestamp field of a log line.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
