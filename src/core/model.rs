// iTermKit - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no platform
// dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants::{FALLBACK_PROFILE_NAME, LOG_FIELD_SEPARATOR, LOG_TIMESTAMP_FORMAT};
use chrono::{Local, NaiveDateTime};

// =============================================================================
// Log level
// =============================================================================

/// Severity of an event log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum LogLevel {
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Upper-case label written into the log file.
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Log record
// =============================================================================

/// A single event log line before it is written.
///
/// Timestamps are local civil time; the rendered form never depends on the
/// process locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    level: LogLevel,
    timestamp: NaiveDateTime,
    message: String,
}

impl LogRecord {
    /// Record stamped with the current local time.
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self::at(level, Local::now().naive_local(), message)
    }

    /// Record with an explicit timestamp.
    pub fn at(level: LogLevel, timestamp: NaiveDateTime, message: impl Into<String>) -> Self {
        Self {
            level,
            timestamp,
            message: message.into(),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render as `LEVEL -- [YYYY-MM-DD HH:MM:SS] -- message`, without a
    /// line terminator.
    pub fn render(&self) -> String {
        format!(
            "{level}{sep}[{ts}]{sep}{msg}",
            level = self.level.label(),
            sep = LOG_FIELD_SEPARATOR,
            ts = self.timestamp.format(LOG_TIMESTAMP_FORMAT),
            msg = self.message,
        )
    }
}

// =============================================================================
// Profiles
// =============================================================================

/// One entry of the preference store's profile list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    /// Generated identifier, unique within the list in practice.
    pub guid: String,
    /// Display name shown in iTerm2's profile menu.
    pub name: String,
}

/// Outcome of looking up the default profile.
///
/// Only `Resolved` carries both a GUID and a name; every other variant
/// reports the fallback name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileResolution {
    /// The default GUID matched a profile with a non-empty name.
    Resolved { guid: String, name: String },

    /// A default GUID is set but no profile carries it.
    Unmatched { guid: String },

    /// The store has no default GUID.
    GuidMissing,

    /// The store could not be read or navigated.
    Unavailable { reason: String },
}

impl ProfileResolution {
    /// The default GUID, when it was actually read from the store.
    pub fn guid(&self) -> Option<&str> {
        match self {
            Self::Resolved { guid, .. } | Self::Unmatched { guid } => Some(guid),
            Self::GuidMissing | Self::Unavailable { .. } => None,
        }
    }

    /// Display name of the default profile, or `"Default"` when unresolved.
    /// Never empty.
    pub fn name(&self) -> &str {
        match self {
            Self::Resolved { name, .. } => name,
            _ => FALLBACK_PROFILE_NAME,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_render_zero_pads_components() {
        let record = LogRecord::at(LogLevel::Warn, ts(2024, 3, 7, 4, 5, 9), "hello");
        assert_eq!(record.render(), "WARN -- [2024-03-07 04:05:09] -- hello");
    }

    #[test]
    fn test_render_four_digit_year() {
        let record = LogRecord::at(LogLevel::Debug, ts(987, 12, 31, 23, 59, 58), "x");
        assert_eq!(record.render(), "DEBUG -- [0987-12-31 23:59:58] -- x");
    }

    #[test]
    fn test_default_level_is_debug() {
        assert_eq!(LogLevel::default(), LogLevel::Debug);
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_fallback_name_for_unresolved_variants() {
        let unmatched = ProfileResolution::Unmatched {
            guid: "ZZZ-999".to_string(),
        };
        assert_eq!(unmatched.name(), "Default");
        assert_eq!(unmatched.guid(), Some("ZZZ-999"));

        assert_eq!(ProfileResolution::GuidMissing.name(), "Default");
        assert_eq!(ProfileResolution::GuidMissing.guid(), None);

        let unavailable = ProfileResolution::Unavailable {
            reason: "nope".to_string(),
        };
        assert_eq!(unavailable.name(), "Default");
        assert_eq!(unavailable.guid(), None);
    }

    #[test]
    fn test_resolved_carries_both_fields() {
        let resolved = ProfileResolution::Resolved {
            guid: "ABC-123".to_string(),
            name: "Work".to_string(),
        };
        assert!(resolved.is_resolved());
        assert_eq!(resolved.guid(), Some("ABC-123"));
        assert_eq!(resolved.name(), "Work");
    }
}
