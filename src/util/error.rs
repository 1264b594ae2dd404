// iTermKit - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Top-level error type for all iTermKit operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum ItermKitError {
    /// Preference store could not be read or navigated.
    Preferences(PreferenceError),

    /// Scripting bridge call failed.
    Automation(AutomationError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ItermKitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preferences(e) => write!(f, "Preference error: {e}"),
            Self::Automation(e) => write!(f, "Automation error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ItermKitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Preferences(e) => Some(e),
            Self::Automation(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Log errors
// ---------------------------------------------------------------------------

/// Errors raised while appending to the event log.
///
/// Never reaches `ItermKitError`: `EventLog::log` reports failure as `false`.
#[derive(Debug)]
pub enum LogError {
    /// A write was attempted before `set_log_path` was called.
    PathNotConfigured,

    /// The log file could not be opened, written or flushed.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathNotConfigured => {
                write!(f, "No log path configured; call set_log_path before logging")
            }
            Self::Io { path, source } => {
                write!(f, "Cannot append to log '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::PathNotConfigured => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Preference errors
// ---------------------------------------------------------------------------

/// Errors raised while loading or navigating the iTerm2 preference store.
#[derive(Debug)]
pub enum PreferenceError {
    /// The user's home directory could not be determined.
    HomeNotFound,

    /// The property list could not be opened or decoded.
    Read {
        path: PathBuf,
        source: plist::Error,
    },

    /// A key holds a value of an unexpected type.
    WrongType {
        key: &'static str,
        expected: &'static str,
    },

    /// The profile matching the default GUID has no usable name.
    MissingName { guid: String },
}

impl fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HomeNotFound => write!(f, "Could not determine the home directory"),
            Self::Read { path, source } => {
                write!(f, "Cannot read preferences '{}': {source}", path.display())
            }
            Self::WrongType { key, expected } => {
                write!(f, "Preference '{key}' is not {expected}")
            }
            Self::MissingName { guid } => {
                write!(f, "Profile '{guid}' has no name")
            }
        }
    }
}

impl std::error::Error for PreferenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<PreferenceError> for ItermKitError {
    fn from(e: PreferenceError) -> Self {
        Self::Preferences(e)
    }
}

// ---------------------------------------------------------------------------
// Automation errors
// ---------------------------------------------------------------------------

/// Errors raised by the scripting bridge.
#[derive(Debug)]
pub enum AutomationError {
    /// The script host could not be started.
    Spawn { program: String, source: io::Error },

    /// The script ran but exited unsuccessfully.
    Failed { status: ExitStatus, stderr: String },

    /// The script did not finish within the configured timeout.
    TimedOut { timeout_ms: u128 },

    /// The call was cancelled before the script finished.
    Cancelled,

    /// Waiting on or collecting output from the script host failed.
    Io { source: io::Error },
}

impl fmt::Display for AutomationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { program, source } => {
                write!(f, "Failed to start '{program}': {source}")
            }
            Self::Failed { status, stderr } => {
                if stderr.is_empty() {
                    write!(f, "Script exited with {status}")
                } else {
                    write!(f, "Script exited with {status}: {stderr}")
                }
            }
            Self::TimedOut { timeout_ms } => write!(
                f,
                "Script did not finish within {timeout_ms} ms and was terminated. \
                 Is iTerm2 responding?"
            ),
            Self::Cancelled => write!(f, "Script was cancelled"),
            Self::Io { source } => write!(f, "Script host I/O error: {source}"),
        }
    }
}

impl std::error::Error for AutomationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::Io { source } => Some(source),
            _ => None,
        }
    }
}

impl From<AutomationError> for ItermKitError {
    fn from(e: AutomationError) -> Self {
        Self::Automation(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for ItermKitError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for iTermKit results.
pub type Result<T> = std::result::Result<T, ItermKitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_source_chain_preserved() {
        let err: ItermKitError = ConfigError::Io {
            path: PathBuf::from("/nowhere/config.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        let inner = err.source().expect("config error source");
        assert!(inner.source().is_some());
        assert!(err.to_string().contains("/nowhere/config.toml"));
    }

    #[test]
    fn test_subsystem_errors_convert_with_question_mark() {
        fn reveal() -> std::result::Result<(), AutomationError> {
            Err(AutomationError::Cancelled)
        }
        fn fails() -> Result<()> {
            reveal()?;
            Ok(())
        }
        assert!(matches!(
            fails(),
            Err(ItermKitError::Automation(AutomationError::Cancelled))
        ));
    }

    #[test]
    fn test_timeout_message_names_duration() {
        let msg = AutomationError::TimedOut { timeout_ms: 1500 }.to_string();
        assert!(msg.contains("1500 ms"), "{msg}");
    }
}
