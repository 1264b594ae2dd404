// iTermKit - app/dispatch.rs
//
// Bootstrap and dispatch.
//
// Settings are layered: CLI overrides > config.toml > platform defaults.
// The log directory is always an explicit value from that chain; nothing is
// derived from where the executable lives.

use crate::app::hotkey::HotkeyWindowController;
use crate::app::log_service::{EventLog, FileLogger};
use crate::platform::config::{AppConfig, PlatformPaths};
use crate::platform::osascript::ScriptRunner;
use crate::util::constants::{
    LOG_FILE_NAME, MAX_AUTOMATION_TIMEOUT_SECS, MIN_AUTOMATION_TIMEOUT_SECS,
};
use crate::util::error::{AutomationError, ConfigError, ItermKitError};
use std::path::PathBuf;
use std::time::Duration;

/// Values supplied on the command line; `None` defers to config.toml.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub preferences_path: Option<PathBuf>,
}

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory receiving the event log.
    pub log_dir: PathBuf,
    /// True when `log_dir` is the platform default rather than user-supplied.
    pub log_dir_is_default: bool,
    /// Upper bound on the scripting bridge call.
    pub automation_timeout: Duration,
    /// Preference file override; `None` means the standard location.
    pub preferences_path: Option<PathBuf>,
}

impl Settings {
    /// Merge the three layers. CLI values are validated here; config values
    /// were already validated by `load_config`.
    pub fn resolve(
        overrides: &Overrides,
        config: &AppConfig,
        paths: &PlatformPaths,
    ) -> Result<Self, ConfigError> {
        let automation_timeout = match overrides.timeout_secs {
            Some(secs) if (MIN_AUTOMATION_TIMEOUT_SECS..=MAX_AUTOMATION_TIMEOUT_SECS)
                .contains(&secs) =>
            {
                Duration::from_secs(secs)
            }
            Some(secs) => {
                return Err(ConfigError::ValueOutOfRange {
                    field: "--timeout-secs".to_string(),
                    value: secs.to_string(),
                    expected: format!(
                        "{MIN_AUTOMATION_TIMEOUT_SECS}-{MAX_AUTOMATION_TIMEOUT_SECS}"
                    ),
                });
            }
            None => config.automation_timeout,
        };

        let (log_dir, log_dir_is_default) = match (&overrides.log_dir, &config.log_dir) {
            (Some(dir), _) | (None, Some(dir)) => (dir.clone(), false),
            (None, None) => (paths.log_dir.clone(), true),
        };

        let preferences_path = overrides
            .preferences_path
            .clone()
            .or_else(|| config.preferences_path.clone());

        Ok(Self {
            log_dir,
            log_dir_is_default,
            automation_timeout,
            preferences_path,
        })
    }

    /// `<log_dir>/itermkit.log`
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    /// Create the platform default log directory. User-supplied directories
    /// are left alone and must already exist.
    pub fn prepare_log_dir(&self) -> Result<(), ItermKitError> {
        if !self.log_dir_is_default {
            return Ok(());
        }
        std::fs::create_dir_all(&self.log_dir).map_err(|source| ItermKitError::Io {
            path: self.log_dir.clone(),
            operation: "create log directory",
            source,
        })
    }

    /// Event log pointed at `log_path()`.
    pub fn build_logger(&self) -> FileLogger {
        let mut logger = FileLogger::new();
        logger.set_log_path(self.log_path());
        logger
    }
}

/// Entry point for the `is_hotkey` flag.
///
/// Bridge failures propagate to the caller.
pub fn dispatch<R: ScriptRunner>(
    is_hotkey: bool,
    log: &dyn EventLog,
    controller: &HotkeyWindowController<R>,
) -> Result<(), AutomationError> {
    if !is_hotkey {
        log.info("Hotkey not requested; nothing to do");
        return Ok(());
    }

    log.info("Hotkey requested; revealing hotkey window");
    controller.reveal_hotkey_window(log)
}
