// iTermKit - platform/config.rs
//
// Platform-specific data directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved platform paths for iTermKit data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/Library/Application Support/iTermKit/)
    pub config_dir: PathBuf,

    /// Data directory.
    pub data_dir: PathBuf,

    /// Default event log directory (`<data_dir>/logs`).
    pub log_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();
            let log_dir = data_dir.join(constants::LOGS_DIR_NAME);

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                logs = %log_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
                log_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                log_dir: fallback.join(constants::LOGS_DIR_NAME),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logging]` section.
    pub logging: LoggingSection,
    /// `[automation]` section.
    pub automation: AutomationSection,
    /// `[preferences]` section.
    pub preferences: PreferencesSection,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Diagnostic level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Directory receiving the event log. Must already exist.
    pub dir: Option<String>,
}

/// `[automation]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AutomationSection {
    /// Upper bound on a single scripting bridge call, in seconds.
    pub timeout_secs: Option<u64>,
}

/// `[preferences]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PreferencesSection {
    /// Explicit iTerm2 preference file, overriding the standard location.
    pub path: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Diagnostic level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Event log directory.
    pub log_dir: Option<PathBuf>,
    /// Scripting bridge timeout.
    pub automation_timeout: Duration,
    /// Preference file override.
    pub preferences_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            log_dir: None,
            automation_timeout: Duration::from_secs(constants::DEFAULT_AUTOMATION_TIMEOUT_SECS),
            preferences_path: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(source) => {
            let err = ConfigError::Io {
                path: config_path.clone(),
                source,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let (config, parse_warnings) = parse_config(&content, &config_path);
    warnings.extend(parse_warnings);
    (config, warnings)
}

/// Validate the text of a config file. `origin` is used in messages only.
pub fn parse_config(content: &str, origin: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(source) => {
            let err = ConfigError::TomlParse {
                path: origin.to_path_buf(),
                source,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %origin.display(), "Loaded config.toml");

    let mut config = AppConfig::default();

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    // -- Logging: dir --
    if let Some(ref dir) = raw.logging.dir {
        if !dir.is_empty() {
            config.log_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Automation: timeout_secs --
    if let Some(secs) = raw.automation.timeout_secs {
        if (constants::MIN_AUTOMATION_TIMEOUT_SECS..=constants::MAX_AUTOMATION_TIMEOUT_SECS)
            .contains(&secs)
        {
            config.automation_timeout = Duration::from_secs(secs);
        } else {
            warnings.push(format!(
                "[automation] timeout_secs = {secs} is out of range ({}-{}). Using default ({}).",
                constants::MIN_AUTOMATION_TIMEOUT_SECS,
                constants::MAX_AUTOMATION_TIMEOUT_SECS,
                constants::DEFAULT_AUTOMATION_TIMEOUT_SECS,
            ));
        }
    }

    // -- Preferences: path --
    if let Some(ref path) = raw.preferences.path {
        if !path.is_empty() {
            config.preferences_path = Some(PathBuf::from(path));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}
