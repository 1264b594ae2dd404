// iTermKit - app/profile_resolver.rs
//
// "What is the current default profile called?"
//
// Wraps load + correlation in a single failure boundary: a missing or
// malformed preference file never propagates, it becomes
// `ProfileResolution::Unavailable`. The store is re-read on every call.

use crate::app::log_service::EventLog;
use crate::core::model::{ProfileRecord, ProfileResolution};
use crate::core::profile;
use crate::platform::preferences;
use crate::util::constants::MISSING_GUID_LABEL;
use crate::util::error::PreferenceError;
use std::path::{Path, PathBuf};

/// Resolves the default profile from one preference file.
#[derive(Debug, Clone)]
pub struct ProfileResolver {
    preferences_path: Option<PathBuf>,
}

impl ProfileResolver {
    /// Resolver reading an explicit preference file.
    pub fn new(preferences_path: impl Into<PathBuf>) -> Self {
        Self {
            preferences_path: Some(preferences_path.into()),
        }
    }

    /// Resolver reading the current user's iTerm2 preferences, or `path`
    /// when given.
    pub fn locate(path: Option<PathBuf>) -> Self {
        let preferences_path = match path {
            Some(p) => Some(p),
            None => match preferences::default_preferences_path() {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!(error = %e, "Cannot locate iTerm2 preferences");
                    None
                }
            },
        };
        Self { preferences_path }
    }

    pub fn preferences_path(&self) -> Option<&Path> {
        self.preferences_path.as_deref()
    }

    /// Look up the default profile. Never fails; errors are folded into
    /// `ProfileResolution::Unavailable`.
    pub fn resolve(&self) -> ProfileResolution {
        match self.load().and_then(|store| profile::resolve_default_profile(&store)) {
            Ok(resolution) => resolution,
            Err(e) => {
                tracing::debug!(error = %e, "Default profile unresolved");
                ProfileResolution::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Display name of the default profile, `"Default"` when it cannot be
    /// resolved. Logs the GUID (WARN when absent) and the final name.
    pub fn default_profile_name(&self, log: &dyn EventLog) -> String {
        let resolution = self.resolve();

        match resolution.guid() {
            Some(guid) => log.debug(&format!("Default profile GUID: {guid}")),
            None => log.warn(&format!("Default profile GUID: {MISSING_GUID_LABEL}")),
        };

        let name = resolution.name().to_string();
        log.debug(&format!("Default profile name: {name}"));
        name
    }

    /// Every well-formed profile in the store.
    pub fn list_profiles(&self) -> Result<Vec<ProfileRecord>, PreferenceError> {
        let store = self.load()?;
        profile::list_profiles(&store)
    }

    fn load(&self) -> Result<plist::Value, PreferenceError> {
        let path = self
            .preferences_path
            .as_deref()
            .ok_or(PreferenceError::HomeNotFound)?;
        preferences::load_store(path)
    }
}
