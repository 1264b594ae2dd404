// iTermKit - core/profile.rs
//
// Default profile correlation over an already-decoded preference store.
//
// The store is a loosely-typed plist tree. Two records are cross-referenced:
//   - "Default Bookmark Guid": scalar GUID of the default profile
//   - "New Bookmarks": array of profile dictionaries with "Guid" and "Name"
//
// Malformed profile entries (not a dictionary, no string "Guid") are skipped
// so one bad entry never hides a valid match further down the list.
// No I/O here; loading lives in platform::preferences.

use crate::core::model::{ProfileRecord, ProfileResolution};
use crate::util::constants::{KEY_BOOKMARKS, KEY_DEFAULT_GUID, KEY_GUID, KEY_NAME};
use crate::util::error::PreferenceError;
use plist::{Dictionary, Value};

/// Resolve the default profile from a decoded preference store.
///
/// Errors are returned for structural problems (root not a dictionary,
/// wrongly typed top-level keys, matched profile without a name); callers
/// that need a name regardless should go through
/// `app::profile_resolver`, which folds errors into
/// `ProfileResolution::Unavailable`.
pub fn resolve_default_profile(store: &Value) -> Result<ProfileResolution, PreferenceError> {
    let root = root_dictionary(store)?;

    let Some(default_guid) = default_guid(root)? else {
        return Ok(ProfileResolution::GuidMissing);
    };

    let matched = bookmarks(root)?
        .iter()
        .filter_map(Value::as_dictionary)
        .find(|entry| string_field(entry, KEY_GUID) == Some(default_guid));

    let Some(entry) = matched else {
        tracing::debug!(guid = default_guid, "Default GUID matches no profile");
        return Ok(ProfileResolution::Unmatched {
            guid: default_guid.to_string(),
        });
    };

    match string_field(entry, KEY_NAME) {
        Some(name) if !name.is_empty() => Ok(ProfileResolution::Resolved {
            guid: default_guid.to_string(),
            name: name.to_string(),
        }),
        _ => Err(PreferenceError::MissingName {
            guid: default_guid.to_string(),
        }),
    }
}

/// Every well-formed profile in store order.
///
/// Entries without a string GUID or a string name are skipped.
pub fn list_profiles(store: &Value) -> Result<Vec<ProfileRecord>, PreferenceError> {
    let root = root_dictionary(store)?;
    let entries = bookmarks(root)?;

    let profiles: Vec<ProfileRecord> = entries
        .iter()
        .filter_map(Value::as_dictionary)
        .filter_map(|entry| {
            let guid = string_field(entry, KEY_GUID)?;
            let name = string_field(entry, KEY_NAME)?;
            Some(ProfileRecord {
                guid: guid.to_string(),
                name: name.to_string(),
            })
        })
        .collect();

    if profiles.len() < entries.len() {
        tracing::debug!(
            skipped = entries.len() - profiles.len(),
            "Skipped malformed profile entries"
        );
    }

    Ok(profiles)
}

fn root_dictionary(store: &Value) -> Result<&Dictionary, PreferenceError> {
    store.as_dictionary().ok_or(PreferenceError::WrongType {
        key: "<root>",
        expected: "a dictionary",
    })
}

fn default_guid(root: &Dictionary) -> Result<Option<&str>, PreferenceError> {
    match root.get(KEY_DEFAULT_GUID) {
        None => Ok(None),
        Some(value) => value
            .as_string()
            .map(Some)
            .ok_or(PreferenceError::WrongType {
                key: KEY_DEFAULT_GUID,
                expected: "a string",
            }),
    }
}

/// The profile list; an absent key is an empty list.
fn bookmarks(root: &Dictionary) -> Result<&[Value], PreferenceError> {
    match root.get(KEY_BOOKMARKS) {
        None => Ok(&[]),
        Some(value) => value
            .as_array()
            .map(Vec::as_slice)
            .ok_or(PreferenceError::WrongType {
                key: KEY_BOOKMARKS,
                expected: "an array",
            }),
    }
}

fn string_field<'a>(entry: &'a Dictionary, key: &str) -> Option<&'a str> {
    entry.get(key).and_then(Value::as_string)
}
