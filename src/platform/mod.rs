// iTermKit - platform/mod.rs
//
// Platform layer: directories, config.toml, the iTerm2 preference file and
// the osascript scripting bridge.
// Must NOT depend on: app.

pub mod config;
pub mod osascript;
pub mod preferences;
