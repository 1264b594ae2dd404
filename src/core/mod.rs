// iTermKit - core/mod.rs
//
// Core logic layer: data model and preference correlation.
// Must NOT depend on: app, platform, or perform any I/O.

pub mod model;
pub mod profile;
