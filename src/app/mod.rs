// iTermKit - app/mod.rs
//
// Application layer: event log, profile resolution, hotkey window control,
// settings and dispatch.
// Dependencies: core, platform.

pub mod dispatch;
pub mod hotkey;
pub mod log_service;
pub mod profile_resolver;
