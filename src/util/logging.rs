// iTermKit - util/logging.rs
//
// Diagnostic logging (tracing) with runtime-selectable debug mode.
// This is the console channel; the append-only event log lives in
// app::log_service and is written independently of this subscriber.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug
//   - Config file: [logging] level = "debug"
//
// Output: stderr, so stdout stays clean for --default-profile/--list-profiles.

use tracing_subscriber::EnvFilter;

/// Initialise the diagnostic logging subsystem.
///
/// Priority: RUST_LOG env var > CLI --debug flag > config level > default "info".
/// Safe to call more than once; later calls are ignored.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else if let Some(level) = config_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL)
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            app = super::constants::APP_NAME,
            version = super::constants::APP_VERSION,
            "Logging initialised"
        );
    }
}
