// iTermKit - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and diagnostic logging initialisation
// 3. Event log construction (explicit log directory)
// 4. Profile queries and the hotkey dispatch

use clap::Parser;
use itermkit::app::dispatch::{self, Overrides, Settings};
use itermkit::app::hotkey::HotkeyWindowController;
use itermkit::app::log_service::{EventLog, FileLogger};
use itermkit::app::profile_resolver::ProfileResolver;
use itermkit::platform::config::{self, PlatformPaths};
use itermkit::platform::osascript::OsaScriptRunner;
use itermkit::util;
use itermkit::util::error::{ItermKitError, Result};
use std::path::PathBuf;

/// Exit code for a failed scripting bridge call or unreadable preferences.
const EXIT_FAILURE: i32 = 1;

/// Exit code for invalid command-line settings.
const EXIT_USAGE: i32 = 2;

/// iTermKit - iTerm2 automation helpers.
///
/// Reveals the iTerm2 hotkey window and reports the default profile.
/// Every action is recorded in an append-only event log.
#[derive(Parser, Debug)]
#[command(name = "itermkit", version, about)]
struct Cli {
    /// Bring iTerm2 to the front and reveal its hotkey window.
    #[arg(long)]
    hotkey: bool,

    /// Print the name of the default profile.
    #[arg(long = "default-profile")]
    default_profile: bool,

    /// Print every profile as `GUID<TAB>NAME`, marking the default with `*`.
    #[arg(long = "list-profiles")]
    list_profiles: bool,

    /// Directory receiving the event log (must exist).
    #[arg(long = "log-dir")]
    log_dir: Option<PathBuf>,

    /// iTerm2 preference file to read instead of the standard location.
    #[arg(long = "prefs")]
    prefs: Option<PathBuf>,

    /// Upper bound on the AppleScript call, in seconds.
    #[arg(long = "timeout-secs")]
    timeout_secs: Option<u64>,

    /// Enable debug diagnostics (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let (app_config, config_warnings) = config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        hotkey = cli.hotkey,
        "iTermKit starting"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    let overrides = Overrides {
        log_dir: cli.log_dir.clone(),
        timeout_secs: cli.timeout_secs,
        preferences_path: cli.prefs.clone(),
    };
    let settings = match Settings::resolve(&overrides, &app_config, &platform_paths) {
        Ok(s) => s,
        Err(e) => exit_with(None, e.into()),
    };

    if let Err(e) = settings.prepare_log_dir() {
        tracing::warn!(error = %e, "Event log directory unavailable");
    }
    let logger = settings.build_logger();

    if let Err(e) = run(&cli, &settings, &logger) {
        exit_with(Some(&logger), e);
    }
}

fn run(cli: &Cli, settings: &Settings, logger: &FileLogger) -> Result<()> {
    if cli.list_profiles || cli.default_profile {
        let resolver = ProfileResolver::locate(settings.preferences_path.clone());
        if cli.list_profiles {
            print_profiles(&resolver, logger)?;
        }
        if cli.default_profile {
            println!("{}", resolver.default_profile_name(logger));
        }
    }

    let controller =
        HotkeyWindowController::new(OsaScriptRunner::new(settings.automation_timeout));
    dispatch::dispatch(cli.hotkey, logger, &controller)?;
    Ok(())
}

/// Report a fatal error on every channel and exit. Invalid settings exit
/// with `EXIT_USAGE`, everything else with `EXIT_FAILURE`.
fn exit_with(logger: Option<&FileLogger>, e: ItermKitError) -> ! {
    if let Some(logger) = logger {
        logger.error(&e.to_string());
    }
    tracing::error!(error = %e, "iTermKit failed");
    eprintln!("Error: {e}");
    let code = match e {
        ItermKitError::Config(_) => EXIT_USAGE,
        _ => EXIT_FAILURE,
    };
    std::process::exit(code);
}

fn print_profiles(resolver: &ProfileResolver, logger: &FileLogger) -> Result<()> {
    let profiles = resolver.list_profiles()?;

    let resolution = resolver.resolve();
    let default_guid = resolution.guid();
    for profile in &profiles {
        let marker = if Some(profile.guid.as_str()) == default_guid {
            "*"
        } else {
            " "
        };
        println!("{marker} {}\t{}", profile.guid, profile.name);
    }
    logger.debug(&format!("Listed {} profiles", profiles.len()));
    Ok(())
}
