// iTermKit - app/hotkey.rs
//
// Surfaces iTerm2's hotkey window. iTerm2 is activated first; activating an
// already-frontmost app is a no-op. Bridge failures are returned, not
// logged here; the dispatcher decides what to do with them.

use crate::app::log_service::EventLog;
use crate::platform::osascript::ScriptRunner;
use crate::util::constants::ITERM_APP_NAME;
use crate::util::error::AutomationError;

/// AppleScript that activates iTerm2 and reveals the hotkey window of its
/// current window.
pub fn reveal_script() -> String {
    format!(
        "tell application \"{ITERM_APP_NAME}\"\n\
         \tactivate\n\
         \ttell current window\n\
         \t\treveal hotkey window\n\
         \tend tell\n\
         end tell"
    )
}

/// Issues the reveal command through a scripting bridge.
pub struct HotkeyWindowController<R: ScriptRunner> {
    runner: R,
}

impl<R: ScriptRunner> HotkeyWindowController<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Bring iTerm2 forward and reveal its hotkey window.
    pub fn reveal_hotkey_window(&self, log: &dyn EventLog) -> Result<(), AutomationError> {
        log.debug("Revealing hotkey window");
        self.runner.run(&reveal_script())?;
        log.debug("Hotkey window revealed");
        Ok(())
    }
}
