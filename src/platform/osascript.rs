// iTermKit - platform/osascript.rs
//
// The scripting bridge: runs AppleScript through `osascript`.
//
// Calls into the target application block until it answers, so every call
// is bounded:
//   - the child is polled every AUTOMATION_POLL_INTERVAL_MS
//   - once the timeout elapses the child is killed and reaped
//   - an `Arc<AtomicBool>` cancel flag stops the wait early from another
//     thread (e.g. a signal handler)
//   - stdout and stderr are drained on reader threads while the child runs,
//     so output larger than the pipe buffer never stalls it

use crate::util::constants::{
    AUTOMATION_POLL_INTERVAL_MS, MAX_SCRIPT_STDERR_BYTES, OSASCRIPT_PROGRAM, OSASCRIPT_SCRIPT_FLAG,
};
use crate::util::error::AutomationError;
use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Executes a script and returns its trimmed standard output.
pub trait ScriptRunner {
    fn run(&self, script: &str) -> Result<String, AutomationError>;
}

/// `ScriptRunner` backed by a child process (`osascript -e <script>`).
#[derive(Debug, Clone)]
pub struct OsaScriptRunner {
    program: String,
    script_flag: String,
    timeout: Duration,
    cancel: Arc<AtomicBool>,
}

impl OsaScriptRunner {
    /// Runner using the system `osascript`.
    pub fn new(timeout: Duration) -> Self {
        Self::with_program(OSASCRIPT_PROGRAM, OSASCRIPT_SCRIPT_FLAG, timeout)
    }

    /// Runner using another script host that takes the script text after
    /// `script_flag` (e.g. `sh -c`).
    pub fn with_program(
        program: impl Into<String>,
        script_flag: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            script_flag: script_flag.into(),
            timeout,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Shared flag; storing `true` aborts the call currently in flight and
    /// every later call.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    fn timed_out(&self) -> AutomationError {
        tracing::warn!(
            program = %self.program,
            timeout_ms = self.timeout.as_millis() as u64,
            "Script timed out"
        );
        AutomationError::TimedOut {
            timeout_ms: self.timeout.as_millis(),
        }
    }
}

impl ScriptRunner for OsaScriptRunner {
    fn run(&self, script: &str) -> Result<String, AutomationError> {
        let mut child = Command::new(&self.program)
            .arg(&self.script_flag)
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| AutomationError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let (tx, rx) = mpsc::channel();
        drain(child.stdout.take(), Stream::Stdout, tx.clone());
        drain(child.stderr.take(), Stream::Stderr, tx);

        let deadline = Instant::now() + self.timeout;
        let poll = Duration::from_millis(AUTOMATION_POLL_INTERVAL_MS);

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(source) => {
                    terminate(&mut child);
                    return Err(AutomationError::Io { source });
                }
            }

            if self.cancel.load(Ordering::SeqCst) {
                terminate(&mut child);
                tracing::info!(program = %self.program, "Script cancelled");
                return Err(AutomationError::Cancelled);
            }

            let now = Instant::now();
            if now >= deadline {
                terminate(&mut child);
                return Err(self.timed_out());
            }

            std::thread::sleep(poll.min(deadline - now));
        };

        // A background grandchild can hold a pipe open after the script host
        // exits, so the readers are still bounded by the deadline.
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        for _ in 0..2 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok((Stream::Stdout, read)) => {
                    stdout = read.map_err(|source| AutomationError::Io { source })?;
                }
                Ok((Stream::Stderr, read)) => {
                    stderr = read.map_err(|source| AutomationError::Io { source })?;
                }
                Err(RecvTimeoutError::Timeout) => return Err(self.timed_out()),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(AutomationError::Failed {
                status,
                stderr: truncate_utf8(stderr.trim(), MAX_SCRIPT_STDERR_BYTES).to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&stdout).trim_end().to_string())
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Read a child pipe to EOF on its own thread and send the bytes back.
fn drain<R>(pipe: Option<R>, stream: Stream, tx: Sender<(Stream, io::Result<Vec<u8>>)>)
where
    R: Read + Send + 'static,
{
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let read = match pipe {
            Some(mut pipe) => pipe.read_to_end(&mut buf).map(|_| buf),
            None => Ok(buf),
        };
        // The receiver is gone once the call timed out or was cancelled.
        let _ = tx.send((stream, read));
    });
}

/// Kill and reap; errors mean the child already exited.
fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
