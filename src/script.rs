//! Script execution with a wall-clock deadline.
//!
//! A script runs as a child process with the parent's environment plus the
//! request variables below. Both output streams are drained on helper threads
//! into memory while the caller waits on the child, so a chatty script cannot
//! block on a full pipe. On unix the script leads its own process group; when
//! the deadline expires the whole group is killed and the child is reaped.

use crate::error::ServeError;
use crate::resolver::METHOD_GET;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Deadline applied when none is configured.
pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything observed about one finished (or killed) script run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessExecutionResult {
    /// Exit status, or `-1` when the process was ended by a signal.
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// The deadline expired and the child was killed. Output is always empty
    /// in that case.
    pub timed_out: bool,
}

impl ProcessExecutionResult {
    fn timed_out() -> Self {
        Self {
            exit_code: -1,
            stdout: Vec::new(),
            stderr: Vec::new(),
            timed_out: true,
        }
    }
}

type PipeReader = Receiver<io::Result<Vec<u8>>>;

/// Runs scripts on behalf of the case chain.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    interpreter: Option<PathBuf>,
    working_dir: PathBuf,
    timeout: Duration,
}

impl ScriptRunner {
    /// `interpreter` is invoked with the script path as its only argument;
    /// with `None` the script itself is executed.
    pub fn new(interpreter: Option<PathBuf>, working_dir: PathBuf, timeout: Duration) -> Self {
        Self {
            interpreter,
            working_dir,
            timeout,
        }
    }

    /// Run a script and insist that it succeeded.
    ///
    /// # Errors
    ///
    /// - [`ServeError::ScriptLaunchFailure`] if the process cannot be spawned
    /// - [`ServeError::ScriptTimeout`] if it outlives the deadline
    /// - [`ServeError::ScriptExecutionFailure`] if it exits non-zero; the
    ///   message is the captured stderr and stdout is discarded
    pub fn execute(
        &self,
        script_path: &Path,
        request_path: &str,
        server_name: &str,
        server_port: u16,
    ) -> Result<ProcessExecutionResult, ServeError> {
        let result = self.run(script_path, request_path, server_name, server_port)?;
        if result.timed_out {
            return Err(ServeError::ScriptTimeout {
                timeout: self.timeout,
            });
        }
        if result.exit_code != 0 {
            return Err(ServeError::ScriptExecutionFailure {
                exit_code: result.exit_code,
                stderr: String::from_utf8_lossy(&result.stderr).trim_end().to_string(),
            });
        }
        Ok(result)
    }

    /// Run a script and report what happened, whatever the exit status.
    ///
    /// The deadline runs from spawn until both output streams are closed, so
    /// a background process still holding the pipes counts against it.
    pub fn run(
        &self,
        script_path: &Path,
        request_path: &str,
        server_name: &str,
        server_port: u16,
    ) -> Result<ProcessExecutionResult, ServeError> {
        let mut command = match &self.interpreter {
            Some(interpreter) => {
                let mut command = Command::new(interpreter);
                command.arg(script_path);
                command
            }
            None => Command::new(script_path),
        };
        command
            .current_dir(&self.working_dir)
            .env("REQUEST_METHOD", METHOD_GET)
            .env("PATH_INFO", request_path)
            .env("SERVER_NAME", server_name)
            .env("SERVER_PORT", server_port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // Own process group, so a timeout can take down anything the script
        // started as well.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = command
            .spawn()
            .map_err(|source| ServeError::ScriptLaunchFailure { source })?;
        let deadline = Instant::now() + self.timeout;
        let pid = child.id();
        debug!(script = %script_path.display(), pid, "script started");

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                self.log_expired(script_path);
                terminate(&mut child);
                return Ok(ProcessExecutionResult::timed_out());
            }
            Err(source) => {
                terminate(&mut child);
                return Err(ServeError::ScriptLaunchFailure { source });
            }
        };

        let launch_failure = |source| ServeError::ScriptLaunchFailure { source };
        let (Some(stdout), Some(stderr)) = (
            collect(stdout, deadline).map_err(launch_failure)?,
            collect(stderr, deadline).map_err(launch_failure)?,
        ) else {
            // The script itself exited but something it started still holds
            // the pipes open.
            self.log_expired(script_path);
            kill_process_group(pid);
            return Ok(ProcessExecutionResult::timed_out());
        };

        let exit_code = status.code().unwrap_or(-1);
        debug!(
            script = %script_path.display(),
            exit_code,
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            "script finished"
        );
        Ok(ProcessExecutionResult {
            exit_code,
            stdout,
            stderr,
            timed_out: false,
        })
    }

    fn log_expired(&self, script_path: &Path) {
        warn!(
            script = %script_path.display(),
            timeout_secs = self.timeout.as_secs_f64(),
            "script deadline expired, killing it"
        );
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<PipeReader> {
    pipe.map(|mut pipe| {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            let result = pipe.read_to_end(&mut buf).map(|_| buf);
            // Nobody is listening any more once the deadline has passed.
            tx.send(result).ok();
        });
        rx
    })
}

/// Wait for a reader until `deadline`. `Ok(None)` means the deadline passed
/// with the pipe still open.
fn collect(reader: Option<PipeReader>, deadline: Instant) -> io::Result<Option<Vec<u8>>> {
    let Some(reader) = reader else {
        return Ok(Some(Vec::new()));
    };
    match reader.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(result) => result.map(Some),
        Err(RecvTimeoutError::Timeout) => Ok(None),
        Err(RecvTimeoutError::Disconnected) => {
            Err(io::Error::other("script output reader panicked"))
        }
    }
}

/// Kill the child and everything in its process group, then reap the child
/// so no zombie is left behind.
fn terminate(child: &mut Child) {
    kill_process_group(child.id());
    if let Err(e) = child.kill() {
        warn!(pid = child.id(), error = %e, "failed to kill script");
    }
    if let Err(e) = child.wait() {
        warn!(pid = child.id(), error = %e, "failed to reap script");
    }
}

#[cfg(unix)]
fn kill_process_group(pgid: u32) {
    let Ok(pgid) = libc::pid_t::try_from(pgid) else {
        return;
    };
    // SAFETY: killpg only delivers a signal. The group id is the script's
    // pid, made a group leader by `process_group(0)` at spawn.
    let rc = unsafe { libc::killpg(pgid, libc::SIGKILL) };
    if rc != 0 {
        debug!(pgid, error = %io::Error::last_os_error(), "process group already gone");
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pgid: u32) {}
