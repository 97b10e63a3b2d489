//! Process execution.
//!
//! Programs are spawned directly (no intermediate shell) so arguments reach
//! the child exactly as given.

use crate::error::Result;
use std::ffi::OsStr;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Interval between exit polls while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timed out).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,

    /// Whether the command was killed after exceeding its timeout.
    pub timed_out: bool,
}

impl CommandResult {
    fn from_status(
        status: Option<ExitStatus>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code: status.and_then(|s| s.code()),
            success: status.is_some_and(|s| s.success()),
            timed_out: status.is_none(),
            stdout,
            stderr,
            duration,
        }
    }

    /// Captured stdout and stderr joined, in that order.
    pub fn combined_output(&self) -> String {
        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }
        out
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,

    /// Timeout in seconds (None = no timeout). On unix the child gets its
    /// own process group and the whole group is killed on expiry.
    pub timeout: Option<u64>,
}

impl CommandOptions {
    /// Options for a short query whose output is parsed.
    pub fn captured(timeout: Option<u64>) -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
            timeout,
            ..Default::default()
        }
    }
}

/// Execute `program` with `args`.
///
/// Returns `Err` only when the process cannot be spawned or waited on; a
/// non-zero exit or a timeout is reported through [`CommandResult`].
pub fn execute<S: AsRef<OsStr>>(
    program: impl AsRef<OsStr>,
    args: &[S],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program.as_ref());
    cmd.args(args);
    cmd.stdin(Stdio::inherit());

    // Anything the child forks would otherwise outlive the kill and hold the
    // output pipes open. Only timed commands leave the terminal's group.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        if options.timeout.is_some() {
            cmd.process_group(0);
        }
    }

    cmd.stdout(if options.capture_stdout {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });
    cmd.stderr(if options.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });

    tracing::debug!(
        "Spawning {} with {} argument(s)",
        program.as_ref().to_string_lossy(),
        args.len()
    );
    let mut child = cmd.spawn()?;

    // Drain pipes on their own threads so a chatty child never blocks on a
    // full pipe while we poll for exit.
    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);

    let status = match options.timeout {
        Some(secs) => wait_with_timeout(&mut child, Duration::from_secs(secs))?,
        None => Some(child.wait()?),
    };

    let stdout = join_reader(stdout_reader);
    let stderr = join_reader(stderr_reader);
    let duration = start.elapsed();

    if status.is_none() {
        tracing::warn!(
            "{} did not finish within {:?}; killed",
            program.as_ref().to_string_lossy(),
            duration
        );
    }

    Ok(CommandResult::from_status(status, stdout, stderr, duration))
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Wait for `child`, killing it once `limit` elapses. `None` means it was killed.
fn wait_with_timeout(child: &mut Child, limit: Duration) -> Result<Option<ExitStatus>> {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            kill_group(child);
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Kill `child` and every process in its group.
fn kill_group(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
            // SAFETY: killpg only sends a signal. The group was created for
            // this child by `process_group(0)`, so its id is the child's pid.
            unsafe {
                libc::killpg(pgid, libc::SIGKILL);
            }
        }
    }
    let _ = child.kill();
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str, options: &CommandOptions) -> CommandResult {
        execute("/bin/sh", &["-c", script], options).unwrap()
    }

    #[test]
    fn execute_successful_command() {
        let result = sh("echo hello", &CommandOptions::captured(None));

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
        assert!(!result.timed_out);
    }

    #[test]
    fn execute_failing_command() {
        let result = sh("exit 3", &CommandOptions::captured(None));

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn execute_captures_stderr() {
        let result = sh("echo oops >&2", &CommandOptions::captured(None));

        assert!(result.stdout.is_empty());
        assert!(result.stderr.contains("oops"));
        assert_eq!(result.combined_output(), "oops\n");
    }

    #[test]
    fn execute_passes_arguments_verbatim() {
        let result = execute(
            "/bin/sh",
            &["-c", "printf '%s|' \"$@\"", "sh", "--verbose", "two words", ""],
            &CommandOptions::captured(None),
        )
        .unwrap();

        assert_eq!(result.stdout, "--verbose|two words||");
    }

    #[test]
    fn execute_kills_on_timeout() {
        let result = sh("exec sleep 5", &CommandOptions::captured(Some(0)));

        assert!(result.timed_out);
        assert!(!result.success);
        assert_eq!(result.exit_code, None);
        assert!(result.duration < Duration::from_secs(5));
    }

    #[test]
    fn execute_timeout_kills_forked_children() {
        // The sleep is a grandchild that shares the output pipes.
        let result = sh("sleep 5; echo late", &CommandOptions::captured(Some(1)));

        assert!(result.timed_out);
        assert!(!result.stdout.contains("late"));
        assert!(result.duration < Duration::from_secs(3));
    }

    #[test]
    fn execute_within_timeout_succeeds() {
        let result = sh("echo quick", &CommandOptions::captured(Some(10)));

        assert!(result.success);
        assert!(!result.timed_out);
    }

    #[test]
    fn execute_missing_program_is_error() {
        let result = execute(
            "/definitely/not/a/real/program",
            &[] as &[&str],
            &CommandOptions::captured(None),
        );

        assert!(result.is_err());
    }
}
