//! Subprocess execution.
//!
//! Commands are invoked directly (program + argument vector), never through a
//! shell: every invocation this tool makes is a fixed package-manager or
//! interpreter command line, and paths in arguments must not be re-tokenized.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timeout).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<std::path::PathBuf>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,

    /// Timeout (None = unbounded blocking call).
    pub timeout: Option<Duration>,
}

impl CommandOptions {
    /// Options that capture both output streams.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }

    /// Captured output with a timeout.
    pub fn captured_with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::captured()
        }
    }
}

/// Execute a command.
///
/// Spawn failures (program missing, permission denied) surface as the
/// underlying `io::Error` so callers can distinguish "not installed" from
/// "ran and failed". A command that runs and exits nonzero is an `Ok`
/// result with `success == false`.
pub fn execute(program: &str, args: &[&str], options: &CommandOptions) -> std::io::Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    cmd.stdin(Stdio::null());
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

    let child = cmd.spawn()?;

    let (status, stdout, stderr) = match options.timeout {
        Some(timeout) => wait_with_deadline(child, start + timeout)?,
        None => wait_unbounded(child)?,
    };

    let duration = start.elapsed();

    match status {
        Some(s) if s.success() => Ok(CommandResult::success(stdout, stderr, duration)),
        Some(s) => Ok(CommandResult::failure(s.code(), stdout, stderr, duration)),
        // Killed on timeout: no exit status to report.
        None => Ok(CommandResult::failure(None, stdout, stderr, duration)),
    }
}

/// Execute a command, capturing output, and report only success/failure.
pub fn execute_check(program: &str, args: &[&str], cwd: Option<&Path>) -> bool {
    let options = CommandOptions {
        cwd: cwd.map(|p| p.to_path_buf()),
        ..CommandOptions::captured()
    };

    execute(program, args, &options)
        .map(|r| r.success)
        .unwrap_or(false)
}

type WaitOutcome = (Option<std::process::ExitStatus>, String, String);

/// Collect a piped stream on a background thread.
///
/// Readers run off-thread so a chatty child cannot fill the pipe buffer and
/// deadlock against a parent that is only polling `try_wait`.
fn drain(stream: Option<impl Read + Send + 'static>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut s) = stream {
            let _ = s.read_to_string(&mut buf);
        }
        buf
    })
}

fn wait_unbounded(mut child: Child) -> std::io::Result<WaitOutcome> {
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());
    let status = child.wait()?;
    Ok((
        Some(status),
        stdout.join().unwrap_or_default(),
        stderr.join().unwrap_or_default(),
    ))
}

fn wait_with_deadline(mut child: Child, deadline: Instant) -> std::io::Result<WaitOutcome> {
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break Some(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            break None;
        }
        thread::sleep(Duration::from_millis(50));
    };

    Ok((
        status,
        stdout.join().unwrap_or_default(),
        stderr.join().unwrap_or_default(),
    ))
}
