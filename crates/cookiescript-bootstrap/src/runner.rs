//! Blocking subprocess execution
//!
//! Every external tool the bootstrap sequence invokes goes through the
//! [`CommandRunner`] trait so the sequence can be driven by a scripted runner
//! in tests.

use std::process::Command;

use camino::Utf8Path;
use tracing::{debug, trace};

/// Captured result of a finished subprocess
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    /// Whether the process exited successfully
    pub success: bool,
    /// Captured stdout (lossy UTF-8)
    pub stdout: String,
    /// Captured stderr (lossy UTF-8)
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given stderr and exit code
    pub fn failed(stderr: impl Into<String>, code: i32) -> Self {
        Self {
            code: Some(code),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Stdout if non-empty, stderr otherwise
    pub fn text(&self) -> &str {
        if self.stdout.trim().is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }

    /// Last `lines` lines of stderr, for error reports
    pub fn stderr_tail(&self, lines: usize) -> String {
        let all: Vec<&str> = self.stderr.trim_end().lines().collect();
        let start = all.len().saturating_sub(lines);
        all[start..].join("\n")
    }
}

/// Runs external commands synchronously
pub trait CommandRunner {
    /// Whether `program` can be found on PATH
    fn is_available(&self, program: &str) -> bool;

    /// Run `program` with `args`, blocking until it exits.
    ///
    /// An `Err` means the process could not be spawned; a process that ran
    /// and failed is reported through [`CommandOutput::success`].
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Utf8Path>,
    ) -> std::io::Result<CommandOutput>;
}

/// [`CommandRunner`] backed by real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Utf8Path>,
    ) -> std::io::Result<CommandOutput> {
        // Resolve through PATH first so `npm.cmd` style shims work on Windows
        let executable = which::which(program).unwrap_or_else(|_| program.into());

        debug!("Running: {} {}", program, args.join(" "));

        let mut cmd = Command::new(executable);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output()?;
        let result = CommandOutput {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        trace!(
            "{} exited with {:?} ({} bytes stdout, {} bytes stderr)",
            program,
            result.code,
            result.stdout.len(),
            result.stderr.len()
        );

        Ok(result)
    }
}
