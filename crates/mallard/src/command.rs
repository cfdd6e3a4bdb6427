//! Synchronous invocation of the companion program.

use std::io;
use std::path::Path;
use std::process::Command;

/// Captured result of one companion-program invocation.
///
/// A non-zero exit is data for the model to interpret, not an error; only a
/// process that cannot be started surfaces as `io::Error`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Stdout followed by stderr, the shape handed back to the model.
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Run the program with the given arguments in the current working directory,
/// blocking until it exits, capturing both output channels as lossy UTF-8.
pub fn run_command(program: &Path, args: &[String]) -> io::Result<CommandOutput> {
    tracing::debug!(program = %program.display(), ?args, "invoking companion program");

    let output = Command::new(program).args(args).current_dir(".").output()?;

    let result = CommandOutput {
        status: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    };
    tracing::debug!(status = ?result.status, "companion program finished");
    Ok(result)
}
