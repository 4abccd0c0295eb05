//! External packaging tool invocation.
//!
//! The decode/encode, alignment, and signing steps are delegated to external
//! binaries (`apktool`, `zipalign`, `apksigner`). Every invocation blocks
//! until the child exits and its exit status is checked: a non-zero exit is a
//! terminal [`CliError::ToolFailure`] carrying the captured stderr. There is
//! no timeout; a hung tool hangs the pipeline.

use std::path::PathBuf;
use std::process::{Command, Output};

use crate::errors::CliError;

/// Locations of the Android build tools used by the pipeline.
#[derive(Debug, Clone)]
pub struct BuildTools {
    dir: PathBuf,
}

impl BuildTools {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn zipalign(&self) -> PathBuf {
        self.dir.join("zipalign")
    }

    pub fn apksigner(&self) -> PathBuf {
        self.dir.join("apksigner")
    }
}

/// Run an external tool to completion.
///
/// stdout/stderr are captured; a failing tool's stderr is included in the
/// returned diagnostic. `tool` is the human-readable name used in diagnostics.
pub fn run(tool: &str, command: &mut Command) -> Result<(), CliError> {
    let output = command
        .output()
        .map_err(|source| CliError::tool_not_found(tool, source))?;

    check(tool, output)
}

fn check(tool: &str, output: Output) -> Result<(), CliError> {
    if output.status.success() {
        return Ok(());
    }

    Err(CliError::tool_failure(
        tool,
        output.status,
        String::from_utf8_lossy(&output.stderr).trim_end(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_tools_paths() {
        let tools = BuildTools::new("/opt/android/build-tools/34.0.0");
        assert_eq!(
            tools.zipalign(),
            PathBuf::from("/opt/android/build-tools/34.0.0/zipalign")
        );
        assert_eq!(
            tools.apksigner(),
            PathBuf::from("/opt/android/build-tools/34.0.0/apksigner")
        );
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let result = run(
            "no-such-tool",
            &mut Command::new("shellpack-no-such-tool-on-path"),
        );

        assert!(matches!(result, Err(CliError::ToolNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn successful_tool_run_is_ok() {
        assert!(run("sh", Command::new("sh").args(["-c", "exit 0"])).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_carries_status_and_stderr() {
        let result = run("sh", Command::new("sh").args(["-c", "echo boom >&2; exit 3"]));

        match result {
            Err(CliError::ToolFailure {
                tool,
                status,
                stderr,
            }) => {
                assert_eq!(tool, "sh");
                assert!(status.contains('3'));
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected ToolFailure, got {:?}", other),
        }
    }
}
