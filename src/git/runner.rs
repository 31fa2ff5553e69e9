//! Synchronous subprocess execution.
//!
//! Commands run to completion with stdout and stderr captured. There is no
//! timeout: a hung child blocks the caller until it exits.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Stdout and stderr joined, skipping whichever is empty.
    pub fn combined(&self) -> String {
        [self.stdout.trim_end(), self.stderr.trim_end()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Trait for running external commands.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run `program` with `args` and wait for it to exit.
    ///
    /// Only a failure to start the process is an error; a non-zero exit is
    /// reported through [`CommandOutput::status`].
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, GitError>;
}

/// Runner backed by `std::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    cwd: Option<PathBuf>,
}

impl SystemRunner {
    /// Runner that inherits the current working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner whose commands execute in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            cwd: Some(dir.to_path_buf()),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, GitError> {
        let command_line = format_command(program, args);
        debug!("Running {}", command_line);

        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|source| GitError::SpawnFailed {
            command: command_line,
            source,
        })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Render a command line for logs and error messages.
pub fn format_command(program: &str, args: &[String]) -> String {
    std::iter::once(program.to_string())
        .chain(args.iter().map(|arg| {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                format!("\"{}\"", arg)
            } else {
                arg.clone()
            }
        }))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_command_quotes_spaces() {
        assert_eq!(
            format_command("git", &args(&["commit", "-m", "release v1.0.0"])),
            "git commit -m \"release v1.0.0\""
        );
    }

    #[test]
    fn test_combined_output() {
        let output = CommandOutput {
            status: Some(1),
            stdout: "on branch main\n".into(),
            stderr: "nothing to commit\n".into(),
        };
        assert_eq!(output.combined(), "on branch main\nnothing to commit");
        assert!(!output.success());

        let quiet = CommandOutput {
            status: Some(0),
            stdout: String::new(),
            stderr: "warning\n".into(),
        };
        assert_eq!(quiet.combined(), "warning");
        assert!(quiet.success());
    }

    #[test]
    fn test_signal_is_not_success() {
        let output = CommandOutput {
            status: None,
            ..Default::default()
        };
        assert!(!output.success());
    }

    #[test]
    fn test_system_runner_git_version_succeeds() {
        // git --version should always succeed
        let output = SystemRunner::new().run("git", &args(&["--version"])).unwrap();
        assert!(output.success());
        assert!(output.stdout.starts_with("git version"));
    }

    #[test]
    fn test_system_runner_invalid_command_fails() {
        let output = SystemRunner::new()
            .run("git", &args(&["not-a-real-command"]))
            .unwrap();
        assert!(!output.success());
        assert!(!output.combined().is_empty());
    }

    #[test]
    fn test_system_runner_spawn_failure() {
        let result = SystemRunner::new().run("definitely-not-a-real-binary-xyz", &[]);
        assert!(matches!(result, Err(GitError::SpawnFailed { .. })));
    }

    #[test]
    fn test_system_runner_uses_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = SystemRunner::in_dir(dir.path())
            .run("git", &args(&["rev-parse", "--is-inside-work-tree"]))
            .unwrap();
        // A fresh temp dir is not a repository.
        assert!(!output.success());
    }
}
