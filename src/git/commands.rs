//! The release commands: commit, tag and push.

use std::path::PathBuf;

use semver::Version;
use tracing::info;

use crate::error::GitError;

use super::runner::{CommandOutput, CommandRunner, format_command};

/// Commit message for a release of `version`.
pub fn commit_message(version: &Version) -> String {
    format!("release v{}", version)
}

/// Tag name for a release of `version`.
pub fn tag_name(version: &Version) -> String {
    format!("v{}", version)
}

/// What a release commit includes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitScope {
    /// Every tracked change (`git commit -a`).
    All,
    /// Only the listed files.
    Files(Vec<PathBuf>),
}

/// Check that the git executable can be found on PATH.
pub fn check_git_installed(program: &str) -> Result<(), GitError> {
    which::which(program)
        .map(|_| ())
        .map_err(|_| GitError::NotInstalled(program.to_string()))
}

/// Issues git commands through a [`CommandRunner`].
pub struct Git<R: CommandRunner> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> Git<R> {
    /// Use the git executable configured through the environment.
    pub fn new(runner: R) -> Self {
        Self::with_program(runner, crate::config::git_program())
    }

    pub fn with_program(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// `git commit` with the release message.
    pub fn commit(&self, version: &Version, scope: &CommitScope) -> Result<(), GitError> {
        let mut args = vec!["commit".to_string()];
        if *scope == CommitScope::All {
            args.push("-a".to_string());
        }
        args.push("-m".to_string());
        args.push(commit_message(version));

        if let CommitScope::Files(files) = scope {
            args.push("--".to_string());
            args.extend(files.iter().map(|p| p.to_string_lossy().into_owned()));
        }

        self.run_git(args)?;
        info!("Committed release v{}", version);
        Ok(())
    }

    /// `git tag v<version>`
    pub fn tag(&self, version: &Version) -> Result<(), GitError> {
        self.run_git(vec!["tag".to_string(), tag_name(version)])?;
        info!("Tagged {}", tag_name(version));
        Ok(())
    }

    /// `git push`, followed by `git push --tags` when `tags` is set.
    pub fn push(&self, tags: bool) -> Result<(), GitError> {
        self.run_git(vec!["push".to_string()])?;
        if tags {
            self.run_git(vec!["push".to_string(), "--tags".to_string()])?;
        }
        info!("Pushed{}", if tags { " with tags" } else { "" });
        Ok(())
    }

    /// Run a git command and turn a non-zero exit into an error.
    fn run_git(&self, args: Vec<String>) -> Result<CommandOutput, GitError> {
        let output = self.runner.run(&self.program, &args)?;
        if !output.success() {
            return Err(GitError::CommandFailed {
                command: format_command(&self.program, &args),
                status: output.status,
                output: output.combined(),
            });
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::runner::MockCommandRunner;
    use mockall::Sequence;

    fn ok() -> Result<CommandOutput, GitError> {
        Ok(CommandOutput {
            status: Some(0),
            ..Default::default()
        })
    }

    fn expect_args(mock: &mut MockCommandRunner, seq: &mut Sequence, expected: &[&str]) {
        let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        mock.expect_run()
            .withf(move |program, args| program == "git" && args == expected.as_slice())
            .times(1)
            .in_sequence(seq)
            .returning(|_, _| ok());
    }

    #[test]
    fn test_release_names() {
        let version = Version::parse("1.2.4-beta.0").unwrap();
        assert_eq!(commit_message(&version), "release v1.2.4-beta.0");
        assert_eq!(tag_name(&version), "v1.2.4-beta.0");
    }

    #[test]
    fn test_commit_all() {
        let mut mock = MockCommandRunner::new();
        let mut seq = Sequence::new();
        expect_args(&mut mock, &mut seq, &["commit", "-a", "-m", "release v2.0.0"]);

        let git = Git::with_program(mock, "git");
        git.commit(&Version::new(2, 0, 0), &CommitScope::All).unwrap();
    }

    #[test]
    fn test_commit_files() {
        let mut mock = MockCommandRunner::new();
        let mut seq = Sequence::new();
        expect_args(
            &mut mock,
            &mut seq,
            &["commit", "-m", "release v1.0.1", "--", "package.json", "bower.json"],
        );

        let git = Git::with_program(mock, "git");
        let scope = CommitScope::Files(vec!["package.json".into(), "bower.json".into()]);
        git.commit(&Version::new(1, 0, 1), &scope).unwrap();
    }

    #[test]
    fn test_push_with_tags_runs_both_pushes() {
        let mut mock = MockCommandRunner::new();
        let mut seq = Sequence::new();
        expect_args(&mut mock, &mut seq, &["push"]);
        expect_args(&mut mock, &mut seq, &["push", "--tags"]);

        Git::with_program(mock, "git").push(true).unwrap();
    }

    #[test]
    fn test_push_without_tags() {
        let mut mock = MockCommandRunner::new();
        let mut seq = Sequence::new();
        expect_args(&mut mock, &mut seq, &["push"]);

        Git::with_program(mock, "git").push(false).unwrap();
    }

    #[test]
    fn test_failed_push_skips_tag_push() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run().times(1).returning(|_, _| {
            Ok(CommandOutput {
                status: Some(1),
                stdout: String::new(),
                stderr: "fatal: no upstream\n".into(),
            })
        });

        let err = Git::with_program(mock, "git").push(true).unwrap_err();
        match err {
            GitError::CommandFailed {
                command,
                status,
                output,
            } => {
                assert_eq!(command, "git push");
                assert_eq!(status, Some(1));
                assert_eq!(output, "fatal: no upstream");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_custom_program() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .withf(|program, args| program == "/usr/local/bin/git" && args[0] == "tag")
            .times(1)
            .returning(|_, _| ok());

        let git = Git::with_program(mock, "/usr/local/bin/git");
        assert_eq!(git.program(), "/usr/local/bin/git");
        git.tag(&Version::new(3, 1, 0)).unwrap();
    }

    #[test]
    fn test_check_git_installed() {
        assert!(check_git_installed("git").is_ok());
        assert!(matches!(
            check_git_installed("definitely-not-a-real-binary-xyz"),
            Err(GitError::NotInstalled(_))
        ));
    }
}
