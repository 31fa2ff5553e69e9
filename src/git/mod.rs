//! Git client invocation.
//!
//! All operations shell out to the system `git` binary, inheriting the user's
//! existing git config, SSH agent, and credential store.

pub mod commands;
pub mod runner;

pub use commands::{CommitScope, Git, check_git_installed, commit_message, tag_name};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
