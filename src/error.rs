//! Error types for version-bump-prompt modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from version parsing and increment operations.
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Failed to parse version '{0}': {1}")]
    ParseFailed(String, #[source] semver::Error),

    #[error(
        "Invalid bump type '{0}'. Expected one of: major, minor, patch, premajor, preminor, prepatch, prerelease"
    )]
    InvalidBumpKind(String),

    #[error("Invalid pre-release identifier '{0}': only ASCII letters, digits and '-' are allowed")]
    InvalidIdentifier(String),

    #[error("Version field must be a string, found: {0}")]
    NotAString(String),

    #[error("Version component overflow while bumping the {0} number")]
    Overflow(&'static str),
}

/// Errors from manifest loading and writing.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Manifest not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Top level of {} must be a JSON object", .0.display())]
    NotAnObject(PathBuf),

    #[error("Failed to serialize {}: {source}", path.display())]
    SerializeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid version in {}: {source}", path.display())]
    InvalidVersion {
        path: PathBuf,
        #[source]
        source: VersionError,
    },
}

/// Errors from running the git client.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("'{0}' was not found on PATH. Install git or point BUMP_GIT at the executable.")]
    NotInstalled(String),

    #[error("Failed to spawn `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}: {output}",
        status.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    CommandFailed {
        command: String,
        status: Option<i32>,
        output: String,
    },
}

impl GitError {
    /// Process exit code to use when this error aborts the program.
    ///
    /// Mirrors the failed subprocess where possible, falling back to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            GitError::CommandFailed {
                status: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }

    /// Captured output of the failed command, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            GitError::CommandFailed { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// Errors from the release pipeline.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("No manifest found in {}. Expected package.json, bower.json or component.json", .0.display())]
    NoManifests(PathBuf),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Version control step failed")]
    Git(#[from] GitError),
}
