//! version-bump-prompt - bump semver versions in package manifests.
//!
//! # Overview
//!
//! Finds package.json, bower.json and component.json in a project, bumps the
//! `version` field of each by a semver rule (major, minor, patch or one of the
//! pre-release variants) while keeping the file's formatting, and optionally
//! commits, tags and pushes the release with the system `git` client.

pub mod config;
pub mod error;
pub mod git;
pub mod manifest;
pub mod release;
pub mod version;

// Re-export commonly used types
pub use error::{GitError, ManifestError, ReleaseError, VersionError};
pub use git::{CommandRunner, Git, SystemRunner};
pub use manifest::{Manifest, detect_manifests, version_info};
pub use release::{ReleaseContext, ReleaseOptions};
pub use version::{BumpKind, VersionCandidates, compute_candidates, increment, increment_str};
