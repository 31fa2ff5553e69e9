//! State handed from the bump step to the version-control step.

use std::path::{Path, PathBuf};

use semver::Version;

/// Which version-control steps to run after bumping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseOptions {
    pub commit: bool,
    /// Commit all tracked changes, not just the manifests.
    pub all: bool,
    pub tag: bool,
    pub push: bool,
}

impl ReleaseOptions {
    /// Tagging or pushing needs a release commit first.
    pub fn wants_commit(&self) -> bool {
        self.commit || self.tag || self.push
    }
}

/// One manifest that was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpedManifest {
    pub path: PathBuf,
    pub previous: Version,
    pub version: Version,
}

/// Result of bumping the manifests of one project.
#[derive(Debug, Clone)]
pub struct ReleaseContext {
    root: PathBuf,
    version: Version,
    manifests: Vec<BumpedManifest>,
}

impl ReleaseContext {
    pub(crate) fn new(root: &Path, version: Version, manifests: Vec<BumpedManifest>) -> Self {
        Self {
            root: root.to_path_buf(),
            version,
            manifests,
        }
    }

    /// The released version: the one computed for the last manifest.
    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn manifests(&self) -> &[BumpedManifest] {
        &self.manifests
    }

    /// Manifest paths relative to the project root, for `git commit`.
    pub fn relative_paths(&self) -> Vec<PathBuf> {
        self.manifests
            .iter()
            .map(|m| {
                m.path
                    .strip_prefix(&self.root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| m.path.clone())
            })
            .collect()
    }
}
