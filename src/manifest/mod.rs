//! Manifest detection, loading and format-preserving writes.
//!
//! Supports package.json, bower.json and component.json.

pub mod document;
pub mod indent;

use std::path::{Path, PathBuf};

use crate::error::ManifestError;
use crate::version::{VersionCandidates, compute_candidates};

pub use document::{FALLBACK_VERSION, Manifest};
pub use indent::detect_indent;

/// The kind of manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    PackageJson,
    BowerJson,
    ComponentJson,
}

impl ManifestKind {
    /// All kinds, in the order they are probed.
    pub const ALL: [ManifestKind; 3] = [
        ManifestKind::PackageJson,
        ManifestKind::BowerJson,
        ManifestKind::ComponentJson,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ManifestKind::PackageJson => "package.json",
            ManifestKind::BowerJson => "bower.json",
            ManifestKind::ComponentJson => "component.json",
        }
    }

    /// The kind matching the file name of `path`, if any.
    pub fn from_path(path: &Path) -> Option<ManifestKind> {
        let name = path.file_name()?.to_str()?;
        ManifestKind::ALL
            .into_iter()
            .find(|kind| kind.file_name() == name)
    }
}

impl std::fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Find the manifests that exist in `root`.
///
/// Only the files of [`ManifestKind::ALL`] are considered, returned in that order.
/// The result may be empty.
pub fn detect_manifests(root: &Path) -> Vec<PathBuf> {
    ManifestKind::ALL
        .iter()
        .map(|kind| root.join(kind.file_name()))
        .filter(|path| path.is_file())
        .collect()
}

/// Current and next versions of the manifest at `path`.
pub fn version_info(
    path: &Path,
    identifier: Option<&str>,
) -> Result<VersionCandidates, ManifestError> {
    let manifest = Manifest::load(path)?;
    let invalid = |source| ManifestError::InvalidVersion {
        path: path.to_path_buf(),
        source,
    };

    let current = manifest.current_version().map_err(invalid)?;
    compute_candidates(&current, identifier).map_err(invalid)
}
