//! Release pipeline: bump every manifest, then commit, tag and push.
//!
//! The bump step returns a [`ReleaseContext`] which the version-control step
//! consumes, so the released version is passed along explicitly.

pub mod context;

use std::path::{Path, PathBuf};

use semver::Version;
use tracing::{debug, info};

use crate::error::{ManifestError, ReleaseError};
use crate::git::{CommandRunner, CommitScope, Git};
use crate::manifest::{Manifest, detect_manifests};
use crate::version::{BumpKind, increment, validate_identifier};

pub use context::{BumpedManifest, ReleaseContext, ReleaseOptions};

/// Bump the version in each manifest of `paths`.
///
/// Every manifest is loaded and its next version computed before any file is
/// written, so a bad version or identifier leaves all files untouched.
pub fn bump_manifests(
    root: &Path,
    paths: &[PathBuf],
    kind: BumpKind,
    identifier: Option<&str>,
) -> Result<ReleaseContext, ReleaseError> {
    if paths.is_empty() {
        return Err(ReleaseError::NoManifests(root.to_path_buf()));
    }

    let identifier = identifier.filter(|id| !id.is_empty());
    if kind.is_prerelease() {
        if let Some(id) = identifier {
            validate_identifier(id)?;
        }
    }

    let mut staged: Vec<(Manifest, Version, Version)> = Vec::with_capacity(paths.len());
    for path in paths {
        let mut manifest = Manifest::load(path)?;
        let previous =
            manifest
                .current_version()
                .map_err(|source| ManifestError::InvalidVersion {
                    path: path.clone(),
                    source,
                })?;
        let next = increment(&previous, kind, identifier)?;
        debug!("{}: {} -> {}", manifest.file_name(), previous, next);

        manifest.set_version(&next);
        staged.push((manifest, previous, next));
    }

    let version = match staged.last() {
        Some((_, _, next)) => next.clone(),
        None => return Err(ReleaseError::NoManifests(root.to_path_buf())),
    };

    let mut bumped = Vec::with_capacity(staged.len());
    for (manifest, previous, next) in staged {
        manifest.save()?;
        let entry = BumpedManifest {
            path: manifest.path().to_path_buf(),
            previous,
            version: next,
        };

        println!("✔ Updated {} to {}", manifest.file_name(), entry.version);
        info!(
            "Updated {} from {} to {}",
            entry.path.display(),
            entry.previous,
            entry.version
        );
        bumped.push(entry);
    }

    Ok(ReleaseContext::new(root, version, bumped))
}

/// Commit the bumped manifests, then tag and push as requested.
///
/// Steps run in order and stop at the first failure: a failed commit means
/// no tag and no push.
pub fn commit_release<R: CommandRunner>(
    git: &Git<R>,
    context: &ReleaseContext,
    options: &ReleaseOptions,
) -> Result<(), ReleaseError> {
    let scope = if options.all {
        CommitScope::All
    } else {
        CommitScope::Files(context.relative_paths())
    };

    git.commit(context.version(), &scope)?;
    println!("✔ Git commit");

    if options.tag {
        git.tag(context.version())?;
        println!("✔ Git tag");
    }

    if options.push {
        git.push(options.tag)?;
        println!("✔ Git push");
    }

    Ok(())
}

/// Run the whole pipeline in `root`: detect, bump, and optionally commit.
pub fn run<R: CommandRunner>(
    root: &Path,
    kind: BumpKind,
    identifier: Option<&str>,
    options: &ReleaseOptions,
    git: &Git<R>,
) -> Result<ReleaseContext, ReleaseError> {
    let manifests = detect_manifests(root);
    debug!("Found {} manifest(s) in {}", manifests.len(), root.display());

    let context = bump_manifests(root, &manifests, kind, identifier)?;

    if options.wants_commit() {
        commit_release(git, &context, options)?;
    }

    Ok(context)
}
