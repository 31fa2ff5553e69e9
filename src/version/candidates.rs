//! Next-version candidates for every bump kind at once.

use semver::Version;
use serde::Serialize;

use crate::error::VersionError;

use super::bump::{BumpKind, increment, resolve_identifier};

/// The current version alongside its successor under each bump kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionCandidates {
    pub current: Version,
    pub next_major: Version,
    pub next_minor: Version,
    pub next_patch: Version,
    pub next_premajor: Version,
    pub next_preminor: Version,
    pub next_prepatch: Version,
    pub next_prerelease: Version,
}

impl VersionCandidates {
    /// The candidate for a single bump kind.
    pub fn get(&self, kind: BumpKind) -> &Version {
        match kind {
            BumpKind::Major => &self.next_major,
            BumpKind::Minor => &self.next_minor,
            BumpKind::Patch => &self.next_patch,
            BumpKind::PreMajor => &self.next_premajor,
            BumpKind::PreMinor => &self.next_preminor,
            BumpKind::PrePatch => &self.next_prepatch,
            BumpKind::PreRelease => &self.next_prerelease,
        }
    }

    /// `(kind, candidate)` pairs in [`BumpKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (BumpKind, &Version)> + '_ {
        BumpKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Compute the next version under every bump kind without touching anything.
///
/// The identifier is resolved once so all pre-release candidates share it.
pub fn compute_candidates(
    current: &Version,
    identifier: Option<&str>,
) -> Result<VersionCandidates, VersionError> {
    let id = resolve_identifier(current, identifier)?;
    let next = |kind| increment(current, kind, Some(id.as_str()));

    Ok(VersionCandidates {
        current: current.clone(),
        next_major: next(BumpKind::Major)?,
        next_minor: next(BumpKind::Minor)?,
        next_patch: next(BumpKind::Patch)?,
        next_premajor: next(BumpKind::PreMajor)?,
        next_preminor: next(BumpKind::PreMinor)?,
        next_prepatch: next(BumpKind::PrePatch)?,
        next_prerelease: next(BumpKind::PreRelease)?,
    })
}
