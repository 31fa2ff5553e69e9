//! Semver increment rules.

use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};
use tracing::debug;

use crate::error::VersionError;

/// Identifier used for pre-release bumps when none is given or inferred.
pub const DEFAULT_IDENTIFIER: &str = "beta";

/// Type of version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
    PreMajor,
    PreMinor,
    PrePatch,
    PreRelease,
}

impl BumpKind {
    /// Every bump kind, in the order they are offered to the user.
    pub const ALL: [BumpKind; 7] = [
        BumpKind::Major,
        BumpKind::Minor,
        BumpKind::Patch,
        BumpKind::PreMajor,
        BumpKind::PreMinor,
        BumpKind::PrePatch,
        BumpKind::PreRelease,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
            BumpKind::PreMajor => "premajor",
            BumpKind::PreMinor => "preminor",
            BumpKind::PrePatch => "prepatch",
            BumpKind::PreRelease => "prerelease",
        }
    }

    /// Whether this bump produces a pre-release version.
    pub fn is_prerelease(&self) -> bool {
        matches!(
            self,
            BumpKind::PreMajor | BumpKind::PreMinor | BumpKind::PrePatch | BumpKind::PreRelease
        )
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpKind {
    type Err = VersionError;

    /// Only the exact lowercase names are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BumpKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| VersionError::InvalidBumpKind(s.to_string()))
    }
}

/// Parse a version string the way npm manifests write them.
///
/// Surrounding whitespace and a leading `=` or `v` are ignored; the rest must
/// be a strict `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` string.
pub fn parse_version(input: &str) -> Result<Version, VersionError> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('=').unwrap_or(trimmed).trim_start();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    Version::parse(trimmed).map_err(|e| VersionError::ParseFailed(input.to_string(), e))
}

/// Check that `identifier` can stand alone as a pre-release label.
pub fn validate_identifier(identifier: &str) -> Result<(), VersionError> {
    let well_formed = !identifier.is_empty()
        && identifier
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
        && Prerelease::new(identifier).is_ok();

    if well_formed {
        Ok(())
    } else {
        Err(VersionError::InvalidIdentifier(identifier.to_string()))
    }
}

/// Pick the pre-release identifier for a bump.
///
/// An explicit, non-empty identifier wins. Otherwise the first pre-release
/// component of `current` is reused when it is a label rather than a number,
/// falling back to [`DEFAULT_IDENTIFIER`].
pub fn resolve_identifier(
    current: &Version,
    identifier: Option<&str>,
) -> Result<String, VersionError> {
    if let Some(explicit) = identifier.filter(|id| !id.is_empty()) {
        validate_identifier(explicit)?;
        return Ok(explicit.to_string());
    }

    let inferred = current
        .pre
        .as_str()
        .split('.')
        .next()
        .filter(|first| !first.is_empty() && !is_numeric(first))
        .unwrap_or(DEFAULT_IDENTIFIER);

    Ok(inferred.to_string())
}

/// Compute the next version for `kind`.
///
/// Build metadata never survives a bump. `identifier` only matters for the
/// pre-release kinds; see [`resolve_identifier`] for how it defaults.
pub fn increment(
    current: &Version,
    kind: BumpKind,
    identifier: Option<&str>,
) -> Result<Version, VersionError> {
    let mut next = current.clone();
    next.build = BuildMetadata::EMPTY;

    match kind {
        BumpKind::Major => bump_major(&mut next)?,
        BumpKind::Minor => bump_minor(&mut next)?,
        BumpKind::Patch => bump_patch(&mut next)?,
        BumpKind::PreMajor | BumpKind::PreMinor | BumpKind::PrePatch => {
            let id = resolve_identifier(current, identifier)?;
            match kind {
                BumpKind::PreMajor => bump_major(&mut next)?,
                BumpKind::PreMinor => bump_minor(&mut next)?,
                _ => bump_patch(&mut next)?,
            }
            next.pre = start_prerelease(&id)?;
        }
        BumpKind::PreRelease => {
            let id = resolve_identifier(current, identifier)?;
            match continue_prerelease(&current.pre, &id)? {
                Some(pre) => next.pre = pre,
                None => {
                    bump_patch(&mut next)?;
                    next.pre = start_prerelease(&id)?;
                }
            }
        }
    }

    debug!("Bumped {} ({}) -> {}", current, kind, next);
    Ok(next)
}

/// String form of [`increment`]: parses both the version and the bump kind.
pub fn increment_str(
    current: &str,
    kind: &str,
    identifier: Option<&str>,
) -> Result<String, VersionError> {
    let current = parse_version(current)?;
    let kind: BumpKind = kind.parse()?;
    increment(&current, kind, identifier).map(|v| v.to_string())
}

fn bump_major(version: &mut Version) -> Result<(), VersionError> {
    version.major = version
        .major
        .checked_add(1)
        .ok_or(VersionError::Overflow("major"))?;
    version.minor = 0;
    version.patch = 0;
    version.pre = Prerelease::EMPTY;
    Ok(())
}

fn bump_minor(version: &mut Version) -> Result<(), VersionError> {
    version.minor = version
        .minor
        .checked_add(1)
        .ok_or(VersionError::Overflow("minor"))?;
    version.patch = 0;
    version.pre = Prerelease::EMPTY;
    Ok(())
}

fn bump_patch(version: &mut Version) -> Result<(), VersionError> {
    version.patch = version
        .patch
        .checked_add(1)
        .ok_or(VersionError::Overflow("patch"))?;
    version.pre = Prerelease::EMPTY;
    Ok(())
}

/// `<identifier>.0`
fn start_prerelease(identifier: &str) -> Result<Prerelease, VersionError> {
    Prerelease::new(&format!("{}.0", identifier))
        .map_err(|_| VersionError::InvalidIdentifier(identifier.to_string()))
}

/// Advance an existing pre-release that is already labelled `identifier`.
///
/// Returns `None` when the current pre-release is empty or carries another
/// label. When the component after the label is not a number the counter
/// restarts at `<identifier>.0`. Otherwise the last numeric component is
/// incremented; a pre-release without one gets `.0` appended.
fn continue_prerelease(
    pre: &Prerelease,
    identifier: &str,
) -> Result<Option<Prerelease>, VersionError> {
    let mut parts: Vec<String> = pre.as_str().split('.').map(String::from).collect();
    if pre.is_empty() || parts[0] != identifier {
        return Ok(None);
    }
    if parts.get(1).is_some_and(|second| !is_numeric(second)) {
        return start_prerelease(identifier).map(Some);
    }

    match parts.iter().rposition(|p| is_numeric(p)) {
        Some(idx) => {
            let counter: u64 = parts[idx]
                .parse()
                .map_err(|_| VersionError::Overflow("pre-release"))?;
            let counter = counter
                .checked_add(1)
                .ok_or(VersionError::Overflow("pre-release"))?;
            parts[idx] = counter.to_string();
        }
        None => parts.push("0".to_string()),
    }

    Prerelease::new(&parts.join("."))
        .map(Some)
        .map_err(|_| VersionError::InvalidIdentifier(identifier.to_string()))
}

fn is_numeric(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}
