//! Version parsing and semver bumping.

pub mod bump;
pub mod candidates;

pub use bump::{
    BumpKind, DEFAULT_IDENTIFIER, increment, increment_str, parse_version, resolve_identifier,
    validate_identifier,
};
pub use candidates::{VersionCandidates, compute_candidates};
