//! Environment overrides.

use std::env;

use tracing::warn;

use crate::version::validate_identifier;

/// Environment variable naming the git executable.
pub const GIT_ENV_VAR: &str = "BUMP_GIT";

/// Environment variable supplying the default pre-release identifier.
pub const PREID_ENV_VAR: &str = "BUMP_PREID";

/// Git executable used when [`GIT_ENV_VAR`] is unset.
pub const DEFAULT_GIT: &str = "git";

/// Get the git executable to invoke.
///
/// Reads from BUMP_GIT if set, otherwise uses `git`. An empty value is
/// ignored with a warning.
pub fn git_program() -> String {
    match env::var(GIT_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => v,
        Ok(_) => {
            warn!("{} is set but empty, using '{}'", GIT_ENV_VAR, DEFAULT_GIT);
            DEFAULT_GIT.to_string()
        }
        Err(_) => DEFAULT_GIT.to_string(),
    }
}

/// Get the pre-release identifier configured through BUMP_PREID.
///
/// Logs a warning and returns `None` if the value is not a valid identifier.
pub fn default_preid() -> Option<String> {
    let value = env::var(PREID_ENV_VAR).ok()?;
    if value.is_empty() {
        return None;
    }

    match validate_identifier(&value) {
        Ok(()) => Some(value),
        Err(e) => {
            warn!("Ignoring {}: {}", PREID_ENV_VAR, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_git_program_default() {
        temp_env::with_var_unset(GIT_ENV_VAR, || {
            assert_eq!(git_program(), "git");
        });
    }

    #[test]
    #[serial]
    fn test_git_program_override() {
        temp_env::with_var(GIT_ENV_VAR, Some("/opt/git/bin/git"), || {
            assert_eq!(git_program(), "/opt/git/bin/git");
        });
    }

    #[test]
    #[serial]
    fn test_git_program_empty_falls_back() {
        temp_env::with_var(GIT_ENV_VAR, Some("  "), || {
            assert_eq!(git_program(), "git");
        });
    }

    #[test]
    #[serial]
    fn test_default_preid() {
        temp_env::with_var(PREID_ENV_VAR, Some("rc"), || {
            assert_eq!(default_preid().as_deref(), Some("rc"));
        });
        temp_env::with_var_unset(PREID_ENV_VAR, || {
            assert_eq!(default_preid(), None);
        });
    }

    #[test]
    #[serial]
    fn test_invalid_preid_is_ignored() {
        temp_env::with_var(PREID_ENV_VAR, Some("not.valid"), || {
            assert_eq!(default_preid(), None);
        });
    }
}
