//! bump - CLI entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use dialoguer::Select;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use version_bump_prompt::config;
use version_bump_prompt::error::{GitError, ReleaseError};
use version_bump_prompt::git::{Git, SystemRunner, check_git_installed};
use version_bump_prompt::manifest::{detect_manifests, version_info};
use version_bump_prompt::release::{self, ReleaseOptions};
use version_bump_prompt::version::{BumpKind, VersionCandidates};

/// Bump the version in package.json, bower.json and component.json.
#[derive(Parser, Debug)]
#[command(name = "bump")]
#[command(about = "Bump the version in package.json, bower.json and component.json")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    bump: BumpFlags,

    /// Prompt for the type of bump (the default when no bump type is given)
    #[arg(long)]
    prompt: bool,

    /// Pre-release identifier such as "alpha" or "rc" (default: the current label, or "beta")
    #[arg(long, value_name = "NAME")]
    preid: Option<String>,

    /// Commit the changed manifests
    #[arg(long)]
    commit: bool,

    /// Tag the release commit (implies --commit)
    #[arg(long)]
    tag: bool,

    /// Push the release commit, and the tag with --tag (implies --commit)
    #[arg(long)]
    push: bool,

    /// Commit all tracked changes, not just the manifests
    #[arg(long)]
    all: bool,

    /// Print the current and next versions of each manifest as JSON and exit
    #[arg(
        long,
        conflicts_with_all = [
            "prompt", "commit", "tag", "push", "all",
            "major", "minor", "patch", "premajor", "preminor", "prepatch", "prerelease",
        ]
    )]
    info: bool,

    /// Project directory
    #[arg(long, value_name = "DIR", default_value = ".")]
    cwd: PathBuf,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Bump type flags; at most one may be given.
#[derive(Args, Debug)]
#[group(multiple = false)]
struct BumpFlags {
    /// Increase major version
    #[arg(long)]
    major: bool,

    /// Increase minor version
    #[arg(long)]
    minor: bool,

    /// Increase patch version
    #[arg(long)]
    patch: bool,

    /// Increase major version, pre-release
    #[arg(long)]
    premajor: bool,

    /// Increase minor version, pre-release
    #[arg(long)]
    preminor: bool,

    /// Increase patch version, pre-release
    #[arg(long)]
    prepatch: bool,

    /// Increase pre-release version
    #[arg(long)]
    prerelease: bool,
}

impl BumpFlags {
    fn selected(&self) -> Option<BumpKind> {
        [
            (self.major, BumpKind::Major),
            (self.minor, BumpKind::Minor),
            (self.patch, BumpKind::Patch),
            (self.premajor, BumpKind::PreMajor),
            (self.preminor, BumpKind::PreMinor),
            (self.prepatch, BumpKind::PrePatch),
            (self.prerelease, BumpKind::PreRelease),
        ]
        .into_iter()
        .find_map(|(set, kind)| set.then_some(kind))
    }
}

/// One manifest's entry in `--info` output.
#[derive(Serialize)]
struct ManifestInfo {
    manifest: String,
    #[serde(flatten)]
    versions: VersionCandidates,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // A failed git command exits with the command's own status.
            if let Some(git_err) = err.chain().find_map(|e| e.downcast_ref::<GitError>()) {
                match git_err.output().filter(|o| !o.is_empty()) {
                    Some(output) => eprintln!("{}", output),
                    None => eprintln!("Error: {}", git_err),
                }
                return ExitCode::from(u8::try_from(git_err.exit_code()).unwrap_or(1));
            }

            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = cli
        .cwd
        .canonicalize()
        .with_context(|| format!("Cannot access directory {}", cli.cwd.display()))?;

    let preid = cli
        .preid
        .clone()
        .filter(|id| !id.is_empty())
        .or_else(config::default_preid);

    let manifests = detect_manifests(&root);
    if manifests.is_empty() {
        return Err(ReleaseError::NoManifests(root).into());
    }

    if cli.info {
        return print_info(&manifests, preid.as_deref());
    }

    let kind = match cli.bump.selected() {
        Some(kind) if !cli.prompt => kind,
        _ => prompt_for_bump(&manifests[0], preid.as_deref())?,
    };

    let options = ReleaseOptions {
        commit: cli.commit,
        all: cli.all,
        tag: cli.tag,
        push: cli.push,
    };

    let git = Git::new(SystemRunner::in_dir(&root));
    if options.wants_commit() {
        check_git_installed(git.program())?;
    }

    release::run(&root, kind, preid.as_deref(), &options, &git)
        .context("Failed to release")?;

    Ok(())
}

/// Ask which bump to apply, listing the next version for each choice.
fn prompt_for_bump(manifest: &Path, preid: Option<&str>) -> Result<BumpKind> {
    let info = version_info(manifest, preid)?;
    let items: Vec<String> = info
        .iter()
        .map(|(kind, next)| format!("{} ({})", kind, next))
        .collect();

    let name = manifest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let default = BumpKind::ALL
        .iter()
        .position(|k| *k == BumpKind::Patch)
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt(format!(
            "The current version in {} is {}. How would you like to bump it?",
            name, info.current
        ))
        .items(&items)
        .default(default)
        .interact()
        .context("Failed to read the bump selection")?;

    Ok(BumpKind::ALL[selection])
}

fn print_info(manifests: &[PathBuf], preid: Option<&str>) -> Result<()> {
    let mut entries = Vec::with_capacity(manifests.len());
    for path in manifests {
        entries.push(ManifestInfo {
            manifest: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            versions: version_info(path, preid)?,
        });
    }

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("version_bump_prompt=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
