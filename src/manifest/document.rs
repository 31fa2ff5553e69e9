//! Loading and writing a single JSON manifest.

use std::io::Write;
use std::path::{Path, PathBuf};

use semver::Version;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ManifestError, VersionError};
use crate::version::parse_version;

use super::ManifestKind;
use super::indent::{DEFAULT_INDENT, detect_indent};

/// Version assumed when a manifest has no usable `version` field.
pub const FALLBACK_VERSION: &str = "0.0.0";

const BOM: char = '\u{feff}';

/// A parsed manifest plus the formatting needed to write it back unchanged.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    /// `None` for a file name outside the known set.
    kind: Option<ManifestKind>,
    document: Map<String, Value>,
    indent: String,
    line_ending: &'static str,
    trailing_newline: bool,
    /// The file started with a UTF-8 byte-order mark.
    bom: bool,
}

impl Manifest {
    /// Load the manifest at `path`.
    ///
    /// A missing file is reported as [`ManifestError::NotFound`] rather than
    /// a generic I/O failure so callers can tell the two apart.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ManifestError::NotFound(path.to_path_buf())
            } else {
                ManifestError::ReadFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        Self::parse(path, &content)
    }

    /// Parse manifest `content` as if it had been read from `path`.
    ///
    /// A leading byte-order mark is skipped and written back on render.
    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let (bom, content) = match content.strip_prefix(BOM) {
            Some(rest) => (true, rest),
            None => (false, content),
        };

        let value: Value =
            serde_json::from_str(content).map_err(|e| ManifestError::ParseFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        let Value::Object(document) = value else {
            return Err(ManifestError::NotAnObject(path.to_path_buf()));
        };

        let indent = detect_indent(content).unwrap_or_else(|| DEFAULT_INDENT.to_string());
        let line_ending = if content.contains("\r\n") { "\r\n" } else { "\n" };
        let trailing_newline = content.ends_with('\n');

        debug!(
            "Loaded {} (indent {:?}, trailing newline: {})",
            path.display(),
            indent,
            trailing_newline
        );

        Ok(Self {
            path: path.to_path_buf(),
            kind: ManifestKind::from_path(path),
            document,
            indent,
            line_ending,
            trailing_newline,
            bom,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display, e.g. `package.json`.
    pub fn file_name(&self) -> String {
        match self.kind {
            Some(kind) => kind.file_name().to_string(),
            None => self
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.path.display().to_string()),
        }
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// The raw `version` field, or `0.0.0` when it is missing, `null` or empty.
    pub fn version_str(&self) -> Result<&str, VersionError> {
        match self.document.get("version") {
            None | Some(Value::Null) => Ok(FALLBACK_VERSION),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(FALLBACK_VERSION),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(VersionError::NotAString(other.to_string())),
        }
    }

    /// The parsed current version.
    pub fn current_version(&self) -> Result<Version, VersionError> {
        parse_version(self.version_str()?)
    }

    /// Replace the `version` field in memory. A new field goes last.
    pub fn set_version(&mut self, version: &Version) {
        self.document
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// Serialize the document with the formatting it was loaded with.
    pub fn render(&self) -> Result<String, ManifestError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.document
            .serialize(&mut serializer)
            .map_err(|e| ManifestError::SerializeFailed {
                path: self.path.clone(),
                source: e,
            })?;

        let mut rendered = String::with_capacity(buf.len() + 8);
        if self.bom {
            rendered.push(BOM);
        }
        rendered.push_str(&String::from_utf8_lossy(&buf));
        if self.line_ending != "\n" {
            rendered = rendered.replace('\n', self.line_ending);
        }
        if self.trailing_newline {
            rendered.push_str(self.line_ending);
        }
        Ok(rendered)
    }

    /// Write the manifest back to its path.
    ///
    /// The content goes to a temporary file in the same directory which then
    /// replaces the original, keeping its permissions.
    pub fn save(&self) -> Result<(), ManifestError> {
        let rendered = self.render()?;
        let write_err = |source: std::io::Error| ManifestError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(rendered.as_bytes()).map_err(write_err)?;

        if let Ok(metadata) = std::fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(write_err)?;
        }

        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        debug!("Wrote {}", self.path.display());
        Ok(())
    }
}
