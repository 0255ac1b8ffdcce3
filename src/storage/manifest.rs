//! Manifest loading
//!
//! Reads the `scripts` table from `package.json` in a project directory.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::ScriptCatalog;

/// Manifest file name looked up in the working directory
pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to determine working directory")]
    WorkingDir(#[source] io::Error),

    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The subset of `package.json` we care about; other fields are ignored
#[derive(Debug, Default, Deserialize)]
struct PackageJson {
    #[serde(default)]
    scripts: BTreeMap<String, String>,
}

/// A project manifest located in a directory
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
}

impl Manifest {
    /// Manifest inside the given directory
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(MANIFEST_FILE),
        }
    }

    /// Returns the path to the manifest file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the manifest into a sorted catalog
    pub fn load(&self) -> Result<ScriptCatalog, ManifestError> {
        let content = fs::read_to_string(&self.path).map_err(|source| ManifestError::Read {
            path: self.path.clone(),
            source,
        })?;

        Self::parse(&content).map_err(|source| ManifestError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Parses manifest content
    fn parse(content: &str) -> Result<ScriptCatalog, serde_json::Error> {
        let package: PackageJson = serde_json::from_str(content)?;
        Ok(ScriptCatalog::from(package.scripts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir, content: &str) -> Manifest {
        fs::write(dir.path().join(MANIFEST_FILE), content).unwrap();
        Manifest::in_dir(dir.path())
    }

    #[test]
    fn loads_sorted_scripts() {
        let dir = TempDir::new().unwrap();
        let manifest = write_manifest(&dir, r#"{"scripts": {"test": "jest", "build": "tsc"}}"#);

        let catalog = manifest.load().unwrap();
        let entries = catalog.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "build");
        assert_eq!(entries[0].command, "tsc");
        assert_eq!(entries[1].name, "test");
        assert_eq!(entries[1].command, "jest");
    }

    #[test]
    fn ignores_other_fields() {
        let dir = TempDir::new().unwrap();
        let manifest = write_manifest(
            &dir,
            r#"{"name": "app", "version": "1.0.0", "dependencies": {"a": "^1"}, "scripts": {"dev": "vite"}}"#,
        );

        let catalog = manifest.load().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("dev").map(|e| e.command.as_str()), Some("vite"));
    }

    #[test]
    fn missing_scripts_table_is_empty() {
        let dir = TempDir::new().unwrap();
        let manifest = write_manifest(&dir, r#"{"name": "app"}"#);

        assert!(manifest.load().unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let manifest = Manifest::in_dir(dir.path());

        let err = manifest.load().unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
        assert!(err.to_string().contains("package.json"));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let manifest = write_manifest(&dir, "{ not json");

        assert!(matches!(manifest.load(), Err(ManifestError::Parse { .. })));
    }

    #[test]
    fn non_string_command_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let manifest = write_manifest(&dir, r#"{"scripts": {"build": 42}}"#);

        assert!(matches!(manifest.load(), Err(ManifestError::Parse { .. })));
    }

    #[test]
    fn non_object_manifest_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let manifest = write_manifest(&dir, r#"["build"]"#);

        assert!(matches!(manifest.load(), Err(ManifestError::Parse { .. })));
    }
}
