//! # Storage Layer
//!
//! File I/O for npm-pick.
//!
//! ## Files
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Scripts | JSON (`scripts` table) | `./package.json` |
//! | Last-run cache | JSON object, path -> script | `<user cache dir>/npm-pick/last-run.json` |
//! | Settings | TOML | `<user config dir>/npm-pick/config.toml` |
//!
//! ## Failure Modes
//!
//! - [`Manifest`] and [`Settings`] errors are fatal to the caller
//! - [`RunCache::load`] never fails; a bad cache file reads as empty history
//! - [`RunCache::save`] writes a temp file and renames it into place

mod manifest;
mod run_cache;
mod settings;

use directories::ProjectDirs;

pub use manifest::{Manifest, ManifestError, MANIFEST_FILE};
pub use run_cache::{CacheError, CacheLoad, RunCache, CACHE_FILE};
pub use settings::{Settings, SettingsError, DEFAULT_PACKAGE_MANAGER, SETTINGS_FILE};

/// Platform directories for the application
pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "npm-pick", "npm-pick")
}
