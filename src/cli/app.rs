//! Main CLI application structure

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use super::output::Output;
use super::runner::{Launcher, ScriptRunner};
use super::tui::{Selector, TerminalSelector};
use crate::domain::{ScriptCatalog, ScriptEntry};
use crate::storage::{Manifest, ManifestError, RunCache, Settings};

#[derive(Parser)]
#[command(name = "npm-pick")]
#[command(author, version, about = "Pick a package.json script and run it")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Package manager used to run the script (defaults to npm)
    #[arg(long, env = "NPM_PICK_PACKAGE_MANAGER")]
    pub package_manager: Option<String>,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.verbose);

    output.verbose("npm-pick starting");

    let settings = Settings::load()?;
    let program = cli
        .package_manager
        .unwrap_or_else(|| settings.package_manager.clone());
    let runner = ScriptRunner::new(program, output);
    output.verbose_ctx("settings", &format!("Package manager: {}", runner.program()));

    let cwd = env::current_dir().map_err(ManifestError::WorkingDir)?;

    let manifest = Manifest::in_dir(&cwd);
    output.verbose_ctx("manifest", &format!("Reading {}", manifest.path().display()));
    let catalog = manifest.load()?;
    output.verbose_ctx("manifest", &format!("Found {} scripts", catalog.len()));

    let cache_path = RunCache::default_path()?;
    let (mut cache, status) = RunCache::load(cache_path);
    if status.has_history() {
        output.verbose_ctx(
            "cache",
            &format!("Loaded {} entries from {}", cache.len(), cache.path().display()),
        );
    } else {
        output.verbose_ctx(
            "cache",
            &format!("No history at {} ({:?})", cache.path().display(), status),
        );
    }

    let mut selector = TerminalSelector::new(output, settings.alt_screen);

    execute(&cwd, &catalog, &mut cache, &mut selector, &runner, &output)?;

    output.verbose("Done");
    Ok(())
}

/// Offer the catalog, remember the choice for `cwd`, then launch it.
///
/// Returns the script that was launched, or `None` if the user cancelled.
/// Cancelling leaves the cache untouched. The cache is written before the
/// script starts.
pub fn execute(
    cwd: &Path,
    catalog: &ScriptCatalog,
    cache: &mut RunCache,
    selector: &mut impl Selector,
    launcher: &impl Launcher,
    output: &Output,
) -> Result<Option<ScriptEntry>> {
    let last_run = cache.last_run(cwd);
    let entries = catalog.with_suggestion(last_run);

    if entries.len() > catalog.len() {
        output.verbose_ctx("cache", &format!("Suggesting last run: {:?}", last_run));
    } else if let Some(stale) = last_run {
        output.verbose_ctx("cache", &format!("Last run '{}' is no longer in the manifest", stale));
    }

    let (script, should_run) = selector.select(entries)?.into_parts();
    if !should_run {
        output.verbose("Nothing selected");
        return Ok(None);
    }

    cache.record(cwd, &script.name);
    cache
        .save()
        .with_context(|| format!("Failed to remember '{}' as last run", script.name))?;
    output.verbose_ctx("cache", &format!("Saved {}", cache.path().display()));

    match launcher.launch(&script.name) {
        Ok(status) if !status.success() => {
            output.verbose_ctx("run", &format!("'{}' exited with {}", script.name, status));
        }
        Ok(_) => {}
        Err(e) => output.warn(&format!("Failed to launch '{}': {}", script.name, e)),
    }

    Ok(Some(script))
}
