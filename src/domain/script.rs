//! Script domain model
//!
//! A script entry is one named command from the manifest's `scripts` table.
//! The catalog keeps entries sorted by name and may carry a single
//! "last run" suggestion at the front.

use std::collections::BTreeMap;

/// Description shown on the synthesized suggestion row
pub const LAST_RUN_LABEL: &str = "last run";

/// A named, runnable command from the manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptEntry {
    /// Script name (key in the `scripts` table)
    pub name: String,

    /// Command string the package manager will execute
    pub command: String,

    /// Only set on the synthesized "last run" entry
    pub description: Option<String>,
}

impl ScriptEntry {
    /// Creates a plain entry with no description
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            description: None,
        }
    }

    /// Returns a copy of this entry marked as the last-run suggestion
    pub fn as_last_run(&self) -> Self {
        Self {
            name: self.name.clone(),
            command: self.command.clone(),
            description: Some(LAST_RUN_LABEL.to_string()),
        }
    }

    /// Returns true if this is the synthesized suggestion entry
    pub fn is_last_run(&self) -> bool {
        self.description.as_deref() == Some(LAST_RUN_LABEL)
    }
}

/// Ordered list of scripts loaded from one manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptCatalog {
    entries: Vec<ScriptEntry>,
}

impl ScriptCatalog {
    /// Builds a catalog from a name -> command table, sorted by name
    pub fn from_scripts<I, K, V>(scripts: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries: Vec<ScriptEntry> = scripts
            .into_iter()
            .map(|(name, command)| ScriptEntry::new(name, command))
            .collect();

        // Byte-wise ordering, same as `str::cmp`
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Self { entries }
    }

    /// Returns the entries in display order
    pub fn entries(&self) -> &[ScriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds an entry by exact name
    pub fn get(&self, name: &str) -> Option<&ScriptEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Builds the list shown to the user.
    ///
    /// When `last_run` names a script that still exists, a copy of it marked
    /// with [`LAST_RUN_LABEL`] is prepended. The original entry keeps its
    /// sorted position, so that script appears twice. A stale name is ignored.
    pub fn with_suggestion(&self, last_run: Option<&str>) -> Vec<ScriptEntry> {
        let suggestion = last_run.and_then(|name| self.get(name)).map(ScriptEntry::as_last_run);

        suggestion
            .into_iter()
            .chain(self.entries.iter().cloned())
            .collect()
    }
}

impl From<BTreeMap<String, String>> for ScriptCatalog {
    fn from(scripts: BTreeMap<String, String>) -> Self {
        Self::from_scripts(scripts)
    }
}
