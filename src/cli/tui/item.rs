//! List items shown by the picker

use crate::domain::ScriptEntry;

/// What the picker needs from a row
pub trait PickerItem {
    /// Primary line
    fn title(&self) -> &str;

    /// Secondary line under the title
    fn description(&self) -> &str;

    /// Text matched against the filter query
    fn filter_value(&self) -> &str {
        self.title()
    }
}

/// A script entry as displayed in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRow {
    entry: ScriptEntry,
}

impl ScriptRow {
    pub fn new(entry: ScriptEntry) -> Self {
        Self { entry }
    }

    /// Returns the underlying script entry
    pub fn entry(&self) -> &ScriptEntry {
        &self.entry
    }

    /// Returns true for the synthesized "last run" row
    pub fn is_suggestion(&self) -> bool {
        self.entry.is_last_run()
    }
}

impl PickerItem for ScriptRow {
    fn title(&self) -> &str {
        &self.entry.name
    }

    // The suggestion row shows its marker instead of the raw command
    fn description(&self) -> &str {
        self.entry.description.as_deref().unwrap_or(&self.entry.command)
    }
}

impl From<ScriptEntry> for ScriptRow {
    fn from(entry: ScriptEntry) -> Self {
        Self::new(entry)
    }
}
