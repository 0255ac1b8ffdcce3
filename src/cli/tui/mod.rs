//! Interactive script picker
//!
//! Shows the script list in the terminal using ratatui and returns the
//! user's choice. All input is handled on the calling thread.

mod app;
mod event;
mod item;
mod ui;
mod views;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use super::Output;
use crate::domain::ScriptEntry;
use app::Picker;
use event::EventSource;

pub use item::{PickerItem, ScriptRow};

/// Outcome of a picker session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// The confirmed entry; `None` when the user cancelled
    pub chosen: Option<ScriptEntry>,
}

impl Selection {
    pub fn chosen(entry: ScriptEntry) -> Self {
        Self { chosen: Some(entry) }
    }

    pub fn none() -> Self {
        Self { chosen: None }
    }

    /// Splits into `(entry, should_run)`; the entry is empty when cancelled
    pub fn into_parts(self) -> (ScriptEntry, bool) {
        match self.chosen {
            Some(entry) => (entry, true),
            None => (ScriptEntry::default(), false),
        }
    }
}

/// Something that lets the user choose one entry
pub trait Selector {
    fn select(&mut self, entries: Vec<ScriptEntry>) -> Result<Selection>;
}

/// Picker drawn in the real terminal
#[derive(Debug, Clone)]
pub struct TerminalSelector {
    output: Output,
    alt_screen: bool,
}

impl TerminalSelector {
    pub fn new(output: Output, alt_screen: bool) -> Self {
        Self { output, alt_screen }
    }
}

impl Selector for TerminalSelector {
    fn select(&mut self, entries: Vec<ScriptEntry>) -> Result<Selection> {
        pick(entries, &self.output, self.alt_screen)
    }
}

/// Launch the picker and wait for a decision
pub fn pick(entries: Vec<ScriptEntry>, output: &Output, alt_screen: bool) -> Result<Selection> {
    output.verbose_ctx("picker", &format!("Showing {} rows", entries.len()));

    let mut terminal = ui::init_terminal(alt_screen)?;
    let mut picker = Picker::new(entries);
    let events = EventSource::new();

    // Run the main loop with panic safety
    // This ensures terminal is restored even if the picker panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| picker.run(&mut terminal, &events)));

    // Always restore terminal, even on panic
    let restore_result = ui::restore_terminal(alt_screen);

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result?;
        }
        Err(panic_payload) => {
            let _ = restore_result;
            return if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("Selector panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("Selector panicked: {}", s))
            } else {
                Err(anyhow!("Selector panicked with unknown error"))
            };
        }
    }

    output.verbose_ctx("picker", &format!("Finished: {:?}", picker.state()));

    Ok(picker.into_selection())
}
