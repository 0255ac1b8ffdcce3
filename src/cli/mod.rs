//! # Command-Line Interface
//!
//! Wires the pieces together for a single invocation:
//!
//! 1. Load settings and `package.json` from the working directory
//! 2. Load the last-run cache
//! 3. Show the picker, with the last run for this directory on top
//! 4. Save the choice, then run it through the package manager
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! npm-pick --verbose
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and start the picker.

mod app;
mod output;
mod runner;
mod tui;

pub use app::{execute, run, Cli};
pub use output::{announcement, Output};
pub use runner::{Launcher, ScriptRunner, StdStreams};
pub use tui::{PickerItem, ScriptRow, Selection, Selector, TerminalSelector};
