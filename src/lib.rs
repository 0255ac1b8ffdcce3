//! npm-pick - Pick a package.json script and run it
//!
//! Lists the `scripts` table of the project in the current directory in an
//! interactive, filterable terminal list. The script chosen last in each
//! directory is offered again at the top of the list.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{ScriptCatalog, ScriptEntry};
