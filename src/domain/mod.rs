//! Domain models for npm-pick
//!
//! Contains the script catalog logic without any I/O concerns.

mod script;

pub use script::{ScriptCatalog, ScriptEntry, LAST_RUN_LABEL};
