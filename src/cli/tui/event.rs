//! Event handling for the TUI

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Terminal events the picker reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize event (width, height)
    Resize(u16, u16),
}

/// Reads terminal events on the calling thread
#[derive(Debug, Default)]
pub struct EventSource;

impl EventSource {
    pub fn new() -> Self {
        Self
    }

    /// Blocks until the next key press or resize
    pub fn next(&self) -> Result<Event> {
        loop {
            match event::read()? {
                // Only key presses, not releases or repeats
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Event::Key(key));
                }
                CrosstermEvent::Resize(w, h) => return Ok(Event::Resize(w, h)),
                _ => {}
            }
        }
    }
}
