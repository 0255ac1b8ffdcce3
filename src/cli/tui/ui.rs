//! Terminal initialization and restoration

use std::io::{self, stdout, Stdout};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::{TerminalOptions, Viewport};

/// Terminal type alias
pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Rows used by the picker when drawn inline
const INLINE_HEIGHT: u16 = 16;

/// Initialize the terminal for the picker
pub fn init_terminal(alt_screen: bool) -> Result<Terminal> {
    enable_raw_mode()?;
    let mut stdout = stdout();

    if alt_screen {
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        return Ok(ratatui::Terminal::new(backend)?);
    }

    let backend = CrosstermBackend::new(stdout);
    let terminal = ratatui::Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(INLINE_HEIGHT),
        },
    )?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore_terminal(alt_screen: bool) -> Result<()> {
    disable_raw_mode()?;
    if alt_screen {
        execute!(io::stdout(), LeaveAlternateScreen)?;
    } else {
        println!();
    }
    Ok(())
}
