//! Output helpers for CLI messages

/// Output helper for consistent formatting
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    verbose: bool,
}

impl Output {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Prints the command about to run, e.g. `> npm run test`
    pub fn announce(&self, program: &str, script: &str) {
        println!("{}", announcement(program, script));
    }

    /// Prints a non-fatal warning
    pub fn warn(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}

/// Formats the line printed before a script is launched
pub fn announcement(program: &str, script: &str) -> String {
    format!("> {} run {}", program, script)
}
