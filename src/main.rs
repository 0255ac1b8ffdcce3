//! npm-pick - Interactive package.json script runner

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = npm_pick::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
