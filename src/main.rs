//! Tick - a local-first to-do list for the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = tick_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
