//! svcreg - Entry Point
//!
//! Lives in the `svcreg` facade crate next to the library it drives.

use clap::Parser;
use std::process::ExitCode;
use svcreg::cli::{Cli, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
