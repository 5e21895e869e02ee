//! Binary entrypoint for the `fixturecap` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match fixturecap::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
