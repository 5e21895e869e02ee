//! Passive fixture recorder for a fixed API host.
//!
//! Observed request/response exchanges are classified against an ordered
//! endpoint catalog ([`classify`]), their paths generalized into reusable
//! matching patterns ([`pattern`]), and persisted as JSON fixture documents
//! that never overwrite one another ([`fixture`]).

pub mod adapters;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod exchange;
pub mod fixture;
pub mod inventory;
pub mod logging;
pub mod pattern;
pub mod ports;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    logging::init(cli.global.json_logs);
    commands::dispatch(&cli)
}
