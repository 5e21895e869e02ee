//! Command dispatch and handlers.

pub mod catalog;
pub mod check;
pub mod classify;
pub mod ingest;
pub mod pattern;
pub mod record;

use crate::cli::{Cli, Command, GlobalArgs};
use crate::config::RecorderConfig;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if configuration cannot be loaded or the
/// selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    match &cli.command {
        Command::Classify { path } => classify::run(path),
        Command::Pattern { path } => pattern::run(path),
        Command::Catalog => catalog::run(),
        Command::Record { method, target, status, host, body_file, dry_run } => {
            let config = resolve_config(&cli.global)?;
            let request = record::RecordRequest {
                method,
                target,
                status: *status,
                host: host.as_deref(),
                body_file: body_file.as_deref(),
            };
            record::run(config, &request, *dry_run)
        }
        Command::Ingest { input, dry_run } => {
            ingest::run(resolve_config(&cli.global)?, input.as_deref(), *dry_run)
        }
        Command::Check { root } => {
            let config = resolve_config(&cli.global)?;
            check::run(root.as_deref().unwrap_or(&config.output_root))
        }
    }
}

/// Layers defaults, the optional YAML file, the environment, and flags.
///
/// # Errors
///
/// Returns an error string if the config file cannot be read or parsed.
pub fn resolve_config(global: &GlobalArgs) -> Result<RecorderConfig, String> {
    let base = match &global.config {
        Some(path) => RecorderConfig::from_yaml_file(path).map_err(|e| e.to_string())?,
        None => RecorderConfig::default(),
    };
    Ok(apply_flags(base.with_env(), global))
}

fn apply_flags(mut config: RecorderConfig, global: &GlobalArgs) -> RecorderConfig {
    if let Some(root) = &global.output_root {
        config.output_root.clone_from(root);
    }
    if let Some(host) = &global.target_host {
        config.target_host.clone_from(host);
    }
    if global.skip_danger {
        config.skip_danger = true;
    }
    config
}
