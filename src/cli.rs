//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `fixturecap`.
#[derive(Debug, Parser)]
#[command(name = "fixturecap", version, about = "Record observed API traffic as test fixtures")]
pub struct Cli {
    /// Settings shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Options that override the layered recorder configuration.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// YAML file with recorder settings.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Directory fixtures are written under.
    #[arg(long, global = true, value_name = "DIR")]
    pub output_root: Option<PathBuf>,
    /// Only exchanges for this host are recorded.
    #[arg(long, global = true, value_name = "HOST")]
    pub target_host: Option<String>,
    /// Do not record destructive (`danger`) endpoints.
    #[arg(long, global = true)]
    pub skip_danger: bool,
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the category/operation a request path classifies to.
    Classify {
        /// Request path, with or without a query string.
        path: String,
    },
    /// Print the generalized matching pattern for a request path.
    Pattern {
        /// Request path, with or without a query string.
        path: String,
    },
    /// List the endpoint catalog in match order.
    Catalog,
    /// Record a single exchange.
    Record {
        /// Request method.
        #[arg(long, default_value = "GET")]
        method: String,
        /// Request target, optionally including a query string.
        #[arg(long)]
        target: String,
        /// Response status code.
        #[arg(long, default_value_t = 200)]
        status: u16,
        /// Request host; defaults to the configured target host.
        #[arg(long)]
        host: Option<String>,
        /// File holding the raw response body.
        #[arg(long, value_name = "FILE")]
        body_file: Option<PathBuf>,
        /// Run the pipeline without touching disk and print the document.
        #[arg(long)]
        dry_run: bool,
    },
    /// Record exchanges read as JSON lines from a file or stdin.
    ///
    /// Each line is `{host, method, path, query?, status, body?, body_base64?}`.
    /// Use `body_base64` for response bodies that are not UTF-8 text.
    Ingest {
        /// Input file; `-` or omitted reads stdin.
        input: Option<PathBuf>,
        /// Run the pipeline without touching disk.
        #[arg(long)]
        dry_run: bool,
    },
    /// Check a recorded fixture tree for inconsistent documents.
    Check {
        /// Fixture root; defaults to the configured output root.
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_classify_subcommand() {
        let cli = Cli::parse_from(["fixturecap", "classify", "/api/v1/charges.json"]);
        assert!(matches!(
            cli.command,
            Command::Classify { ref path } if path == "/api/v1/charges.json"
        ));
    }

    #[test]
    fn record_defaults() {
        let cli = Cli::parse_from(["fixturecap", "record", "--target", "/api/v1/users/me.json"]);
        match cli.command {
            Command::Record { method, status, host, body_file, dry_run, .. } => {
                assert_eq!(method, "GET");
                assert_eq!(status, 200);
                assert!(host.is_none());
                assert!(body_file.is_none());
                assert!(!dry_run);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from([
            "fixturecap",
            "ingest",
            "-",
            "--skip-danger",
            "--output-root",
            "out",
        ]);
        assert!(cli.global.skip_danger);
        assert_eq!(cli.global.output_root.as_deref(), Some(std::path::Path::new("out")));
    }

    #[test]
    fn record_requires_target() {
        assert!(Cli::try_parse_from(["fixturecap", "record"]).is_err());
    }
}
