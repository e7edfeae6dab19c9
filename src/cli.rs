// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Every tuning flag can also come from a HEADCHECK_* environment variable,
// which is handy in CI where the command line is shared between jobs.
// =============================================================================

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::checker::DEFAULT_TIMEOUT;

#[derive(Parser, Debug)]
#[command(
    name = "headcheck",
    version,
    about = "Probe URLs with HEAD requests and report the ones that do not answer 200",
    long_about = "headcheck sanitizes the given URLs, probes them concurrently with HTTP HEAD \
                  requests and prints every URL whose status is not 200. \
                  Unreachable hosts are logged as warnings."
)]
pub struct Cli {
    /// URLs to check
    ///
    /// Example: headcheck https://example.com "https://example.com/a page"
    pub urls: Vec<String>,

    /// Read URLs from a file, one per line ('#' starts a comment)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Number of concurrent workers (default: twice the CPU count)
    #[arg(short, long, env = "HEADCHECK_CONCURRENCY", value_name = "N")]
    pub concurrency: Option<usize>,

    /// Per-request deadline in seconds
    #[arg(
        long,
        env = "HEADCHECK_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_name = "SECS"
    )]
    pub timeout: u64,

    /// Output results in JSON format instead of text
    #[arg(long)]
    pub json: bool,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
