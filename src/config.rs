// src/config.rs
// =============================================================================
// Resolved run settings.
//
// The CLI holds what the user typed; Config holds what the run will use, with
// defaults filled in and out-of-range values rejected up front.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::checker::default_concurrency;
use crate::cli::Cli;
use crate::report::Format;

#[derive(Debug, Clone)]
pub struct Config {
    pub urls: Vec<String>,
    pub file: Option<PathBuf>,
    pub concurrency: usize,
    pub timeout: Duration,
    pub format: Format,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        if cli.urls.is_empty() && cli.file.is_none() {
            bail!("no URLs given: pass them as arguments or with --file");
        }

        let concurrency = match cli.concurrency {
            Some(0) => bail!("--concurrency must be at least 1"),
            Some(n) => n,
            None => default_concurrency(),
        };

        if cli.timeout == 0 {
            bail!("--timeout must be at least 1 second");
        }

        Ok(Self {
            urls: cli.urls,
            file: cli.file,
            concurrency,
            timeout: Duration::from_secs(cli.timeout),
            format: if cli.json { Format::Json } else { Format::Text },
        })
    }
}
