// src/main.rs
// =============================================================================
// This is the entry point of the CLI.
//
// What happens here:
// 1. Parse command-line arguments and resolve them into a Config
// 2. Gather raw URL strings from arguments and/or a file
// 3. Sanitize them, dropping (and logging) the ones that are not usable
// 4. Probe the survivors on the worker pool
// 5. Print the failures and exit (0 = all 200, 1 = failures, 2 = error)
// =============================================================================

mod checker;
mod cli;
mod config;
mod error;
mod input;
mod logging;
mod report;
mod sanitize;

use anyhow::{bail, Result};
use clap::Parser;

use checker::{CheckResult, Checker, WorkerPool};
use cli::Cli;
use config::Config;
use sanitize::{Diagnostics, TracingDiagnostics};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every probed URL answered 200 (or could not be reached)
//   Ok(1) = at least one URL answered with another status
//   Err   = usage or setup error
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let config = Config::from_cli(cli)?;
    let raws = input::collect_raw_urls(&config.urls, config.file.as_deref())?;

    let checker = Checker::new(config.timeout)?;
    let pool = WorkerPool::new(checker, config.concurrency);
    tracing::info!(
        concurrency = pool.concurrency(),
        timeout_secs = config.timeout.as_secs(),
        "checking {} input(s)",
        raws.len()
    );

    let (checked, results) = audit(&raws, &pool, &mut TracingDiagnostics).await?;

    print!("{}", report::render(&results, config.format)?);
    tracing::info!("{}", report::summary(checked, results.len()));

    Ok(if results.is_empty() { 0 } else { 1 })
}

// Sanitizes `raws`, probes the survivors and returns how many were probed
// along with the failures. Having nothing left to probe is an error.
async fn audit(
    raws: &[String],
    pool: &WorkerPool,
    diagnostics: &mut dyn Diagnostics,
) -> Result<(usize, Vec<CheckResult>)> {
    let urls = sanitize::sanitize_batch(raws, diagnostics);
    if urls.is_empty() {
        bail!("no valid URLs to check");
    }

    let checked = urls.len();
    let results = checker::check_all(pool, urls).await;
    Ok((checked, results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SanitizeError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct Rejections(Vec<String>);

    impl Diagnostics for Rejections {
        fn rejected(&mut self, raw: &str, _error: &SanitizeError) {
            self.0.push(raw.to_string());
        }
    }

    fn pool() -> WorkerPool {
        WorkerPool::new(Checker::new(checker::DEFAULT_TIMEOUT).unwrap(), 4)
    }

    #[tokio::test]
    async fn test_audit_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/fine"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/a%20page"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let raws = vec![
            format!("{}/fine", server.uri()),
            format!("{}/a page", server.uri()),
            "ftp://example.com".to_string(),
            "not a url".to_string(),
        ];

        let mut rejections = Rejections::default();
        let (checked, results) = audit(&raws, &pool(), &mut rejections).await.unwrap();

        assert_eq!(checked, 2);
        assert_eq!(rejections.0, vec!["ftp://example.com", "not a url"]);
        assert_eq!(
            results,
            vec![CheckResult {
                url: format!("{}/a%20page", server.uri()),
                status_code: 404,
            }]
        );
    }

    #[tokio::test]
    async fn test_audit_without_valid_urls_fails() {
        let raws = vec!["".to_string(), "example.com".to_string()];
        let mut rejections = Rejections::default();
        let err = audit(&raws, &pool(), &mut rejections).await.unwrap_err();
        assert!(err.to_string().contains("no valid URLs"));
        assert_eq!(rejections.0.len(), 2);
    }
}
