// src/checker/pool.rs
// =============================================================================
// A fixed-size pool of workers that probe URLs taken from a shared queue.
//
// How it works:
// 1. The producer fills the input queue and closes it
// 2. `concurrency` tokio tasks each pull one URL at a time until the queue is
//    closed and empty
// 3. Every non-200 answer is pushed to the output queue
// 4. Once every task has been joined the pool closes the output queue, and
//    only then does the consumer drain it
//
// Step 4 is what keeps the pool leak-free: nothing sends on the output queue
// after it is closed, and nothing reads it while workers are still running.
// =============================================================================

use async_channel::{Receiver, Sender};
use tokio::task::JoinSet;

use super::http::{CheckResult, Checker};

/// Twice the number of available CPUs, or 2 when that cannot be determined.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        * 2
}

/// Runs [`Checker`] probes on a fixed number of concurrent workers.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    checker: Checker,
    concurrency: usize,
}

impl WorkerPool {
    /// Creates a pool; `concurrency` is raised to 1 if given as 0.
    pub fn new(checker: Checker, concurrency: usize) -> Self {
        Self {
            checker,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Drains `input` with `concurrency` workers and reports failures on `output`.
    ///
    /// Returns once every worker has exited, at which point `output` is closed.
    /// The caller must close `input` (or drop every sender) for this to return.
    pub async fn run(&self, input: Receiver<String>, output: Sender<CheckResult>) {
        let mut workers = JoinSet::new();

        for id in 0..self.concurrency {
            let input = input.clone();
            let output = output.clone();
            let checker = self.checker.clone();
            workers.spawn(worker(id, checker, input, output));
        }

        // Barrier: every worker has finished before the output queue closes.
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!("worker task failed: {}", e);
            }
        }

        output.close();
    }
}

// One execution unit: Idle -> Fetching -> (Reporting | Idle), Done when the
// input queue is closed and empty.
async fn worker(id: usize, checker: Checker, input: Receiver<String>, output: Sender<CheckResult>) {
    while let Ok(url) = input.recv().await {
        match checker.check(&url).await {
            Ok(200) => {
                tracing::debug!(worker = id, url = %url, "ok");
            }
            Ok(status_code) => {
                tracing::debug!(worker = id, url = %url, status_code, "non-success status");
                if output.send(CheckResult { url, status_code }).await.is_err() {
                    tracing::error!(worker = id, "result queue closed early, stopping");
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(worker = id, kind = ?e.transport_kind(), "{}", e);
            }
        }
    }
    tracing::trace!(worker = id, "input queue drained");
}

/// Probes a known-size batch and returns every non-200 result.
///
/// Both queues are sized to the batch so neither side ever waits on capacity.
/// Results come back in completion order, not submission order.
pub async fn check_all(pool: &WorkerPool, urls: Vec<String>) -> Vec<CheckResult> {
    let capacity = urls.len().max(1);
    let (input_tx, input_rx) = async_channel::bounded(capacity);
    let (output_tx, output_rx) = async_channel::bounded(capacity);

    for url in urls {
        // Cannot fail: the queue holds the whole batch and the receiver is alive.
        if input_tx.send(url).await.is_err() {
            break;
        }
    }
    input_tx.close();

    pool.run(input_rx, output_tx).await;

    let mut results = Vec::with_capacity(output_rx.len());
    while let Ok(result) = output_rx.recv().await {
        results.push(result);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::http::DEFAULT_TIMEOUT;
    use crate::checker::test_support::refused_url;
    use std::time::{Duration, Instant};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pool(concurrency: usize) -> WorkerPool {
        WorkerPool::new(Checker::new(DEFAULT_TIMEOUT).unwrap(), concurrency)
    }

    async fn server_with(routes: &[(&str, u16)]) -> MockServer {
        let server = MockServer::start().await;
        for (route, status) in routes {
            Mock::given(method("HEAD"))
                .and(path(*route))
                .respond_with(ResponseTemplate::new(*status))
                .mount(&server)
                .await;
        }
        server
    }

    fn sorted(mut results: Vec<CheckResult>) -> Vec<CheckResult> {
        results.sort_by(|a, b| a.url.cmp(&b.url));
        results
    }

    #[test]
    fn test_concurrency_is_at_least_one() {
        assert_eq!(pool(0).concurrency(), 1);
        assert_eq!(pool(7).concurrency(), 7);
        assert!(default_concurrency() >= 2);
    }

    #[tokio::test]
    async fn test_status_ok_produces_no_result() {
        let server = server_with(&[("/", 200)]).await;
        let results = check_all(&pool(1), vec![server.uri()]).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_status_not_found_is_reported() {
        let server = server_with(&[("/", 404)]).await;
        let results = check_all(&pool(1), vec![server.uri()]).await;
        assert_eq!(
            results,
            vec![CheckResult {
                url: server.uri(),
                status_code: 404
            }]
        );
    }

    #[tokio::test]
    async fn test_only_failures_for_every_concurrency() {
        let server = server_with(&[
            ("/a", 200),
            ("/b", 404),
            ("/c", 500),
            ("/d", 200),
            ("/e", 503),
            ("/f", 200),
        ])
        .await;
        let urls: Vec<String> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|p| format!("{}/{}", server.uri(), p))
            .collect();

        let expected = vec![
            CheckResult {
                url: format!("{}/b", server.uri()),
                status_code: 404,
            },
            CheckResult {
                url: format!("{}/c", server.uri()),
                status_code: 500,
            },
            CheckResult {
                url: format!("{}/e", server.uri()),
                status_code: 503,
            },
        ];

        for concurrency in 1..=urls.len() {
            let results = check_all(&pool(concurrency), urls.clone()).await;
            assert_eq!(sorted(results), expected, "concurrency {concurrency}");
        }
    }

    #[tokio::test]
    async fn test_unreachable_produces_no_result_and_terminates() {
        let started = Instant::now();
        let results = check_all(&pool(2), vec![refused_url(), refused_url()]).await;
        assert!(results.is_empty());
        assert!(started.elapsed() < DEFAULT_TIMEOUT + Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_mixed_batch_across_two_servers() {
        let first = server_with(&[("/active", 200), ("/inactive", 404)]).await;
        let second = server_with(&[("/active", 200)]).await;

        let inactive = format!("{}/inactive", first.uri());
        let urls = vec![
            format!("{}/active", first.uri()),
            inactive.clone(),
            format!("{}/active", second.uri()),
            refused_url(),
        ];

        let results = check_all(&pool(3), urls).await;
        assert_eq!(
            results,
            vec![CheckResult {
                url: inactive,
                status_code: 404
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_batch() {
        assert!(check_all(&pool(4), Vec::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_run_closes_output_after_workers_exit() {
        let server = server_with(&[("/missing", 404)]).await;
        let (input_tx, input_rx) = async_channel::bounded(2);
        let (output_tx, output_rx) = async_channel::bounded(2);

        input_tx
            .send(format!("{}/missing", server.uri()))
            .await
            .unwrap();
        input_tx.close();

        pool(2).run(input_rx, output_tx).await;

        assert!(output_rx.is_closed());
        assert_eq!(output_rx.len(), 1);
        let result = output_rx.recv().await.unwrap();
        assert_eq!(result.status_code, 404);
        assert!(output_rx.recv().await.is_err());
    }
}
