// src/checker/mod.rs
// =============================================================================
// Link probing.
//
// Submodules:
// - http: one HEAD request with a deadline
// - pool: a fixed set of workers draining a queue of URLs through the checker
// =============================================================================

mod http;
mod pool;

pub use http::{CheckResult, Checker, DEFAULT_TIMEOUT};
pub use pool::{check_all, default_concurrency, WorkerPool};
