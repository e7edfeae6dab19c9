// src/checker/http.rs
// =============================================================================
// This module checks if a URL is alive by sending a single HTTP HEAD request.
//
// Key functionality:
// - HEAD only (lightweight, no body download)
// - Each request carries its own deadline; one slow host never delays another
// - The response is dropped as soon as the status is read, which hands the
//   connection back to the client's pool
// - Transport failures are classified for the warning that gets logged
// =============================================================================

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{CheckError, TransportKind};

/// Deadline applied to every probe unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A URL whose HEAD request completed with a status other than 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The sanitized URL that was probed
    pub url: String,
    /// The status code the server answered with
    pub status_code: u16,
}

/// Sends HEAD probes through a shared HTTP client.
///
/// Cloning is cheap: `reqwest::Client` is reference counted internally, so
/// every worker clones the same connection pool.
#[derive(Debug, Clone)]
pub struct Checker {
    client: Client,
    timeout: Duration,
}

impl Checker {
    /// Builds a checker whose requests each time out after `timeout`.
    ///
    /// The client's default redirect policy is kept as is.
    pub fn new(timeout: Duration) -> Result<Self, CheckError> {
        let client = Client::builder().build().map_err(CheckError::Client)?;
        Ok(Self { client, timeout })
    }

    /// Probes `url` and returns the status code of the response.
    ///
    /// Any failure to complete the exchange (DNS, refused connection, TLS,
    /// deadline) is a [`CheckError::Transport`].
    pub async fn check(&self, url: &str) -> Result<u16, CheckError> {
        let response = self
            .client
            .head(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        // Body is never read; dropping the response releases the connection.
        let status = response.status().as_u16();
        drop(response);

        Ok(status)
    }
}

// Sorts a reqwest error into a TransportKind.
//
// reqwest only exposes a few predicates, so DNS and TLS failures are
// recognised from the error chain's text.
fn categorize_error(url: &str, error: reqwest::Error) -> CheckError {
    let chain = error_chain(&error).to_lowercase();

    let kind = if error.is_timeout() {
        TransportKind::Timeout
    } else if error.is_redirect() {
        TransportKind::Redirect
    } else if chain.contains("dns") || chain.contains("resolve") {
        TransportKind::Dns
    } else if chain.contains("certificate") || chain.contains("tls") || chain.contains("ssl") {
        TransportKind::Tls
    } else if error.is_connect() {
        TransportKind::Connect
    } else {
        TransportKind::Other
    };

    CheckError::Transport {
        url: url.to_string(),
        kind,
        source: error,
    }
}

// Joins the messages of an error and all of its sources.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text
}
