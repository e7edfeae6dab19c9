// src/error.rs
// =============================================================================
// Typed errors for the two fallible pieces of the core.
//
// - SanitizeError: why a raw string was rejected before any request was made
// - CheckError: why a HEAD probe could not be completed
//
// Neither is fatal to a batch. The orchestrator logs them and moves on; only
// main.rs decides when something is worth a non-zero exit.
// =============================================================================

use thiserror::Error;

/// Reasons a raw string cannot become a probe target.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    /// The string does not parse as an absolute URL.
    #[error("'{input}' is not a valid URL: {reason}")]
    InvalidUrl { input: String, reason: url::ParseError },

    /// The URL parsed but its scheme is not http or https.
    #[error("scheme '{scheme}' is not supported (expected http or https)")]
    UnsupportedScheme { scheme: String },

    /// The URL parsed but has no hostname.
    #[error("'{input}' does not have a hostname")]
    MissingHost { input: String },
}

/// Broad category of a transport failure, used for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Timeout,
    Connect,
    Dns,
    Tls,
    Redirect,
    Other,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransportKind::Timeout => "request timed out",
            TransportKind::Connect => "connection failed",
            TransportKind::Dns => "could not resolve hostname",
            TransportKind::Tls => "TLS error",
            TransportKind::Redirect => "too many redirects",
            TransportKind::Other => "request failed",
        };
        f.write_str(label)
    }
}

/// Errors produced by the checker.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The HEAD exchange did not complete.
    #[error("{kind} for {url}: {source}")]
    Transport {
        url: String,
        kind: TransportKind,
        #[source]
        source: reqwest::Error,
    },
}

impl CheckError {
    /// The transport category, if this is a transport failure.
    pub fn transport_kind(&self) -> Option<TransportKind> {
        match self {
            CheckError::Transport { kind, .. } => Some(*kind),
            CheckError::Client(_) => None,
        }
    }
}
