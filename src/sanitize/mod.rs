// src/sanitize/mod.rs
// =============================================================================
// Turns untrusted strings into absolute, percent-encoded http(s) URLs.
//
// How it works:
// 1. Reject anything that does not start with `scheme://`
// 2. Percent-encode each path segment (see escape.rs)
// 3. Parse the result with the `url` crate
// 4. Reject anything that is not http/https or has no hostname
// 5. Return the parser's canonical scheme, host and path, followed by the
//    input's own query and fragment
//
// The result is stable: feeding a sanitized URL back in returns it unchanged.
// =============================================================================

mod escape;

use std::collections::HashSet;

use url::{Position, Url};

use crate::error::SanitizeError;

/// Receives every input the sanitizer rejects.
///
/// The batch loop takes this as a parameter instead of writing to a global
/// logger, so callers decide where rejections go.
pub trait Diagnostics {
    fn rejected(&mut self, raw: &str, error: &SanitizeError);
}

/// Default sink: one `warn` event per rejected input.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn rejected(&mut self, raw: &str, error: &SanitizeError) {
        tracing::warn!(input = raw, "skipping URL: {}", error);
    }
}

/// Sanitizes a single raw string.
///
/// Input must start with `scheme://`. Strings like `http:example.com` are
/// rejected rather than guessed at. Only path segments are re-encoded: the
/// query and fragment of the input are copied onto the result verbatim.
///
/// # Examples
///
/// `"http://example.com/100% unencoded path"` becomes
/// `"http://example.com/100%25%20unencoded%20path"`, `"ftp://example.com"`
/// fails with [`SanitizeError::UnsupportedScheme`].
pub fn sanitize(raw: &str) -> Result<String, SanitizeError> {
    if !escape::has_scheme_separator(raw) {
        return Err(SanitizeError::InvalidUrl {
            input: raw.to_string(),
            reason: url::ParseError::RelativeUrlWithoutBase,
        });
    }

    let encoded = escape::encode_path(raw);
    let has_explicit_path = encoded.is_some();
    let candidate = encoded.as_deref().unwrap_or(raw);

    let url = Url::parse(candidate).map_err(|reason| match reason {
        url::ParseError::EmptyHost => SanitizeError::MissingHost {
            input: raw.to_string(),
        },
        reason => SanitizeError::InvalidUrl {
            input: raw.to_string(),
            reason,
        },
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(SanitizeError::UnsupportedScheme {
            scheme: url.scheme().to_string(),
        });
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(SanitizeError::MissingHost {
            input: raw.to_string(),
        });
    }

    // The parser always serializes a root path; drop it again when the input
    // never had one.
    let mut sanitized = if !has_explicit_path && url.path() == "/" {
        url[..Position::BeforePath].to_string()
    } else {
        url[..Position::AfterPath].to_string()
    };

    // The parser would re-encode these; keep them as given.
    let (_, query, fragment) = escape::split_query_and_fragment(raw);
    if !query.is_empty() {
        sanitized.push('?');
        sanitized.push_str(query);
    }
    if !fragment.is_empty() {
        sanitized.push('#');
        sanitized.push_str(fragment);
    }

    Ok(sanitized)
}

/// Sanitizes a batch, keeping survivors in input order.
///
/// Rejected inputs are handed to `diagnostics`. Inputs that sanitize to a URL
/// already in the batch are dropped so each target is probed once.
pub fn sanitize_batch<I, S>(raws: I, diagnostics: &mut dyn Diagnostics) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for raw in raws {
        let raw = raw.as_ref();
        match sanitize(raw) {
            Ok(url) => {
                if seen.insert(url.clone()) {
                    urls.push(url);
                } else {
                    tracing::debug!(url = %url, "duplicate URL skipped");
                }
            }
            Err(e) => diagnostics.rejected(raw, &e),
        }
    }

    urls
}
