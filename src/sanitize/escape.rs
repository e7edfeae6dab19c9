// src/sanitize/escape.rs
// =============================================================================
// Percent-encoding of path segments.
//
// Only the path is touched. Query string and fragment are split off first
// and glued back on verbatim, so pre-encoded query values survive unchanged.
// =============================================================================

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

// Everything except unreserved characters and the sub-delimiters that are
// legal inside a path segment. '%' stays in the set: a lone '%' must become
// "%25", valid escapes are copied before this set is consulted.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Rebuilds `raw` with every path segment percent-encoded.
///
/// Returns `None` when there is nothing to encode: the string has no `://`
/// separator, or nothing follows the host. The caller then parses the raw
/// input as-is.
pub(crate) fn encode_path(raw: &str) -> Option<String> {
    if !raw.contains("://") {
        return None;
    }

    let (without_query, query, fragment) = split_query_and_fragment(raw);
    let (scheme, host_and_path) = without_query.split_once("://")?;

    // Host (with any userinfo/port) is left alone.
    let (host, path) = host_and_path.split_once('/')?;

    let encoded: Vec<String> = path.split('/').map(escape_segment).collect();

    let mut rebuilt = String::with_capacity(raw.len() + 16);
    rebuilt.push_str(scheme);
    rebuilt.push_str("://");
    rebuilt.push_str(host);
    rebuilt.push('/');
    rebuilt.push_str(&encoded.join("/"));
    if !query.is_empty() {
        rebuilt.push('?');
        rebuilt.push_str(query);
    }
    if !fragment.is_empty() {
        rebuilt.push('#');
        rebuilt.push_str(fragment);
    }

    Some(rebuilt)
}

/// Splits `raw` into the part before the query, the query and the fragment.
///
/// The fragment starts at the first `#`, the query at the first `?` before
/// it. Missing pieces come back empty.
pub(crate) fn split_query_and_fragment(raw: &str) -> (&str, &str, &str) {
    let (without_fragment, fragment) = raw.split_once('#').unwrap_or((raw, ""));
    let (without_query, query) = without_fragment
        .split_once('?')
        .unwrap_or((without_fragment, ""));
    (without_query, query, fragment)
}

/// True when `raw` starts with `scheme://`, the scheme being a letter
/// followed by letters, digits, `+`, `-` or `.`.
pub(crate) fn has_scheme_separator(raw: &str) -> bool {
    let Some((scheme, _)) = raw.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Percent-encodes a single path segment without double-encoding.
///
/// `"a b"` becomes `"a%20b"`, `"a%20b"` is returned unchanged and
/// `"100%"` becomes `"100%25"`.
pub(crate) fn escape_segment(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut out = String::with_capacity(segment.len());
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if is_escape_sequence(&bytes[i..]) {
            out.extend(utf8_percent_encode(&segment[run_start..i], PATH_SEGMENT));
            out.push_str(&segment[i..i + 3]);
            i += 3;
            run_start = i;
        } else {
            i += 1;
        }
    }
    out.extend(utf8_percent_encode(&segment[run_start..], PATH_SEGMENT));

    out
}

// True when `bytes` starts with '%' followed by two hex digits.
fn is_escape_sequence(bytes: &[u8]) -> bool {
    matches!(bytes, [b'%', hi, lo, ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
}
