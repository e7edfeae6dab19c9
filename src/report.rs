// src/report.rs
// =============================================================================
// Renders failures for the terminal or as JSON.
//
// Results arrive in completion order; both formats sort them by URL so two
// runs over the same batch print the same thing.
// =============================================================================

use anyhow::Result;

use crate::checker::CheckResult;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// Renders `results` in the requested format.
pub fn render(results: &[CheckResult], format: Format) -> Result<String> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| a.url.cmp(&b.url).then(a.status_code.cmp(&b.status_code)));

    match format {
        Format::Text => Ok(render_text(&sorted)),
        Format::Json => Ok(serde_json::to_string_pretty(&sorted)? + "\n"),
    }
}

fn render_text(results: &[CheckResult]) -> String {
    results
        .iter()
        .map(|r| format!("Status '{}': {}\n", r.status_code, r.url))
        .collect()
}

/// One-line summary, logged once the batch is done.
pub fn summary(checked: usize, failed: usize) -> String {
    format!("checked {checked} URL(s), {failed} did not answer 200")
}
