// src/input.rs
// =============================================================================
// Gathers the raw URL strings to check.
//
// Sources, in order:
// - positional URL arguments
// - lines of a URL file (one URL per line, '#' starts a comment line)
//
// Nothing here validates URLs; that is the sanitizer's job.
// =============================================================================

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Reads a URL file line by line, skipping blank and comment lines.
pub fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("file {} does not exist", path.display()))?;
    if metadata.is_dir() {
        bail!("given path {} is a directory", path.display());
    }

    let file = File::open(path).with_context(|| format!("error opening {}", path.display()))?;
    parse_lines(BufReader::new(file)).with_context(|| format!("error reading {}", path.display()))
}

fn parse_lines(reader: impl BufRead) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        urls.push(line.to_string());
    }
    Ok(urls)
}

/// Positional arguments first, then the file's lines.
pub fn collect_raw_urls(args: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut raws = args.to_vec();
    if let Some(path) = file {
        let lines = read_url_file(path)?;
        tracing::info!("read {} URL(s) from {}", lines.len(), path.display());
        raws.extend(lines);
    }
    Ok(raws)
}
