//! Solution name resolution over `pac solution list` output.
//!
//! The listing is free-form text; the contract is only that the line for a
//! solution contains its display name and a `Unique Name: <token>` label.

use anyhow::{anyhow, Result};
use regex::Regex;
use serde::Serialize;

/// Outcome of resolving a display name against the listing text.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The matching line carried a well-formed unique name.
    Matched(String),
    /// A line matched but no unique name could be extracted; the caller
    /// warns and falls back to the display name as the export identifier.
    FallbackDisplayName,
}

/// Find the listing line containing `display_name` and extract its unique name.
///
/// No matching line is fatal. A matching line without an extractable token
/// degrades to [`Resolution::FallbackDisplayName`].
pub fn resolve_unique_name(listing: &str, display_name: &str) -> Result<Resolution> {
    let line = listing
        .lines()
        .find(|line| line.contains(display_name))
        .ok_or_else(|| {
            anyhow!("no solution matching '{display_name}' found in the environment listing")
        })?;
    Ok(match extract_unique_name(line) {
        Some(unique) => Resolution::Matched(unique),
        None => Resolution::FallbackDisplayName,
    })
}

/// One parsed listing row, for machine-readable output.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SolutionRow {
    pub display_name: String,
    pub unique_name: String,
}

/// Parse every listing line carrying a unique-name label into a row.
///
/// Lines without the label (headers, separators, banners) are skipped.
pub fn parse_rows(listing: &str) -> Vec<SolutionRow> {
    let pattern = unique_name_pattern();
    let mut rows = Vec::new();
    for line in listing.lines() {
        let Some(cap) = pattern.captures(line) else {
            continue;
        };
        let Some(matched) = cap.get(0) else {
            continue;
        };
        rows.push(SolutionRow {
            display_name: line[..matched.start()].trim().to_string(),
            unique_name: cap[1].to_string(),
        });
    }
    rows
}

fn extract_unique_name(line: &str) -> Option<String> {
    unique_name_pattern()
        .captures(line)
        .map(|cap| cap[1].to_string())
}

fn unique_name_pattern() -> Regex {
    Regex::new(r"Unique Name:\s*([A-Za-z0-9_]+)").expect("regex for unique name label")
}
