//! CSV output.
//!
//! Flat view for spreadsheets: one row per input, absent values as empty cells.

use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;

use crate::models::ResolutionResult;

const HEADER: [&str; 6] = [
    "final_url",
    "campaign",
    "campaign_marker",
    "source",
    "hops",
    "error",
];

/// Writes a header row plus one row per result. Returns the number of records written.
pub fn write_csv<W: Write>(writer: W, results: &[ResolutionResult]) -> Result<usize> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer
        .write_record(HEADER)
        .context("Failed to write CSV header")?;

    for result in results {
        let hops = result.hops.to_string();
        csv_writer
            .write_record([
                result.final_url.as_str(),
                result.campaign.as_deref().unwrap_or(""),
                result.campaign_marker.as_deref().unwrap_or(""),
                result.source.as_str(),
                hops.as_str(),
                result.error.as_deref().unwrap_or(""),
            ])
            .context("Failed to write CSV record")?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(results.len())
}
