//! JSONL output.
//!
//! One JSON object per line, with the same camelCase field names the HTTP
//! layer exposes. Suited for piping to `jq`.

use anyhow::{Context, Result};
use std::io::Write;

use crate::models::ResolutionResult;

/// Writes one JSON object per result. Returns the number of records written.
pub fn write_jsonl<W: Write>(writer: &mut W, results: &[ResolutionResult]) -> Result<usize> {
    for result in results {
        serde_json::to_writer(&mut *writer, result)
            .context("Failed to serialize result to JSON")?;
        writeln!(writer).context("Failed to write JSONL line")?;
    }
    writer.flush().context("Failed to flush JSONL output")?;
    Ok(results.len())
}
