//! Result output for the command line.
//!
//! Renders resolved results as an aligned table (default), JSON Lines or CSV,
//! to a file or to stdout.

mod csv;
mod jsonl;
mod pipe;
mod table;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::OutputFormat;
use crate::models::ResolutionResult;

pub use self::csv::write_csv;
pub use jsonl::write_jsonl;
pub use pipe::IgnoreBrokenPipe;
pub use table::write_table;

/// Writes `results` in `format` to `output`, or to stdout when `output` is `None`.
///
/// Returns the number of records written.
pub fn write_results(
    results: &[ResolutionResult],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<usize> {
    let mut writer: Box<dyn Write> = if let Some(path) = output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(IgnoreBrokenPipe::new(io::stdout().lock()))
    };

    match format {
        OutputFormat::Table => write_table(&mut writer, results),
        OutputFormat::Jsonl => write_jsonl(&mut writer, results),
        OutputFormat::Csv => write_csv(&mut writer, results),
    }
}
