//! Human-readable table output.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;

use crate::models::ResolutionResult;

const ABSENT: &str = "-";

/// Writes an aligned text table, one line per result.
///
/// Results carrying an error get an indented second line with the message.
/// Colors follow the `colored` crate's global override, so they disappear
/// when stdout is not a terminal or `NO_COLOR` is set.
pub fn write_table<W: Write>(writer: &mut W, results: &[ResolutionResult]) -> Result<usize> {
    let campaign_width = column_width("CAMPAIGN", results, |r| r.campaign.as_deref());
    let marker_width = column_width("MARKER", results, |r| r.campaign_marker.as_deref());

    writeln!(
        writer,
        "{:>3}  {:<7}  {:<campaign_width$}  {:<marker_width$}  FINAL URL",
        "#", "SOURCE", "CAMPAIGN", "MARKER"
    )
    .context("Failed to write table header")?;

    for (index, result) in results.iter().enumerate() {
        let campaign = result.campaign.as_deref().unwrap_or(ABSENT);
        let marker = result.campaign_marker.as_deref().unwrap_or(ABSENT);
        let source = format!("{:<7}", result.source.as_str());
        let source = if result.is_complete() {
            source.green()
        } else {
            source.yellow()
        };

        writeln!(
            writer,
            "{:>3}  {}  {:<campaign_width$}  {:<marker_width$}  {}",
            index + 1,
            source,
            campaign,
            marker,
            result.final_url
        )
        .context("Failed to write table row")?;

        if let Some(error) = &result.error {
            writeln!(writer, "     {}", error.red()).context("Failed to write table row")?;
        }
    }

    writer.flush().context("Failed to flush table output")?;
    Ok(results.len())
}

fn column_width<F>(title: &str, results: &[ResolutionResult], value: F) -> usize
where
    F: Fn(&ResolutionResult) -> Option<&str>,
{
    results
        .iter()
        .map(|r| value(r).map_or(ABSENT.len(), |v| v.chars().count()))
        .chain(std::iter::once(title.len()))
        .max()
        .unwrap_or(title.len())
}
