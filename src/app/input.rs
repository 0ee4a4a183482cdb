//! Newline-delimited URL list parsing.

/// Splits newline-delimited text into candidate URLs.
///
/// Handles `\n` and `\r\n`, trims each entry and drops blank lines and `#`
/// comments. Entries are not validated here: an invalid entry still gets its
/// own (error) result downstream.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
