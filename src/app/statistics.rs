//! Batch statistics.

use log::info;

use crate::models::{ResolutionResult, Source};

/// Summary counts for one resolved batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStatistics {
    pub total: usize,
    /// Results carrying both markers
    pub complete: usize,
    /// Results produced by the browser fallback
    pub from_browser: usize,
    /// Results carrying an error
    pub errors: usize,
}

impl BatchStatistics {
    pub fn from_results(results: &[ResolutionResult]) -> Self {
        results.iter().fold(Self::default(), |mut stats, result| {
            stats.total += 1;
            if result.is_complete() {
                stats.complete += 1;
            }
            if result.source == Source::Browser {
                stats.from_browser += 1;
            }
            if result.error.is_some() {
                stats.errors += 1;
            }
            stats
        })
    }
}

/// Logs a one-line summary of the batch.
pub fn print_batch_statistics(stats: &BatchStatistics, elapsed_seconds: f64) {
    info!(
        "Resolved {} URL{} in {:.1}s: {} with both markers, {} via browser, {} with errors",
        stats.total,
        if stats.total == 1 { "" } else { "s" },
        elapsed_seconds,
        stats.complete,
        stats.from_browser,
        stats.errors
    );
}
