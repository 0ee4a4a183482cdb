//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    BROWSER_OBSERVE_WINDOW_MS, BROWSER_POLL_INTERVAL_MS, DEFAULT_CONCURRENCY, DEFAULT_SERVER_PORT,
    DEFAULT_USER_AGENT, HTML_SNIFF_LIMIT, MAX_HOPS, REQUEST_TIMEOUT_MS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How resolution results are written by the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table
    Table,
    /// One JSON object per line
    Jsonl,
    /// Comma-separated values with a header row
    Csv,
}

/// Resolver configuration.
///
/// Parsed from the command line by the binary, or built programmatically with
/// `..Default::default()` by library users.
///
/// # Examples
///
/// ```no_run
/// use link_redirect::Config;
///
/// let config = Config {
///     browser: true,
///     max_hops: 8,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "link_redirect",
    about = "Follows redirect chains and extracts campaign markers from the URLs visited."
)]
pub struct Config {
    /// File with one URL per line (`-` reads stdin)
    #[arg(value_parser, default_value = "-")]
    pub file: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Result format: table|jsonl|csv
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,

    /// Write results to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Fall back to a headless browser when the HTTP chain does not surface both markers
    #[arg(long)]
    pub browser: bool,

    /// Serve the HTML view endpoint instead of reading a file (bare flag uses the default port)
    #[arg(long, value_name = "PORT")]
    pub serve: Option<Option<u16>>,

    /// Maximum hops followed per URL
    #[arg(long, default_value_t = MAX_HOPS)]
    pub max_hops: usize,

    /// Per-request timeout in milliseconds (fetch and browser navigation)
    #[arg(long, default_value_t = REQUEST_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Maximum body bytes read for redirect sniffing
    #[arg(long, default_value_t = HTML_SNIFF_LIMIT)]
    pub sniff_limit: usize,

    /// Browser observation window after load, in milliseconds
    #[arg(long, default_value_t = BROWSER_OBSERVE_WINDOW_MS)]
    pub observe_window_ms: u64,

    /// Browser location polling interval, in milliseconds
    #[arg(long, default_value_t = BROWSER_POLL_INTERVAL_MS)]
    pub poll_interval_ms: u64,

    /// User-Agent sent by the fetcher and set on browser pages
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Chrome/Chromium executable (auto-detected when omitted)
    #[arg(long, env = "CHROME_EXECUTABLE")]
    pub chrome_executable: Option<PathBuf>,

    /// URLs resolved at once within a batch (output order is always preserved)
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
}

impl Config {
    /// Timeout applied to each fetch and to browser navigation.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// How long the browser watches the page location after load.
    pub fn observe_window(&self) -> Duration {
        Duration::from_millis(self.observe_window_ms)
    }

    /// Delay between location reads during the observation window.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Port for the view server, or `None` in batch mode. A bare `--serve`
    /// uses `DEFAULT_SERVER_PORT`.
    pub fn serve_port(&self) -> Option<u16> {
        self.serve.map(|port| port.unwrap_or(DEFAULT_SERVER_PORT))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("-"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            output_format: OutputFormat::Table,
            output: None,
            browser: false,
            serve: None,
            max_hops: MAX_HOPS,
            timeout_ms: REQUEST_TIMEOUT_MS,
            sniff_limit: HTML_SNIFF_LIMIT,
            observe_window_ms: BROWSER_OBSERVE_WINDOW_MS,
            poll_interval_ms: BROWSER_POLL_INTERVAL_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_executable: None,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_hops, 12);
        assert_eq!(config.timeout_ms, 12_000);
        assert_eq!(config.sniff_limit, 131_072);
        assert_eq!(config.observe_window_ms, 4_000);
        assert_eq!(config.poll_interval_ms, 300);
        assert_eq!(config.concurrency, 1);
        assert!(!config.browser);
        assert!(config.serve.is_none());
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_config_durations() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(12));
        assert_eq!(config.observe_window(), Duration::from_secs(4));
        assert_eq!(config.poll_interval(), Duration::from_millis(300));
    }

    #[test]
    fn test_cli_defaults_match_config_default() {
        let parsed = Config::try_parse_from(["link_redirect"]).expect("parse with no args");
        let default = Config::default();
        assert_eq!(parsed.file, default.file);
        assert_eq!(parsed.max_hops, default.max_hops);
        assert_eq!(parsed.timeout_ms, default.timeout_ms);
        assert_eq!(parsed.sniff_limit, default.sniff_limit);
        assert_eq!(parsed.user_agent, default.user_agent);
        assert_eq!(parsed.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_cli_overrides() {
        let parsed = Config::try_parse_from([
            "link_redirect",
            "urls.txt",
            "--browser",
            "--max-hops",
            "3",
            "--output-format",
            "jsonl",
            "--concurrency",
            "4",
        ])
        .expect("parse overrides");
        assert_eq!(parsed.file, PathBuf::from("urls.txt"));
        assert!(parsed.browser);
        assert_eq!(parsed.max_hops, 3);
        assert_eq!(parsed.output_format, OutputFormat::Jsonl);
        assert_eq!(parsed.concurrency, 4);
    }

    #[test]
    fn test_serve_port_is_optional() {
        let bare = Config::try_parse_from(["link_redirect", "--serve"]).expect("bare --serve");
        assert_eq!(bare.serve, Some(None));
        assert_eq!(bare.serve_port(), Some(DEFAULT_SERVER_PORT));

        let explicit =
            Config::try_parse_from(["link_redirect", "--serve", "8081"]).expect("--serve 8081");
        assert_eq!(explicit.serve_port(), Some(8081));

        let batch = Config::try_parse_from(["link_redirect", "links.txt"]).expect("batch");
        assert_eq!(batch.serve_port(), None);
    }

    #[test]
    fn test_serve_port_follows_default_constant() {
        let config = Config {
            serve: Some(None),
            ..Default::default()
        };
        assert_eq!(config.serve_port(), Some(DEFAULT_SERVER_PORT));
    }
}
