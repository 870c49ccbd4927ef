//! CLI argument definitions for obb.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `historical` | Daily OHLCV history for one symbol |
//! | `compare` | Latest close and period change for several symbols |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--yahoo-base-url` | `https://query2.finance.yahoo.com` | Chart API base URL |
//! | `--upstream-timeout-ms` | `10000` | Upstream request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! obb historical AAPL --start-date 2024-01-01 --end-date 2024-01-31
//! obb historical MSFT --tail 5 --format json --pretty
//! obb compare AAPL MSFT GOOGL --start-date 2024-01-01
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use obb_core::adapters::yahoo::DEFAULT_BASE_URL;

/// Historical equity prices from the command line.
#[derive(Debug, Parser)]
#[command(name = "obb", author, version, about = "Historical equity prices from the command line")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Base URL of the Yahoo Finance chart API.
    #[arg(long, global = true, env = "OBB_YAHOO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub yahoo_base_url: String,

    /// Upstream request timeout in milliseconds.
    #[arg(long, global = true, env = "OBB_UPSTREAM_TIMEOUT_MS", default_value_t = 10_000)]
    pub upstream_timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table plus period statistics.
    Table,
    /// JSON document.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch daily OHLCV history for a symbol.
    ///
    /// Dates are YYYY-MM-DD. Without --start-date the last 365 days are
    /// fetched; without --end-date the range ends today.
    ///
    ///   obb historical AAPL
    ///   obb historical AAPL --start-date 2024-01-01 --end-date 2024-01-05
    Historical(HistoricalArgs),

    /// Compare latest close and period change across symbols.
    ///
    /// A symbol that fails is reported on stderr; the rest still print.
    ///
    ///   obb compare AAPL MSFT GOOGL
    Compare(CompareArgs),
}

/// Arguments for the `historical` command.
#[derive(Debug, Args)]
pub struct HistoricalArgs {
    /// Market symbol (e.g., AAPL, MSFT, ^GSPC).
    pub symbol: String,

    /// First date to include (YYYY-MM-DD).
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last date to include (YYYY-MM-DD).
    #[arg(long)]
    pub end_date: Option<String>,

    /// Only show the most recent N bars.
    #[arg(long)]
    pub tail: Option<usize>,
}

/// Arguments for the `compare` command.
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Two or more market symbols.
    #[arg(required = true, num_args = 1..)]
    pub symbols: Vec<String>,

    /// First date to include (YYYY-MM-DD).
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last date to include (YYYY-MM-DD).
    #[arg(long)]
    pub end_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn historical_parses_dates_and_tail() {
        let cli = Cli::try_parse_from([
            "obb",
            "historical",
            "AAPL",
            "--start-date",
            "2024-01-01",
            "--tail",
            "5",
            "--format",
            "json",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Historical(args) => {
                assert_eq!(args.symbol, "AAPL");
                assert_eq!(args.start_date.as_deref(), Some("2024-01-01"));
                assert_eq!(args.end_date, None);
                assert_eq!(args.tail, Some(5));
            }
            other => panic!("expected historical, got {other:?}"),
        }
    }

    #[test]
    fn compare_requires_a_symbol() {
        assert!(Cli::try_parse_from(["obb", "compare"]).is_err());

        let cli = Cli::try_parse_from(["obb", "compare", "AAPL", "MSFT"]).expect("parses");
        match cli.command {
            Command::Compare(args) => assert_eq!(args.symbols, vec!["AAPL", "MSFT"]),
            other => panic!("expected compare, got {other:?}"),
        }
    }

    #[test]
    fn upstream_timeout_is_a_global_flag() {
        let cli = Cli::try_parse_from(["obb", "historical", "AAPL", "--upstream-timeout-ms", "250"])
            .expect("parses");
        assert_eq!(cli.upstream_timeout_ms, 250);
        assert_eq!(cli.format, OutputFormat::Table);
    }
}
