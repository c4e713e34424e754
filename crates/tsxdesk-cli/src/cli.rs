//! CLI argument definitions for tsxdesk.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `symbols` | Print the exchange's interlisted symbol directory |
//! | `info` | Four-tab company report for one ticker |
//! | `etf` | ETF report with the strong-ETF screen |
//! | `export` | Write the symbol directory to an xlsx file |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! tsxdesk info RY.TO
//! tsxdesk etf XIU.TO --format json --pretty
//! tsxdesk export --dir ./exports
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// TSX symbol directory and company lookups from the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "tsxdesk",
    author,
    version,
    about = "TSX symbol directory, company reports and symbol export"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for terminal display.
    Table,
    /// Single JSON object.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and print the interlisted symbol directory.
    Symbols,

    /// Show the Company, Market, Financial and Analysis tabs for a ticker.
    ///
    /// # Examples
    ///
    ///   tsxdesk info RY.TO
    ///   tsxdesk info shop.to --format json
    Info(TickerArgs),

    /// Show an ETF overview and whether it passes the strong-ETF screen.
    Etf(TickerArgs),

    /// Export the symbol directory to tsx_symbols.xlsx (or the next free name).
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct TickerArgs {
    /// Ticker symbol, e.g. RY.TO.
    pub ticker: String,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output directory; overrides TSXDESK_EXPORT_DIR.
    #[arg(long)]
    pub dir: Option<PathBuf>,
}
