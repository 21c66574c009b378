//! Command-line interface definitions for dirdupe.
//!
//! This module defines all CLI arguments and subcommands using the clap derive API.
//! Without a subcommand the interactive shell is started.
//!
//! # Example
//!
//! ```bash
//! # Interactive shell
//! dirdupe
//!
//! # Interactive shell with a default scan path
//! dirdupe shell ~/Documents
//!
//! # One-shot scan: write duplicates to CSV and print a two-level tree
//! dirdupe report ~/Documents --csv dups.csv --depth 2
//!
//! # Debug logging, larger read chunks
//! dirdupe -v --chunk-size 64KiB report ~/Documents
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Directory size tree and duplicate file finder.
///
/// dirdupe scans a directory tree, hashes every file (BLAKE3) and reports
/// groups of identical files as CSV, or directory sizes as a tree view.
#[derive(Debug, Parser)]
#[command(name = "dirdupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Print fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Bytes read per chunk while hashing (e.g., 1024, 4KiB, 1MB)
    #[arg(long, value_name = "SIZE", value_parser = parse_size, global = true)]
    pub chunk_size: Option<u64>,

    /// Skip unreadable files and directories instead of aborting the scan
    #[arg(long, global = true)]
    pub skip_errors: bool,

    /// Subcommand to execute (defaults to the interactive shell)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for dirdupe.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the interactive command shell
    Shell(ShellArgs),
    /// Scan once and print reports without prompting
    Report(ReportArgs),
}

/// Arguments for the shell subcommand.
#[derive(Debug, Args, Default)]
pub struct ShellArgs {
    /// Path used by `scan` when no path is typed
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Arguments for the report subcommand.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Directory to scan
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Write duplicate groups to this CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Print the tree view down to this depth
    ///
    /// The tree is also printed, at the configured depth, when --csv is absent.
    #[arg(short, long, value_name = "N")]
    pub depth: Option<usize>,
}

/// Parse a human-readable size string into bytes.
///
/// Supports the following formats:
/// - Plain bytes: `1024`, `1024B`
/// - Decimal (SI) units: `1KB`, `1MB`, `1GB`, `1TB` (powers of 1000)
/// - Binary (IEC) units: `1KiB`, `1MiB`, `1GiB`, `1TiB` (powers of 1024)
/// - Fractional values: `1.5MB`, `0.5GiB`
///
/// Suffixes are case-insensitive.
///
/// # Examples
///
/// ```
/// use dirdupe::cli::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("4KiB").unwrap(), 4096);
/// assert_eq!(parse_size("1MB").unwrap(), 1_000_000);
/// ```
///
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// a negative number, or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1_099_511_627_776,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}
