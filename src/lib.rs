//! dirdupe - Directory size tree and duplicate file finder
//!
//! Scans a directory tree in a single pass, building a size-annotated tree of
//! directories while hashing every file (BLAKE3) into a duplicate index.
//! Results are reported as a CSV of duplicate groups or as a tree view, either
//! from an interactive shell or in one shot.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod session;
pub mod shell;

use std::io::{self, Write};

use anyhow::Context;

use crate::cli::{Cli, Commands, ReportArgs};
use crate::config::Config;
use crate::error::ExitCode;
use crate::output::CsvOutput;
use crate::scanner::{Hasher, Scanner};
use crate::session::Session;
use crate::shell::Shell;

/// Run the application for parsed command-line arguments.
///
/// # Errors
///
/// Returns configuration errors and any fatal scan or export error.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = Config::load(cli.config.as_deref())?.merge_cli(&cli)?;
    log::debug!("Effective configuration: {:?}", config);

    match cli.command {
        None => run_shell(config),
        Some(Commands::Shell(args)) => {
            let mut config = config;
            if args.path.is_some() {
                config.default_path = args.path;
            }
            run_shell(config)
        }
        Some(Commands::Report(args)) => run_report(&config, &args, &mut io::stdout().lock()),
    }
}

fn run_shell(config: Config) -> anyhow::Result<ExitCode> {
    let stdin = io::stdin();
    Shell::new(config).run(stdin.lock(), io::stdout().lock())?;
    Ok(ExitCode::Success)
}

/// Scan `args.path` once and write the requested reports.
///
/// The tree view is printed when `--depth` is given or no CSV file was
/// requested.
///
/// # Errors
///
/// Returns scan, export and write failures.
pub fn run_report<W: Write>(
    config: &Config,
    args: &ReportArgs,
    output: &mut W,
) -> anyhow::Result<ExitCode> {
    let scanner = Scanner::new(Hasher::new().with_chunk_size(config.chunk_size))
        .with_error_policy(config.on_error);

    let mut session = Session::new();
    let report = session
        .scan(&scanner, &args.path)
        .with_context(|| format!("Scan of {} failed", args.path.display()))?;
    let root = session
        .tree()
        .context("Scan finished without a directory tree")?;

    writeln!(output, "{}", shell::summary_line(root, &report, session.index()))?;

    if let Some(csv_path) = &args.csv {
        CsvOutput::new(session.index())
            .write_file(csv_path)
            .with_context(|| format!("Export to {} failed", csv_path.display()))?;
        writeln!(output, "Finished generating {} file", csv_path.display())?;
    }

    if args.depth.is_some() || args.csv.is_none() {
        let depth = args.depth.unwrap_or(config.tree_depth);
        shell::write_tree_report(output, root, depth)?;
    }

    Ok(if report.warnings.is_empty() {
        ExitCode::Success
    } else {
        ExitCode::PartialSuccess
    })
}
