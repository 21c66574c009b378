//! Interactive command shell.
//!
//! Reads one command per line, dispatches it against a [`Session`] and
//! writes results to the given output. Before every prompt the command menu
//! is listed:
//!
//! ```text
//! [scan] - Scan sub-directories and search for duplicate files
//! [dup] - Output duplicate files to a new csv file
//! [dirsize] - Tree-view of sub directories sizes
//! Select function (Q to exit) >>
//! ```
//!
//! Mistyped or incomplete commands ([`CommandError`]) are reported and the
//! shell prompts again. Scan and export failures are not recovered: they end
//! [`Shell::run`] with an error.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use bytesize::ByteSize;
use thiserror::Error;

use crate::config::Config;
use crate::duplicates::DuplicateIndex;
use crate::output::{CsvOutput, TreeView};
use crate::scanner::{DirectoryNode, Hasher, ScanReport, Scanner};
use crate::session::Session;

/// Prompt shown after the menu.
pub const PROMPT: &str = "Select function (Q to exit) >> ";

/// Menu entries as `(command, description)`.
pub const MENU: [(&str, &str); 3] = [
    ("scan", "Scan sub-directories and search for duplicate files"),
    ("dup", "Output duplicate files to a new csv file"),
    ("dirsize", "Tree-view of sub directories sizes"),
];

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Scan a directory; without a path the last or configured one is used.
    Scan(Option<PathBuf>),
    /// Export duplicate groups to a CSV file.
    Dup(Option<PathBuf>),
    /// Print the directory tree down to a depth.
    DirSize(Option<usize>),
    /// Leave the shell.
    Quit,
}

/// Recoverable user input errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The command word is not one of the menu entries or `q`.
    #[error("Unrecognised command: {0}")]
    Unrecognised(String),

    /// A command that needs an argument got none and has no default.
    /// Holds the line as typed.
    #[error("{0} what?")]
    MissingArgument(String),

    /// The `dirsize` argument is not a non-negative integer.
    #[error("Invalid depth: {0}")]
    InvalidDepth(String),

    /// A path argument is not valid UTF-8 on a platform whose paths must be.
    #[error("Path is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    /// `dirsize` was used before any successful scan.
    #[error("No directory scanned yet, run scan first")]
    NothingScanned,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// See [`Command::parse_bytes`] for the grammar.
    ///
    /// # Errors
    ///
    /// As [`Command::parse_bytes`].
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        Self::parse_bytes(line.as_bytes())
    }

    /// Parse one raw input line, which need not be valid UTF-8.
    ///
    /// The command word is case-insensitive and `q` takes no argument. For
    /// `scan` and `dup` everything after the word, trimmed, is the path, so
    /// paths may contain spaces. On unix the path is taken byte for byte.
    /// `dirsize` reads its depth from the first word after the command and
    /// ignores anything following it.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Unrecognised`] for an unknown command word or
    /// `q` with trailing words, [`CommandError::InvalidDepth`] for a
    /// non-numeric `dirsize` argument and [`CommandError::InvalidEncoding`]
    /// for a non-UTF-8 path outside unix.
    pub fn parse_bytes(line: &[u8]) -> Result<Option<Self>, CommandError> {
        let line = line.trim_ascii();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.iter().position(u8::is_ascii_whitespace) {
            Some(at) => (&line[..at], line[at..].trim_ascii()),
            None => (line, &line[line.len()..]),
        };
        let arg = (!rest.is_empty()).then_some(rest);

        let word = word.to_ascii_lowercase();
        let command = match word.as_slice() {
            b"q" if arg.is_none() => Self::Quit,
            b"scan" => Self::Scan(arg.map(path_arg).transpose()?),
            b"dup" => Self::Dup(arg.map(path_arg).transpose()?),
            b"dirsize" => Self::DirSize(arg.map(depth_arg).transpose()?),
            _ => {
                return Err(CommandError::Unrecognised(
                    String::from_utf8_lossy(&word).into_owned(),
                ))
            }
        };
        Ok(Some(command))
    }
}

#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn path_arg(arg: &[u8]) -> Result<PathBuf, CommandError> {
    use std::os::unix::ffi::OsStrExt;
    Ok(PathBuf::from(std::ffi::OsStr::from_bytes(arg)))
}

#[cfg(not(unix))]
fn path_arg(arg: &[u8]) -> Result<PathBuf, CommandError> {
    std::str::from_utf8(arg)
        .map(PathBuf::from)
        .map_err(|_| CommandError::InvalidEncoding(String::from_utf8_lossy(arg).into_owned()))
}

fn depth_arg(arg: &[u8]) -> Result<usize, CommandError> {
    let first = arg.split(u8::is_ascii_whitespace).next().unwrap_or(arg);
    std::str::from_utf8(first)
        .ok()
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| CommandError::InvalidDepth(String::from_utf8_lossy(first).into_owned()))
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Prompt for the next command.
    Continue,
    /// Leave the loop.
    Exit,
}

/// The interactive command loop.
pub struct Shell {
    config: Config,
    scanner: Scanner,
    session: Session,
}

impl Shell {
    /// Create a shell with an empty session.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let scanner = Scanner::new(Hasher::new().with_chunk_size(config.chunk_size))
            .with_error_policy(config.on_error);
        Self {
            config,
            scanner,
            session: Session::new(),
        }
    }

    /// The session holding the scan results so far.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until `q`, end of input, or a fatal error.
    ///
    /// # Errors
    ///
    /// Returns scan and export failures, and errors reading `input` or
    /// writing `output`.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> anyhow::Result<()> {
        loop {
            write_menu(&mut output)?;
            output.flush()?;

            let mut line = Vec::new();
            if input.read_until(b'\n', &mut line)? == 0 {
                log::debug!("End of input, leaving shell");
                writeln!(output)?;
                return Ok(());
            }

            match self.execute_bytes(&line, &mut output) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(err) => match err.downcast::<CommandError>() {
                    Ok(user_error) => writeln!(output, "{user_error}")?,
                    Err(fatal) => return Err(fatal),
                },
            }
        }
    }

    /// Parse and execute a single line.
    ///
    /// # Errors
    ///
    /// [`CommandError`] for bad input, anything else for fatal failures.
    pub fn execute_line<W: Write>(&mut self, line: &str, output: &mut W) -> anyhow::Result<Flow> {
        self.execute_bytes(line.as_bytes(), output)
    }

    /// Parse and execute a raw input line.
    ///
    /// # Errors
    ///
    /// As [`Shell::execute_line`].
    pub fn execute_bytes<W: Write>(&mut self, line: &[u8], output: &mut W) -> anyhow::Result<Flow> {
        match Command::parse_bytes(line)? {
            Some(command) => {
                let typed = String::from_utf8_lossy(line.trim_ascii()).into_owned();
                self.execute(command, &typed, output)
            }
            None => Ok(Flow::Continue),
        }
    }

    fn execute<W: Write>(
        &mut self,
        command: Command,
        line: &str,
        output: &mut W,
    ) -> anyhow::Result<Flow> {
        match command {
            Command::Quit => {
                writeln!(output, "Bye...")?;
                return Ok(Flow::Exit);
            }
            Command::Scan(path) => {
                let path = path
                    .or_else(|| self.session.last_path().map(PathBuf::from))
                    .or_else(|| self.config.default_path.clone())
                    .ok_or_else(|| CommandError::MissingArgument(line.to_string()))?;

                let report = self
                    .session
                    .scan(&self.scanner, &path)
                    .with_context(|| format!("Scan of {} failed", path.display()))?;
                if let Some(root) = self.session.tree() {
                    writeln!(output, "{}", summary_line(root, &report, self.session.index()))?;
                }
            }
            Command::Dup(path) => {
                let path = path.ok_or_else(|| CommandError::MissingArgument(line.to_string()))?;
                CsvOutput::new(self.session.index())
                    .write_file(&path)
                    .with_context(|| format!("Export to {} failed", path.display()))?;
                writeln!(output, "Finished generating {} file", path.display())?;
            }
            Command::DirSize(depth) => {
                let root = self.session.tree().ok_or(CommandError::NothingScanned)?;
                let depth = depth.unwrap_or(self.config.tree_depth);
                write_tree_report(output, root, depth)?;
            }
        }
        Ok(Flow::Continue)
    }
}

fn write_menu<W: Write>(output: &mut W) -> std::io::Result<()> {
    for (name, description) in MENU {
        writeln!(output, "[{name}] - {description}")?;
    }
    write!(output, "{PROMPT}")
}

/// Write the titled tree view used by `dirsize` and `report`.
///
/// # Errors
///
/// Propagates write errors.
pub fn write_tree_report<W: Write>(
    output: &mut W,
    root: &DirectoryNode,
    depth: usize,
) -> std::io::Result<()> {
    writeln!(output, "Directory Tree View")?;
    writeln!(output, "===================\n")?;
    TreeView::new(root, depth).write_to(&mut *output)?;
    writeln!(output)
}

/// One-line description of a finished scan and the cumulative index.
#[must_use]
pub fn summary_line(root: &DirectoryNode, report: &ScanReport, index: &DuplicateIndex) -> String {
    let stats = index.stats();
    let mut line = format!(
        "Scanned {}: {} files, {} total; {} duplicate groups, {} reclaimable",
        root.name,
        report.files,
        ByteSize::b(root.size),
        stats.duplicate_groups,
        ByteSize::b(stats.reclaimable_space),
    );
    if !report.warnings.is_empty() {
        line.push_str(&format!(" ({} entries skipped)", report.warnings.len()));
    }
    line
}
