//! CSV export of duplicate groups.
//!
//! One row is written per digest that was seen more than once. Unique files
//! never appear. The header is always written, even when there are no
//! duplicates.
//!
//! # Columns
//!
//! - `name`: Shortest basename seen for the content
//! - `size`: File size in bytes
//! - `copies`: Number of files sharing the content
//!
//! Row order follows the index and is unspecified.
//!
//! # Example
//!
//! ```no_run
//! use dirdupe::duplicates::DuplicateIndex;
//! use dirdupe::output::csv::CsvOutput;
//! use dirdupe::scanner::Scanner;
//! use std::path::Path;
//!
//! let mut index = DuplicateIndex::new();
//! Scanner::with_defaults().scan(Path::new("."), &mut index).unwrap();
//!
//! CsvOutput::new(&index).write_to(std::io::stdout()).unwrap();
//! ```

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::duplicates::DuplicateIndex;

/// Column names, in output order.
pub const CSV_HEADER: [&str; 3] = ["name", "size", "copies"];

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// The output file could not be created.
    #[error("Cannot write {path}: {source}")]
    Create {
        /// Requested output path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    index: &'a DuplicateIndex,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(index: &'a DuplicateIndex) -> Self {
        Self { index }
    }

    /// Write the CSV output to the given writer.
    ///
    /// Returns the number of rows written, excluding the header.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<usize, CsvOutputError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(CSV_HEADER)?;

        let mut rows = 0;
        for entry in self.index.duplicates() {
            csv_writer.serialize(entry)?;
            rows += 1;
        }

        csv_writer.flush()?;
        Ok(rows)
    }

    /// Create (or truncate) the file at `path` and write the CSV into it.
    ///
    /// # Errors
    ///
    /// Returns [`CsvOutputError::Create`] if the file cannot be opened for
    /// writing, or another variant if writing fails afterwards.
    pub fn write_file(&self, path: &Path) -> Result<usize, CsvOutputError> {
        let file = File::create(path).map_err(|source| CsvOutputError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let rows = self.write_to(io::BufWriter::new(file))?;
        log::info!("Wrote {} duplicate groups to {}", rows, path.display());
        Ok(rows)
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
