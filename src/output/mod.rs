//! Output module for collected data
//!
//! This module handles:
//! - Writing each round to a timestamped CSV file
//! - Printing the per-round console summary

mod csv_export;
mod summary;

pub use csv_export::{export_file_name, CsvExporter, UTF8_BOM};
pub use summary::{preview_table, print_summary, PREVIEW_ROWS};

use thiserror::Error;

/// Errors that can occur while exporting a batch
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, ExportError>;
