//! CSV export of collection batches
//!
//! One file per completed round, named after the local time at minute
//! granularity. Files start with a UTF-8 byte order mark so spreadsheet tools
//! pick the right encoding for the Korean headers and values.

use crate::output::OutputResult;
use crate::record::CollectionBatch;
use chrono::{DateTime, TimeZone};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// UTF-8 signature written ahead of the header row
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// File name for a round exported at `at`: `population_stats_YYYYMMDD_HHMM.csv`
pub fn export_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("population_stats_{}.csv", at.format("%Y%m%d_%H%M"))
}

/// Writes batches into a fixed output directory
#[derive(Debug, Clone)]
pub struct CsvExporter {
    directory: PathBuf,
}

impl CsvExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Writes `batch` to a new file and returns its path
    ///
    /// The directory is created if missing. A file from the same minute is
    /// overwritten.
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Path of the written file
    /// * `Err(ExportError)` - Directory creation or writing failed
    pub fn export<Tz: TimeZone>(
        &self,
        batch: &CollectionBatch,
        at: &DateTime<Tz>,
    ) -> OutputResult<PathBuf>
    where
        Tz::Offset: std::fmt::Display,
    {
        fs::create_dir_all(&self.directory)?;

        let path = self.directory.join(export_file_name(at));
        let mut file = BufWriter::new(File::create(&path)?);
        file.write_all(UTF8_BOM)?;

        // Header row comes from the record's serialized field names
        let mut writer = csv::Writer::from_writer(file);
        for record in batch.records() {
            writer.serialize(record)?;
        }
        writer.flush()?;

        tracing::info!("Saved {} rows to {}", batch.len(), path.display());

        Ok(path)
    }
}
