use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{HEADER, ResultRecord};
use crate::error::{Error, Result};

/// Append-only CSV log of mining times.
///
/// Every call opens the file in append mode, writes, flushes and syncs, so a
/// killed process loses at most the unit that was still being mined.
#[derive(Debug, Clone)]
pub struct ResultsLog {
    path: PathBuf,
}

impl ResultsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the header row if the log does not exist yet or is empty.
    /// Returns whether a header was written.
    pub fn ensure_header(&self) -> Result<bool> {
        // anything but a regular file falls through and fails to open
        match fs::metadata(&self.path) {
            Ok(meta) if meta.is_file() && meta.len() > 0 => return Ok(false),
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(&self.path, e)),
        }

        let mut writer = self.writer()?;
        writer.write_record(HEADER)?;
        self.finish(writer)?;
        debug!("wrote results header to {}", self.path.display());
        Ok(true)
    }

    /// Append `records` after the existing rows.
    pub fn append(&self, records: &[ResultRecord]) -> Result<()> {
        let mut writer = self.writer()?;
        for record in records {
            writer.serialize(record)?;
        }
        self.finish(writer)
    }

    /// Decode every data row. A missing log has no rows.
    pub fn read_records(&self) -> Result<Vec<ResultRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(&self.path, e)),
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);
        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<ResultRecord>, csv::Error>>()?;
        Ok(records)
    }

    fn writer(&self) -> Result<csv::Writer<File>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io(&self.path, e))?;
        // header handled by `ensure_header`
        Ok(csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file))
    }

    fn finish(&self, mut writer: csv::Writer<File>) -> Result<()> {
        writer.flush().map_err(|e| Error::io(&self.path, e))?;
        writer
            .get_ref()
            .sync_data()
            .map_err(|e| Error::io(&self.path, e))
    }
}
