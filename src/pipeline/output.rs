//! Durable CSV output

use super::error::PipelineError;
use super::record::ClassificationResult;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Row-at-a-time CSV writer that syncs every row to disk.
///
/// After [`CsvSink::append`] returns, the row survives a crash of this process.
pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<File>,
    columns: usize,
}

impl CsvSink {
    /// Creates (or truncates) the file and writes the header row.
    pub fn create(path: &Path, header: &[String]) -> Result<Self, PipelineError> {
        let file = File::create(path).map_err(|source| PipelineError::OutputOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let mut sink = Self {
            path: path.to_path_buf(),
            writer: csv::Writer::from_writer(file),
            columns: header.len(),
        };
        sink.write_synced(header)?;
        Ok(sink)
    }

    pub fn append(&mut self, result: &ClassificationResult) -> Result<(), PipelineError> {
        let row = result.row();
        debug_assert_eq!(row.len(), self.columns, "row width must match header");
        self.write_synced(&row)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_synced<I, T>(&mut self, record: I) -> Result<(), PipelineError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let written = self
            .writer
            .write_record(record)
            .map_err(std::io::Error::from)
            .and_then(|_| self.writer.flush())
            .and_then(|_| self.writer.get_ref().sync_data());

        written.map_err(|source| PipelineError::OutputWrite {
            path: self.path.clone(),
            source,
        })
    }
}
