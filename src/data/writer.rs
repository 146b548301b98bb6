//! Writer for Astro Pi sensor logs.

use crate::data::reading::SensorReading;
use crate::data::schema::{LogRow, LOG_HEADER};
use crate::error::{Result, SpaceCraftError};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Writes sensor readings in the layout [`AstroPiDataReader`](super::AstroPiDataReader) reads.
pub struct AstroPiDataWriter<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl AstroPiDataWriter<File> {
    /// Create (or truncate) a log file and write its header row.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| SpaceCraftError::LogOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_writer(file)
    }
}

impl<W: Write> AstroPiDataWriter<W> {
    /// Wrap any byte sink and write the header row.
    pub fn from_writer(sink: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        writer.write_record(LOG_HEADER)?;

        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    /// Append one row.
    pub fn write(&mut self, reading: &SensorReading) -> Result<()> {
        self.writer.serialize(LogRow::from(reading))?;
        self.rows_written += 1;
        debug!("Wrote row {}", self.rows_written);
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying sink.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| SpaceCraftError::Io(e.into_error()))
    }
}
