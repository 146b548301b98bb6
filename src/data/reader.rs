//! Sequential reader for Astro Pi sensor logs.

use crate::data::reading::{Orientation, SensorReading, Vector3};
use crate::data::schema::LogRow;
use crate::error::{Result, SpaceCraftError};
use chrono::NaiveDateTime;
use futures_util::stream::{self, BoxStream};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time;
use tracing::{debug, info};

/// Reads a sensor log and walks it one row at a time.
///
/// The whole log is parsed when the reader is opened, so a malformed row
/// fails `open` rather than surfacing halfway through a display run. The
/// reader starts positioned on the first row; [`next_row`](Self::next_row)
/// returns `false` once the last row has been passed.
#[derive(Debug, Clone)]
pub struct AstroPiDataReader {
    path: PathBuf,
    rows: Vec<SensorReading>,
    cursor: usize,
}

impl AstroPiDataReader {
    /// Open and parse a sensor log.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| SpaceCraftError::LogOpen {
            path: path.clone(),
            source,
        })?;

        let rows = parse_rows(file)?;
        info!("Opened {} with {} rows", path.display(), rows.len());

        Ok(Self {
            path,
            rows,
            cursor: 0,
        })
    }

    /// Parse a log from any byte source.
    pub fn from_reader(source: impl Read) -> Result<Self> {
        Ok(Self {
            path: PathBuf::new(),
            rows: parse_rows(source)?,
            cursor: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of data rows in the log, excluding the header.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Zero-based index of the current row.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// The current row, or `None` once the end of the data has been reached.
    pub fn current(&self) -> Option<&SensorReading> {
        self.rows.get(self.cursor)
    }

    /// Move to the next row. Returns `false` at the end of the data.
    pub fn next_row(&mut self) -> bool {
        if self.cursor < self.rows.len() {
            self.cursor += 1;
        }
        let found = self.cursor < self.rows.len();
        if found {
            debug!("Moved to row {}", self.cursor);
        } else {
            debug!("End of data after {} rows", self.rows.len());
        }
        found
    }

    /// Go back to the first row.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Iterate over every row without moving the cursor.
    pub fn iter(&self) -> std::slice::Iter<'_, SensorReading> {
        self.rows.iter()
    }

    pub fn time(&self) -> Option<NaiveDateTime> {
        self.current().map(|r| r.time)
    }

    pub fn cpu_temperature(&self) -> Option<f64> {
        self.current().map(|r| r.cpu_temperature)
    }

    pub fn humidity(&self) -> Option<f64> {
        self.current().map(|r| r.humidity)
    }

    pub fn temperature_from_humidity(&self) -> Option<f64> {
        self.current().map(|r| r.temperature_from_humidity)
    }

    pub fn temperature_from_pressure(&self) -> Option<f64> {
        self.current().map(|r| r.temperature_from_pressure)
    }

    pub fn pressure(&self) -> Option<f64> {
        self.current().map(|r| r.pressure)
    }

    pub fn orientation_in_degrees(&self) -> Option<Orientation> {
        self.current().map(|r| r.orientation_degrees)
    }

    pub fn orientation_in_radians(&self) -> Option<Orientation> {
        self.current().map(|r| r.orientation_radians)
    }

    pub fn compass_raw(&self) -> Option<Vector3> {
        self.current().map(|r| r.compass_raw)
    }

    pub fn gyroscope_raw(&self) -> Option<Vector3> {
        self.current().map(|r| r.gyroscope_raw)
    }

    pub fn accelerometer_raw(&self) -> Option<Vector3> {
        self.current().map(|r| r.accelerometer_raw)
    }

    /// Replay every row as a stream, one row per `interval_ms`.
    ///
    /// The stream ends after the last row.
    pub fn replay(&self, interval_ms: u64) -> BoxStream<'static, SensorReading> {
        let period = Duration::from_millis(interval_ms.max(1));
        let rows = self.rows.clone().into_iter();

        // The interval is created on first poll so it binds to the polling runtime.
        let stream = stream::unfold((rows, None), move |(mut rows, interval)| async move {
            let reading = rows.next()?;
            let mut interval = interval.unwrap_or_else(|| time::interval(period));
            interval.tick().await;
            Some((reading, (rows, Some(interval))))
        });

        Box::pin(stream)
    }
}

impl<'a> IntoIterator for &'a AstroPiDataReader {
    type Item = &'a SensorReading;
    type IntoIter = std::slice::Iter<'a, SensorReading>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn parse_rows(source: impl Read) -> Result<Vec<SensorReading>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut rows = Vec::new();
    for (index, row) in reader.deserialize::<LogRow>().enumerate() {
        let row = row.map_err(|e| {
            if matches!(e.kind(), csv::ErrorKind::Deserialize { .. }) {
                SpaceCraftError::parse_error(format!("row {}: {}", index + 1, e))
            } else {
                SpaceCraftError::Csv(e)
            }
        })?;
        rows.push(SensorReading::from(row));
    }
    debug!("Parsed {} rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::LOG_HEADER;

    fn log_with_rows(rows: &[&str]) -> String {
        let mut text = LOG_HEADER.join(",");
        text.push('\n');
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    const ROW_A: &str = "2016-01-20 10:00:00.500000,41.2,33.5,26.1,25.4,1001.25,\
        1,2,3,0.017,0.035,0.052,10,20,30,0.1,0.2,0.3,0,0,1";
    const ROW_B: &str = "2016-01-20 10:00:10,41.7,33.1,26.3,25.6,1001.5,\
        4,5,6,0.07,0.087,0.105,11,21,31,0.4,0.5,0.6,0.01,0.02,0.98";

    #[test]
    fn test_accessors_follow_cursor() {
        let mut reader = AstroPiDataReader::from_reader(log_with_rows(&[ROW_A, ROW_B]).as_bytes())
            .unwrap();

        assert_eq!(reader.row_count(), 2);
        assert_eq!(reader.pressure(), Some(1001.25));
        assert_eq!(
            reader.orientation_in_degrees(),
            Some(Orientation::new(1.0, 2.0, 3.0))
        );

        assert!(reader.next_row());
        assert_eq!(reader.humidity(), Some(33.1));
        assert_eq!(reader.accelerometer_raw(), Some(Vector3::new(0.01, 0.02, 0.98)));

        assert!(!reader.next_row());
        assert_eq!(reader.pressure(), None);
        assert!(!reader.next_row());
    }

    #[test]
    fn test_rewind_restarts_sequence() {
        let mut reader = AstroPiDataReader::from_reader(log_with_rows(&[ROW_A, ROW_B]).as_bytes())
            .unwrap();
        while reader.next_row() {}
        reader.rewind();
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.cpu_temperature(), Some(41.2));
    }

    #[test]
    fn test_header_only_log_is_empty() {
        let reader = AstroPiDataReader::from_reader(log_with_rows(&[]).as_bytes()).unwrap();
        assert_eq!(reader.row_count(), 0);
        assert!(reader.current().is_none());
    }

    #[test]
    fn test_short_row_is_fatal() {
        let result = AstroPiDataReader::from_reader(log_with_rows(&[ROW_A, "2016-01-20 10:00:20,1,2"]).as_bytes());
        assert!(matches!(result, Err(SpaceCraftError::Csv(_))));
    }

    #[test]
    fn test_bad_timestamp_is_fatal() {
        let row = ROW_A.replacen("2016-01-20 10:00:00.500000", "yesterday", 1);
        let result = AstroPiDataReader::from_reader(log_with_rows(&[&row]).as_bytes());
        assert!(matches!(result, Err(SpaceCraftError::Parse(_))));
    }

    #[tokio::test]
    async fn test_replay_yields_every_row() {
        use futures_util::StreamExt;

        let reader = AstroPiDataReader::from_reader(log_with_rows(&[ROW_A, ROW_B]).as_bytes())
            .unwrap();
        let replayed: Vec<SensorReading> = reader.replay(1).collect().await;
        assert_eq!(replayed.len(), 2);
        assert_eq!(replayed[1].pressure, 1001.5);
    }

    #[test]
    fn test_replay_of_empty_log_ends() {
        use futures_util::StreamExt;

        let reader = AstroPiDataReader::from_reader(log_with_rows(&[]).as_bytes()).unwrap();
        let replayed: Vec<SensorReading> = tokio_test::block_on(reader.replay(0).collect());
        assert!(replayed.is_empty());
    }
}
