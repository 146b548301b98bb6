//! Column layout of an Astro Pi sensor log.

use super::reading::{Orientation, SensorReading, Vector3, LOG_TIME_FORMAT};
use serde::{Deserialize, Serialize};

/// Header row of a sensor log, in column order.
pub const LOG_HEADER: [&str; 21] = [
    "time",
    "cpu_temperature",
    "humidity",
    "temperature_from_humidity",
    "temperature_from_pressure",
    "pressure",
    "orientation_degrees_pitch",
    "orientation_degrees_roll",
    "orientation_degrees_yaw",
    "orientation_radians_pitch",
    "orientation_radians_roll",
    "orientation_radians_yaw",
    "compass_raw_x",
    "compass_raw_y",
    "compass_raw_z",
    "gyroscope_raw_x",
    "gyroscope_raw_y",
    "gyroscope_raw_z",
    "accelerometer_raw_x",
    "accelerometer_raw_y",
    "accelerometer_raw_z",
];

/// A flat log row as it appears on disk.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LogRow {
    #[serde(with = "log_time")]
    time: chrono::NaiveDateTime,
    cpu_temperature: f64,
    humidity: f64,
    temperature_from_humidity: f64,
    temperature_from_pressure: f64,
    pressure: f64,
    orientation_degrees_pitch: f64,
    orientation_degrees_roll: f64,
    orientation_degrees_yaw: f64,
    orientation_radians_pitch: f64,
    orientation_radians_roll: f64,
    orientation_radians_yaw: f64,
    compass_raw_x: f64,
    compass_raw_y: f64,
    compass_raw_z: f64,
    gyroscope_raw_x: f64,
    gyroscope_raw_y: f64,
    gyroscope_raw_z: f64,
    accelerometer_raw_x: f64,
    accelerometer_raw_y: f64,
    accelerometer_raw_z: f64,
}

impl From<LogRow> for SensorReading {
    fn from(row: LogRow) -> Self {
        Self {
            time: row.time,
            cpu_temperature: row.cpu_temperature,
            humidity: row.humidity,
            temperature_from_humidity: row.temperature_from_humidity,
            temperature_from_pressure: row.temperature_from_pressure,
            pressure: row.pressure,
            orientation_degrees: Orientation::new(
                row.orientation_degrees_pitch,
                row.orientation_degrees_roll,
                row.orientation_degrees_yaw,
            ),
            orientation_radians: Orientation::new(
                row.orientation_radians_pitch,
                row.orientation_radians_roll,
                row.orientation_radians_yaw,
            ),
            compass_raw: Vector3::new(row.compass_raw_x, row.compass_raw_y, row.compass_raw_z),
            gyroscope_raw: Vector3::new(
                row.gyroscope_raw_x,
                row.gyroscope_raw_y,
                row.gyroscope_raw_z,
            ),
            accelerometer_raw: Vector3::new(
                row.accelerometer_raw_x,
                row.accelerometer_raw_y,
                row.accelerometer_raw_z,
            ),
        }
    }
}

impl From<&SensorReading> for LogRow {
    fn from(r: &SensorReading) -> Self {
        Self {
            time: r.time,
            cpu_temperature: r.cpu_temperature,
            humidity: r.humidity,
            temperature_from_humidity: r.temperature_from_humidity,
            temperature_from_pressure: r.temperature_from_pressure,
            pressure: r.pressure,
            orientation_degrees_pitch: r.orientation_degrees.pitch,
            orientation_degrees_roll: r.orientation_degrees.roll,
            orientation_degrees_yaw: r.orientation_degrees.yaw,
            orientation_radians_pitch: r.orientation_radians.pitch,
            orientation_radians_roll: r.orientation_radians.roll,
            orientation_radians_yaw: r.orientation_radians.yaw,
            compass_raw_x: r.compass_raw.x,
            compass_raw_y: r.compass_raw.y,
            compass_raw_z: r.compass_raw.z,
            gyroscope_raw_x: r.gyroscope_raw.x,
            gyroscope_raw_y: r.gyroscope_raw.y,
            gyroscope_raw_z: r.gyroscope_raw.z,
            accelerometer_raw_x: r.accelerometer_raw.x,
            accelerometer_raw_y: r.accelerometer_raw.y,
            accelerometer_raw_z: r.accelerometer_raw.z,
        }
    }
}

mod log_time {
    use super::LOG_TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    // Fractional seconds are optional when reading.
    const PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&time.format(LOG_TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(raw.trim(), PARSE_FORMAT)
            .map_err(|e| de::Error::custom(format!("invalid timestamp {:?}: {}", raw, e)))
    }
}
