//! Data structures for Astro Pi sensor readings.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp format used in the `time` column of a sensor log.
pub const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Orientation of the Sense HAT, either in degrees or radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
}

/// Raw three-axis sensor vector (compass, gyroscope or accelerometer).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One logged sensor snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// When the row was logged
    pub time: NaiveDateTime,
    /// Raspberry Pi CPU temperature in Celsius
    pub cpu_temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Temperature from the humidity sensor in Celsius
    pub temperature_from_humidity: f64,
    /// Temperature from the pressure sensor in Celsius
    pub temperature_from_pressure: f64,
    /// Pressure in millibars
    pub pressure: f64,
    pub orientation_degrees: Orientation,
    pub orientation_radians: Orientation,
    /// Magnetometer reading in microteslas
    pub compass_raw: Vector3,
    /// Gyroscope reading in radians per second
    pub gyroscope_raw: Vector3,
    /// Accelerometer reading in Gs
    pub accelerometer_raw: Vector3,
}

impl Orientation {
    pub fn new(pitch: f64, roll: f64, yaw: f64) -> Self {
        Self { pitch, roll, yaw }
    }

    /// Convert an orientation in degrees to radians.
    pub fn to_radians(self) -> Self {
        Self {
            pitch: self.pitch.to_radians(),
            roll: self.roll.to_radians(),
            yaw: self.yaw.to_radians(),
        }
    }
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?},{:?},{:?}]", self.pitch, self.roll, self.yaw)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?},{:?},{:?}]", self.x, self.y, self.z)
    }
}

impl SensorReading {
    /// Format the row the way the `reader` binary prints it. Whole numbers
    /// keep their decimal point.
    pub fn to_line(&self) -> String {
        format!(
            "{} {:?} {:?} {:?} {} {} {} {} {}",
            self.time.format(LOG_TIME_FORMAT),
            self.temperature_from_humidity,
            self.temperature_from_pressure,
            self.pressure,
            self.orientation_degrees,
            self.orientation_radians,
            self.compass_raw,
            self.gyroscope_raw,
            self.accelerometer_raw,
        )
    }

    /// Deterministic synthetic reading for demos and tests.
    ///
    /// Values drift slowly around typical ISS cabin conditions and the
    /// station turns 3 degrees of yaw per step.
    pub fn simulated(step: u32) -> Self {
        let t = f64::from(step);
        let phase = t / 10.0;

        // 2015-12-15 11:03:00 is the Principia launch.
        let start = NaiveDate::from_ymd_opt(2015, 12, 15)
            .and_then(|d| d.and_hms_opt(11, 3, 0))
            .unwrap_or_default();
        let time = start + Duration::seconds(i64::from(step) * 10);

        let orientation_degrees = Orientation::new(
            (phase.sin() * 30.0).round(),
            (phase.cos() * 20.0).round(),
            f64::from(step % 120 * 3),
        );

        Self {
            time,
            cpu_temperature: 40.0 + (phase.sin() * 5.0).round(),
            humidity: 35.0 + (phase.cos() * 10.0).round(),
            temperature_from_humidity: 25.0 + (phase.sin() * 10.0).round(),
            temperature_from_pressure: 24.0 + (phase.sin() * 9.0).round(),
            pressure: 1000.0 + (phase.cos() * 40.0).round(),
            orientation_degrees,
            orientation_radians: orientation_degrees.to_radians(),
            compass_raw: Vector3::new(12.5, -3.25, 40.0 + t),
            gyroscope_raw: Vector3::new(0.001 * t, -0.002, 0.0),
            accelerometer_raw: Vector3::new(0.0, 0.015625, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_display() {
        let o = Orientation::new(1.5, -2.0, 359.0);
        assert_eq!(o.to_string(), "[1.5,-2.0,359.0]");
    }

    #[test]
    fn test_to_line_field_order() {
        let reading = SensorReading::simulated(0);
        let line = reading.to_line();
        let fields: Vec<&str> = line.split(' ').collect();

        // date and time are separated by a space in the timestamp
        assert_eq!(fields.len(), 10);
        assert_eq!(fields[0], "2015-12-15");
        assert_eq!(fields[1], "11:03:00.000000");
        assert_eq!(fields[4], format!("{:?}", reading.pressure));
        assert!(fields[4].contains('.'));
    }

    #[test]
    fn test_simulated_is_deterministic() {
        assert_eq!(SensorReading::simulated(7), SensorReading::simulated(7));
        assert_ne!(SensorReading::simulated(7), SensorReading::simulated(8));
    }
}
