//! Astro Pi sensor logs: the reading type, the log layout, and sequential
//! reading and writing of log files.

pub mod reader;
pub mod reading;
pub mod schema;
pub mod writer;

// Re-export commonly used items
pub use reader::AstroPiDataReader;
pub use reading::{Orientation, SensorReading, Vector3};
pub use schema::LOG_HEADER;
pub use writer::AstroPiDataWriter;
