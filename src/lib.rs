//! # SpaceCRAFT - Astro Pi data in Minecraft
//!
//! Tools for the Astro Pi competition: read the sensor logs recorded on the
//! Astro Pi, and show those readings as structures in a Minecraft Pi world.
//!
//! ## Features
//!
//! - **Log reading**: sequential, restartable access to every field of a log
//! - **Log writing**: the same layout, for synthetic logs and tests
//! - **Minecraft display**: tubes filled to each sensor value, a station that
//!   turns with the Astro Pi, a clock and a rocket launched by the joystick
//! - **GPIO buttons**: Astro Pi flight case buttons (feature-gated)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spacecraft::{
//!     AstroPiDataReader, JoystickState, McpiConnection, SceneComposer, SceneConfig, WorldConfig,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut mc = McpiConnection::connect(&WorldConfig::default())?;
//!     let anchor = spacecraft::world::anchor_near_player(&mut mc)?;
//!     let mut scene = SceneComposer::new(mc, anchor, SceneConfig::default())?;
//!
//!     let reader = AstroPiDataReader::open("astropi.csv")?;
//!     for reading in &reader {
//!         scene.update(reading, JoystickState::IDLE)?;
//!     }
//!     scene.clear()?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod input;
pub mod scene;
pub mod world;

// Re-export public API
pub use config::{SceneConfig, TubeRange, TubeSettings, WorldConfig};
pub use data::{AstroPiDataReader, AstroPiDataWriter, Orientation, SensorReading, Vector3};
pub use error::{Result, SpaceCraftError};
pub use input::{JoystickProvider, JoystickState, ScriptedJoystick};
pub use scene::{round_degrees, SceneComposer, ScenePhase};
pub use world::{Block, BlockPos, InMemoryWorld, McpiConnection, World};

#[cfg(feature = "gpio")]
pub use input::AstroPiButtons;

/// The default Minecraft Pi API port
pub const DEFAULT_MCPI_PORT: u16 = 4711;

/// The default interval between replayed log rows in milliseconds
pub const DEFAULT_REPLAY_INTERVAL_MS: u64 = 1000;
