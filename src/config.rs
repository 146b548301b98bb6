//! Connection and scene configuration.

use crate::error::{Result, SpaceCraftError};
use crate::world::{block::colour, Block};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where the Minecraft Pi game is listening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Host running the game
    pub host: String,
    /// Port of the Minecraft Pi API
    pub port: u16,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: crate::DEFAULT_MCPI_PORT,
        }
    }
}

impl WorldConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// `host:port` for connecting.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The value range a tube displays, and what it is filled with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubeRange {
    pub min: f64,
    pub max: f64,
    pub block: Block,
}

impl TubeRange {
    pub const fn new(min: f64, max: f64, block: Block) -> Self {
        Self { min, max, block }
    }
}

/// Settings for the four sensor tubes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TubeSettings {
    /// Height of every tube in blocks
    pub height: i32,
    /// Temperature in Celsius
    pub temperature: TubeRange,
    /// Relative humidity in percent
    pub humidity: TubeRange,
    /// Pressure in millibars
    pub pressure: TubeRange,
    /// CPU temperature in Celsius
    pub cpu_temperature: TubeRange,
}

impl Default for TubeSettings {
    fn default() -> Self {
        Self {
            height: 20,
            temperature: TubeRange::new(10.0, 40.0, Block::LAVA),
            humidity: TubeRange::new(20.0, 50.0, Block::WATER),
            pressure: TubeRange::new(950.0, 1050.0, Block::OBSIDIAN),
            cpu_temperature: TubeRange::new(30.0, 50.0, Block::wool(colour::RED)),
        }
    }
}

/// Settings for the scene composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Station orientation is rounded to this many degrees
    pub round_degrees_to: f64,
    /// How many blocks the rocket climbs on launch
    pub launch_height: i32,
    /// Delay between rocket moves in milliseconds
    pub launch_step_ms: u64,
    /// Radius of the clock face
    pub clock_radius: i32,
    pub tubes: TubeSettings,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            round_degrees_to: 15.0,
            launch_height: 75,
            launch_step_ms: 100,
            clock_radius: 10,
            tubes: TubeSettings::default(),
        }
    }
}

impl SceneConfig {
    /// Load a config from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SpaceCraftError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let config: SceneConfig = serde_json::from_str(&text).map_err(|e| {
            SpaceCraftError::config_error(format!("Invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_round_degrees_to(mut self, degrees: f64) -> Self {
        self.round_degrees_to = degrees;
        self
    }

    pub fn with_launch_height(mut self, height: i32) -> Self {
        self.launch_height = height;
        self
    }

    pub fn with_launch_step_ms(mut self, ms: u64) -> Self {
        self.launch_step_ms = ms;
        self
    }

    pub fn with_clock_radius(mut self, radius: i32) -> Self {
        self.clock_radius = radius;
        self
    }

    pub fn with_tubes(mut self, tubes: TubeSettings) -> Self {
        self.tubes = tubes;
        self
    }

    /// Reject settings the scene cannot be drawn with.
    pub fn validate(&self) -> Result<()> {
        if !(self.round_degrees_to.is_finite() && self.round_degrees_to > 0.0) {
            return Err(SpaceCraftError::config_error(format!(
                "round_degrees_to must be positive, got {}",
                self.round_degrees_to
            )));
        }
        if self.launch_height < 0 {
            return Err(SpaceCraftError::config_error("launch_height must not be negative"));
        }
        if self.clock_radius < 2 {
            return Err(SpaceCraftError::config_error("clock_radius must be at least 2"));
        }
        if self.tubes.height < 1 {
            return Err(SpaceCraftError::config_error("tube height must be at least 1"));
        }

        let ranges = [
            ("temperature", &self.tubes.temperature),
            ("humidity", &self.tubes.humidity),
            ("pressure", &self.tubes.pressure),
            ("cpu_temperature", &self.tubes.cpu_temperature),
        ];
        for (name, range) in ranges {
            if !(range.min < range.max) {
                return Err(SpaceCraftError::config_error(format!(
                    "{} tube range {}..{} is empty",
                    name, range.min, range.max
                )));
            }
        }
        Ok(())
    }
}
