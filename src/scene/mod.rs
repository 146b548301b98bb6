//! Sensor readings drawn as structures in a Minecraft world.
//!
//! [`SceneComposer`] builds four tubes for temperature, humidity, pressure and
//! CPU temperature, a space station above them that turns with the Astro Pi's
//! orientation, stairs winding up towards it, a clock and a rocket on a launch
//! pad. Every element is placed at a fixed offset from one anchor position.

pub mod clock;
pub mod iss;
pub mod rocket;
pub mod shape;
pub mod stairs;
pub mod tube;

pub use clock::Clock;
pub use iss::Iss;
pub use rocket::{LaunchPad, Rocket};
pub use shape::{Rotation, Shape, ShapeBlock};
pub use stairs::Stairs;
pub use tube::DisplayTube;

use crate::config::SceneConfig;
use crate::data::SensorReading;
use crate::error::Result;
use crate::input::JoystickState;
use crate::world::{block::colour, Block, BlockPos, World};
use std::time::Duration;
use tracing::{debug, info};

/// Offsets of each element from the anchor.
pub mod layout {
    use crate::world::BlockPos;

    pub const TEMPERATURE_TUBE: BlockPos = BlockPos::new(2, 0, 0);
    pub const HUMIDITY_TUBE: BlockPos = BlockPos::new(-2, 0, 0);
    pub const PRESSURE_TUBE: BlockPos = BlockPos::new(0, 0, 2);
    pub const CPU_TEMPERATURE_TUBE: BlockPos = BlockPos::new(0, 0, -2);
    pub const STATION: BlockPos = BlockPos::new(0, 40, 0);
    pub const CLOCK: BlockPos = BlockPos::new(-30, 11, -10);
    pub const LAUNCH_PAD: BlockPos = BlockPos::new(15, 0, -10);

    /// Half width of the area cleared around the tubes.
    pub const TUBE_AREA_HALF_WIDTH: i32 = 3;
    /// How far out from the anchor the stairs wind.
    pub const STAIRS_HALF_SIZE: i32 = 5;
    pub const STAIRS_HEIGHT: i32 = 38;
}

/// Round an angle to the nearest multiple of `granularity` degrees.
///
/// Rounding an already rounded angle returns it unchanged.
pub fn round_degrees(degrees: f64, granularity: f64) -> f64 {
    (degrees / granularity).round() * granularity
}

/// Rounded station angle, or `current` when the reading is not finite.
fn station_angle(degrees: f64, granularity: f64, current: f64) -> f64 {
    let rounded = round_degrees(degrees, granularity);
    if rounded.is_finite() {
        rounded
    } else {
        current
    }
}

/// What the scene is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    /// Nothing drawn.
    Idle,
    /// Drawn and showing the latest reading.
    Displaying,
    /// Rocket in flight.
    Launching,
}

/// Everything the composer has placed in the world.
struct Elements {
    clock: Clock,
    temperature_tube: DisplayTube,
    humidity_tube: DisplayTube,
    pressure_tube: DisplayTube,
    cpu_temperature_tube: DisplayTube,
    iss: Iss,
    stairs: Stairs,
    launch_pad: LaunchPad,
    rocket: Rocket,
}

impl Elements {
    fn build(world: &mut impl World, anchor: BlockPos, config: &SceneConfig) -> Result<Self> {
        let clock = Clock::new(
            world,
            anchor + layout::CLOCK,
            Block::wool(colour::BLUE),
            config.clock_radius,
        )?;

        let half = layout::TUBE_AREA_HALF_WIDTH;
        world.set_blocks(
            anchor.offset(-half, 0, -half),
            anchor.offset(half, config.tubes.height, half),
            Block::AIR,
        )?;

        let tubes = &config.tubes;
        let temperature_tube = DisplayTube::new(
            world,
            anchor + layout::TEMPERATURE_TUBE,
            tubes.height,
            tubes.temperature,
        )?;
        let humidity_tube = DisplayTube::new(
            world,
            anchor + layout::HUMIDITY_TUBE,
            tubes.height,
            tubes.humidity,
        )?;
        let pressure_tube = DisplayTube::new(
            world,
            anchor + layout::PRESSURE_TUBE,
            tubes.height,
            tubes.pressure,
        )?;
        let cpu_temperature_tube = DisplayTube::new(
            world,
            anchor + layout::CPU_TEMPERATURE_TUBE,
            tubes.height,
            tubes.cpu_temperature,
        )?;

        let iss = Iss::new(world, anchor + layout::STATION)?;
        let stairs = Stairs::new(
            world,
            anchor,
            layout::STAIRS_HALF_SIZE,
            layout::STAIRS_HEIGHT,
            Block::DIAMOND_BLOCK,
        )?;

        let launch_pad = LaunchPad::new(world, anchor + layout::LAUNCH_PAD)?;
        let rocket = Rocket::new(world, launch_pad.rocket_pos())?;

        Ok(Self {
            clock,
            temperature_tube,
            humidity_tube,
            pressure_tube,
            cpu_temperature_tube,
            iss,
            stairs,
            launch_pad,
            rocket,
        })
    }

    fn clear(&mut self, world: &mut impl World) -> Result<()> {
        self.temperature_tube.clear(world)?;
        self.humidity_tube.clear(world)?;
        self.pressure_tube.clear(world)?;
        self.cpu_temperature_tube.clear(world)?;
        self.iss.clear(world)?;
        self.clock.clear(world)?;
        self.stairs.clear(world)?;
        self.rocket.clear(world)?;
        self.launch_pad.clear(world)
    }
}

/// Turns sensor readings into world mutations.
pub struct SceneComposer<W: World> {
    world: W,
    anchor: BlockPos,
    config: SceneConfig,
    phase: ScenePhase,
    elements: Elements,
    last_reading: Option<SensorReading>,
    last_joystick: JoystickState,
    launches: usize,
}

impl<W: World> SceneComposer<W> {
    /// Build every element of the scene around `anchor`.
    pub fn new(mut world: W, anchor: BlockPos, config: SceneConfig) -> Result<Self> {
        config.validate()?;
        info!("Building scene at {}", anchor);
        let elements = Elements::build(&mut world, anchor, &config)?;

        Ok(Self {
            world,
            anchor,
            config,
            phase: ScenePhase::Displaying,
            elements,
            last_reading: None,
            last_joystick: JoystickState::IDLE,
            launches: 0,
        })
    }

    /// Show a new reading.
    ///
    /// The rocket launches whenever a button goes down that was up on the
    /// previous update; holding a button down does not launch it again.
    /// Non-finite orientation angles leave the station where it was.
    pub fn update(&mut self, reading: &SensorReading, joystick: JoystickState) -> Result<()> {
        if self.phase == ScenePhase::Idle {
            self.elements = Elements::build(&mut self.world, self.anchor, &self.config)?;
        }
        self.phase = ScenePhase::Displaying;

        let world = &mut self.world;
        let el = &mut self.elements;

        el.clock.set_time(world, reading.time.time())?;

        el.cpu_temperature_tube.set_value(world, reading.cpu_temperature)?;
        el.temperature_tube
            .set_value(world, reading.temperature_from_humidity)?;
        el.humidity_tube.set_value(world, reading.humidity)?;
        el.pressure_tube.set_value(world, reading.pressure)?;

        let granularity = self.config.round_degrees_to;
        let o = reading.orientation_degrees;
        let current = el.iss.rotation();
        let (yaw, pitch, roll) = (
            station_angle(o.yaw, granularity, current.yaw),
            station_angle(o.pitch, granularity, current.pitch),
            station_angle(o.roll, granularity, current.roll),
        );
        if el.iss.rotate(world, yaw, pitch, roll)? {
            // the station may have swung through the top of the stairs
            debug!("Station rotated to yaw {} pitch {} roll {}", yaw, pitch, roll);
            el.stairs.draw(world)?;
        }

        if joystick.pressed_since(&self.last_joystick) {
            self.launch()?;
        }

        self.last_reading = Some(reading.clone());
        self.last_joystick = joystick;
        Ok(())
    }

    fn launch(&mut self) -> Result<()> {
        self.phase = ScenePhase::Launching;
        self.launches += 1;

        let world = &mut self.world;
        let el = &mut self.elements;
        let step = Duration::from_millis(self.config.launch_step_ms);
        el.rocket.launch(world, self.config.launch_height, step)?;
        el.launch_pad.redraw(world)?;
        el.rocket.reset(world)?;

        self.phase = ScenePhase::Displaying;
        Ok(())
    }

    /// Remove every element from the world.
    pub fn clear(&mut self) -> Result<()> {
        info!("Clearing scene at {}", self.anchor);
        self.elements.clear(&mut self.world)?;

        self.phase = ScenePhase::Idle;
        self.last_reading = None;
        self.last_joystick = JoystickState::IDLE;
        Ok(())
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn anchor(&self) -> BlockPos {
        self.anchor
    }

    pub fn last_reading(&self) -> Option<&SensorReading> {
        self.last_reading.as_ref()
    }

    /// Number of rocket launches so far.
    pub fn launches(&self) -> usize {
        self.launches
    }

    pub fn station_rotation(&self) -> Rotation {
        self.elements.iss.rotation()
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn into_world(self) -> W {
        self.world
    }
}
