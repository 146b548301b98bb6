//! Glass tubes filled to a height proportional to a sensor value.

use crate::config::TubeRange;
use crate::error::Result;
use crate::world::{Block, BlockPos, World};
use tracing::debug;

/// A 3x3 glass column with a one block core that fills from the bottom.
#[derive(Debug, Clone)]
pub struct DisplayTube {
    pos: BlockPos,
    height: i32,
    range: TubeRange,
    level: Option<i32>,
}

impl DisplayTube {
    /// Build the empty tube with its base at `pos`.
    pub fn new(world: &mut impl World, pos: BlockPos, height: i32, range: TubeRange) -> Result<Self> {
        let tube = Self {
            pos,
            height,
            range,
            level: None,
        };
        tube.draw(world)?;
        Ok(tube)
    }

    fn top(&self) -> i32 {
        self.pos.y + self.height - 1
    }

    fn draw(&self, world: &mut impl World) -> Result<()> {
        world.set_blocks(
            self.pos.offset(-1, 0, -1),
            BlockPos::new(self.pos.x + 1, self.top(), self.pos.z + 1),
            Block::GLASS,
        )?;
        world.set_blocks(
            self.pos,
            BlockPos::new(self.pos.x, self.top(), self.pos.z),
            Block::AIR,
        )
    }

    /// Number of filled blocks for a value.
    ///
    /// Values outside the range saturate; NaN shows an empty tube.
    pub fn level_for(&self, value: f64) -> i32 {
        fill_level(value, self.range.min, self.range.max, self.height)
    }

    /// Current fill level, `None` before the first value.
    pub fn level(&self) -> Option<i32> {
        self.level
    }

    /// Show a value. Only touches the world when the level changes.
    pub fn set_value(&mut self, world: &mut impl World, value: f64) -> Result<i32> {
        let level = self.level_for(value);
        if self.level == Some(level) {
            return Ok(level);
        }

        if level > 0 {
            world.set_blocks(
                self.pos,
                BlockPos::new(self.pos.x, self.pos.y + level - 1, self.pos.z),
                self.range.block,
            )?;
        }
        if level < self.height {
            world.set_blocks(
                BlockPos::new(self.pos.x, self.pos.y + level, self.pos.z),
                BlockPos::new(self.pos.x, self.top(), self.pos.z),
                Block::AIR,
            )?;
        }

        debug!("Tube at {} shows {} -> level {}", self.pos, value, level);
        self.level = Some(level);
        Ok(level)
    }

    /// Remove the tube and its contents.
    pub fn clear(&mut self, world: &mut impl World) -> Result<()> {
        world.set_blocks(
            self.pos.offset(-1, 0, -1),
            BlockPos::new(self.pos.x + 1, self.top(), self.pos.z + 1),
            Block::AIR,
        )?;
        self.level = None;
        Ok(())
    }
}

/// `round(clamp((value - min) / (max - min), 0, 1) * height)`
pub fn fill_level(value: f64, min: f64, max: f64, height: i32) -> i32 {
    let fraction = (value - min) / (max - min);
    if fraction.is_nan() {
        return 0;
    }
    let fraction = fraction.clamp(0.0, 1.0);
    (fraction * f64::from(height)).round() as i32
}
