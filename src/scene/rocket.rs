//! Launch pad and rocket.

use crate::error::Result;
use crate::scene::shape::{Shape, ShapeBlock};
use crate::world::{block::colour, Block, BlockPos, World};
use std::thread;
use std::time::Duration;
use tracing::info;

const PAD_HALF_WIDTH: i32 = 3;
const GANTRY_HEIGHT: i32 = 8;

/// A stone platform with a service gantry.
#[derive(Debug, Clone)]
pub struct LaunchPad {
    pos: BlockPos,
}

impl LaunchPad {
    pub fn new(world: &mut impl World, pos: BlockPos) -> Result<Self> {
        let pad = Self { pos };
        pad.redraw(world)?;
        Ok(pad)
    }

    /// Where a rocket standing on the pad has its origin.
    pub fn rocket_pos(&self) -> BlockPos {
        self.pos.offset(0, 1, 0)
    }

    fn fill(&self, world: &mut impl World, platform: Block, gantry: Block) -> Result<()> {
        world.set_blocks(
            self.pos.offset(-PAD_HALF_WIDTH, 0, -PAD_HALF_WIDTH),
            self.pos.offset(PAD_HALF_WIDTH, 0, PAD_HALF_WIDTH),
            platform,
        )?;
        world.set_blocks(
            self.pos.offset(PAD_HALF_WIDTH, 1, 0),
            self.pos.offset(PAD_HALF_WIDTH, GANTRY_HEIGHT, 0),
            gantry,
        )
    }

    pub fn redraw(&self, world: &mut impl World) -> Result<()> {
        self.fill(world, Block::STONE, Block::IRON_BLOCK)
    }

    pub fn clear(&self, world: &mut impl World) -> Result<()> {
        self.fill(world, Block::AIR, Block::AIR)
    }
}

/// A rocket that climbs straight up when launched.
#[derive(Debug, Clone)]
pub struct Rocket {
    home: BlockPos,
    shape: Shape,
}

impl Rocket {
    pub fn new(world: &mut impl World, pos: BlockPos) -> Result<Self> {
        let mut shape = Shape::new(pos, model());
        shape.draw(world)?;
        Ok(Self { home: pos, shape })
    }

    pub fn position(&self) -> BlockPos {
        self.shape.origin()
    }

    /// Fly `height` blocks up, one block per `step`.
    pub fn launch(&mut self, world: &mut impl World, height: i32, step: Duration) -> Result<()> {
        info!("Launching rocket from {}", self.home);
        for climbed in 1..=height {
            self.shape.move_to(world, self.home.offset(0, climbed, 0))?;
            if !step.is_zero() {
                thread::sleep(step);
            }
        }
        Ok(())
    }

    /// Put the rocket back on the pad.
    pub fn reset(&mut self, world: &mut impl World) -> Result<()> {
        self.shape.clear(world)?;
        self.shape.move_to(world, self.home)
    }

    pub fn clear(&mut self, world: &mut impl World) -> Result<()> {
        self.shape.clear(world)
    }
}

fn model() -> Vec<ShapeBlock> {
    let white = Block::wool(colour::WHITE);
    let red = Block::wool(colour::RED);

    let mut blocks: Vec<ShapeBlock> = (0..7)
        .map(|y| ShapeBlock {
            offset: BlockPos::new(0, y, 0),
            block: white,
        })
        .collect();
    blocks.push(ShapeBlock {
        offset: BlockPos::new(0, 7, 0),
        block: red,
    });

    for (dx, dz) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
        for y in 0..2 {
            blocks.push(ShapeBlock {
                offset: BlockPos::new(dx, y, dz),
                block: red,
            });
        }
    }
    blocks
}
