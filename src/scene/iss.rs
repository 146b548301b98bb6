//! The space station model.

use crate::error::Result;
use crate::scene::shape::{Rotation, Shape, ShapeBlock};
use crate::world::{block::colour, Block, BlockPos, World};

/// A blocky ISS: a truss with solar wings at each end and a column of
/// modules across the middle.
#[derive(Debug, Clone)]
pub struct Iss {
    shape: Shape,
}

impl Iss {
    pub fn new(world: &mut impl World, pos: BlockPos) -> Result<Self> {
        let mut shape = Shape::new(pos, model());
        shape.draw(world)?;
        Ok(Self { shape })
    }

    /// Rotate the station. Returns whether anything moved.
    pub fn rotate(&mut self, world: &mut impl World, yaw: f64, pitch: f64, roll: f64) -> Result<bool> {
        self.shape.rotate(world, Rotation::new(yaw, pitch, roll))
    }

    pub fn rotation(&self) -> Rotation {
        self.shape.rotation()
    }

    pub fn occupied(&self) -> impl Iterator<Item = &BlockPos> {
        self.shape.drawn().keys()
    }

    pub fn clear(&mut self, world: &mut impl World) -> Result<()> {
        self.shape.clear(world)
    }
}

fn model() -> Vec<ShapeBlock> {
    let mut blocks = Vec::new();
    let mut put = |x: i32, y: i32, z: i32, block: Block| {
        blocks.push(ShapeBlock {
            offset: BlockPos::new(x, y, z),
            block,
        });
    };

    for x in -10..=10 {
        put(x, 0, 0, Block::IRON_BLOCK);
    }

    for x in (-10..=-6).chain(6..=10) {
        for z in (-3..=-1).chain(1..=3) {
            put(x, 0, z, Block::LAPIS_LAZULI_BLOCK);
        }
    }

    for z in (-4..=-1).chain(1..=4) {
        put(0, 0, z, Block::wool(colour::WHITE));
    }
    put(0, 1, 0, Block::GLOWSTONE_BLOCK);

    blocks
}
