//! Spiral stairs winding up around the sensor tubes.

use crate::error::Result;
use crate::world::{Block, BlockPos, World};

/// A square spiral of single blocks, one step up per block.
#[derive(Debug, Clone)]
pub struct Stairs {
    steps: Vec<BlockPos>,
    block: Block,
}

impl Stairs {
    /// Stairs centred on `centre`, `half_size` blocks out, `height` steps high.
    pub fn new(
        world: &mut impl World,
        centre: BlockPos,
        half_size: i32,
        height: i32,
        block: Block,
    ) -> Result<Self> {
        let ring = square_ring(half_size);
        let steps = (0..height.max(0))
            .map(|i| {
                let (dx, dz) = ring[i as usize % ring.len()];
                centre.offset(dx, i, dz)
            })
            .collect();

        let stairs = Self { steps, block };
        stairs.draw(world)?;
        Ok(stairs)
    }

    pub fn steps(&self) -> &[BlockPos] {
        &self.steps
    }

    pub fn draw(&self, world: &mut impl World) -> Result<()> {
        self.fill(world, self.block)
    }

    pub fn clear(&self, world: &mut impl World) -> Result<()> {
        self.fill(world, Block::AIR)
    }

    fn fill(&self, world: &mut impl World, block: Block) -> Result<()> {
        for pos in &self.steps {
            world.set_block(*pos, block)?;
        }
        Ok(())
    }
}

/// Positions around a square of the given half size, walked anticlockwise
/// seen from above.
fn square_ring(half_size: i32) -> Vec<(i32, i32)> {
    let h = half_size.max(1);
    let side = 2 * h;
    let mut ring = Vec::with_capacity(4 * side as usize);
    ring.extend((0..side).map(|i| (-h + i, -h)));
    ring.extend((0..side).map(|i| (h, -h + i)));
    ring.extend((0..side).map(|i| (h - i, h)));
    ring.extend((0..side).map(|i| (-h, h - i)));
    ring
}
