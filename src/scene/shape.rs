//! Block models that can be moved and rotated in place.

use crate::error::Result;
use crate::world::{Block, BlockPos, World};
use std::collections::BTreeMap;

/// One block of a shape, relative to the shape's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeBlock {
    pub offset: BlockPos,
    pub block: Block,
}

/// A set of blocks drawn relative to an origin.
///
/// Moving or rotating only writes the blocks that differ from what is
/// already drawn.
#[derive(Debug, Clone)]
pub struct Shape {
    origin: BlockPos,
    blocks: Vec<ShapeBlock>,
    rotation: Rotation,
    drawn: BTreeMap<BlockPos, Block>,
}

/// Yaw, pitch and roll in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl Rotation {
    pub fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Rotate an offset: roll about z, then pitch about x, then yaw about y.
    /// The result is rounded to the nearest block.
    pub fn apply(&self, offset: BlockPos) -> BlockPos {
        let (mut x, mut y, mut z) = (
            f64::from(offset.x),
            f64::from(offset.y),
            f64::from(offset.z),
        );

        let (sin, cos) = self.roll.to_radians().sin_cos();
        (x, y) = (x * cos - y * sin, x * sin + y * cos);

        let (sin, cos) = self.pitch.to_radians().sin_cos();
        (y, z) = (y * cos - z * sin, y * sin + z * cos);

        let (sin, cos) = self.yaw.to_radians().sin_cos();
        (x, z) = (x * cos + z * sin, -x * sin + z * cos);

        BlockPos::new(x.round() as i32, y.round() as i32, z.round() as i32)
    }
}

impl Shape {
    pub fn new(origin: BlockPos, blocks: Vec<ShapeBlock>) -> Self {
        Self {
            origin,
            blocks,
            rotation: Rotation::default(),
            drawn: BTreeMap::new(),
        }
    }

    pub fn origin(&self) -> BlockPos {
        self.origin
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// World positions the shape currently occupies.
    pub fn drawn(&self) -> &BTreeMap<BlockPos, Block> {
        &self.drawn
    }

    /// Where every block lands for a given origin and rotation. Later blocks
    /// win when two rotate onto the same position.
    fn layout(&self, origin: BlockPos, rotation: Rotation) -> BTreeMap<BlockPos, Block> {
        self.blocks
            .iter()
            .map(|b| (origin + rotation.apply(b.offset), b.block))
            .collect()
    }

    /// Replace what is drawn with `target`, touching only the differences.
    fn apply_layout(
        &mut self,
        world: &mut impl World,
        target: BTreeMap<BlockPos, Block>,
    ) -> Result<()> {
        for pos in self.drawn.keys() {
            if !target.contains_key(pos) {
                world.set_block(*pos, Block::AIR)?;
            }
        }
        for (pos, block) in &target {
            if self.drawn.get(pos) != Some(block) {
                world.set_block(*pos, *block)?;
            }
        }
        self.drawn = target;
        Ok(())
    }

    /// Draw every block, whether or not it is believed to be drawn already.
    pub fn draw(&mut self, world: &mut impl World) -> Result<()> {
        self.drawn.clear();
        let target = self.layout(self.origin, self.rotation);
        self.apply_layout(world, target)
    }

    /// Remove every drawn block.
    pub fn clear(&mut self, world: &mut impl World) -> Result<()> {
        self.apply_layout(world, BTreeMap::new())
    }

    /// Move the shape so its origin is at `origin`.
    pub fn move_to(&mut self, world: &mut impl World, origin: BlockPos) -> Result<()> {
        let target = self.layout(origin, self.rotation);
        self.origin = origin;
        self.apply_layout(world, target)
    }

    /// Rotate to an absolute orientation. Returns `false` without touching the
    /// world when the orientation is unchanged.
    pub fn rotate(&mut self, world: &mut impl World, rotation: Rotation) -> Result<bool> {
        if rotation == self.rotation {
            return Ok(false);
        }
        let target = self.layout(self.origin, rotation);
        self.rotation = rotation;
        self.apply_layout(world, target)?;
        Ok(true)
    }
}
