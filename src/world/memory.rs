//! A world kept entirely in memory.

use crate::error::Result;
use crate::world::{Block, BlockPos, World};
use std::collections::HashMap;

/// Blocks in a map, with a flat ground below `ground_level`.
///
/// Used for `--dry-run` and by tests to inspect exactly what a scene placed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorld {
    blocks: HashMap<BlockPos, Block>,
    player: BlockPos,
    ground_level: i32,
    chat: Vec<String>,
    writes: usize,
}

impl InMemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ground height returned for columns with nothing placed in them.
    pub fn with_ground_level(mut self, y: i32) -> Self {
        self.ground_level = y;
        self
    }

    pub fn set_player_tile_pos(&mut self, pos: BlockPos) {
        self.player = pos;
    }

    /// The block at a position; unplaced positions are air.
    pub fn block_at(&self, pos: BlockPos) -> Block {
        self.blocks.get(&pos).copied().unwrap_or(Block::AIR)
    }

    /// Positions of every non-air block.
    pub fn solid_positions(&self) -> impl Iterator<Item = &BlockPos> {
        self.blocks.keys()
    }

    pub fn solid_count(&self) -> usize {
        self.blocks.len()
    }

    /// Count of non-air blocks of the given kind.
    pub fn count_of(&self, block: Block) -> usize {
        self.blocks.values().filter(|b| **b == block).count()
    }

    /// Number of block writes made so far (a cuboid fill counts once).
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn chat(&self) -> &[String] {
        &self.chat
    }

    fn put(&mut self, pos: BlockPos, block: Block) {
        if block.is_air() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, block);
        }
    }
}

impl World for InMemoryWorld {
    fn set_block(&mut self, pos: BlockPos, block: Block) -> Result<()> {
        self.writes += 1;
        self.put(pos, block);
        Ok(())
    }

    fn set_blocks(&mut self, from: BlockPos, to: BlockPos, block: Block) -> Result<()> {
        self.writes += 1;
        for x in from.x.min(to.x)..=from.x.max(to.x) {
            for y in from.y.min(to.y)..=from.y.max(to.y) {
                for z in from.z.min(to.z)..=from.z.max(to.z) {
                    self.put(BlockPos::new(x, y, z), block);
                }
            }
        }
        Ok(())
    }

    fn get_block(&mut self, pos: BlockPos) -> Result<Block> {
        Ok(self.block_at(pos))
    }

    fn get_height(&mut self, x: i32, z: i32) -> Result<i32> {
        let highest = self
            .blocks
            .keys()
            .filter(|p| p.x == x && p.z == z)
            .map(|p| p.y)
            .max();
        Ok(highest.map_or(self.ground_level, |y| y.max(self.ground_level)))
    }

    fn player_tile_pos(&mut self) -> Result<BlockPos> {
        Ok(self.player)
    }

    fn post_to_chat(&mut self, message: &str) -> Result<()> {
        self.chat.push(message.to_string());
        Ok(())
    }
}
