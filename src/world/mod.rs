//! The game world boundary.
//!
//! The scene is drawn through the [`World`] trait: a small set of synchronous
//! block and player calls matching the Minecraft Pi API. [`McpiConnection`]
//! speaks that API over TCP; [`InMemoryWorld`] keeps blocks in a map for dry
//! runs and tests.

pub mod block;
pub mod connection;
pub mod memory;

pub use block::Block;
pub use connection::McpiConnection;
pub use memory::InMemoryWorld;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Integer block coordinate in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// This position moved by the given amounts.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

impl Add for BlockPos {
    type Output = BlockPos;

    fn add(self, rhs: BlockPos) -> BlockPos {
        self.offset(rhs.x, rhs.y, rhs.z)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Synchronous access to a running game world.
///
/// Every call blocks until the world has accepted (or answered) it.
pub trait World {
    /// Place a single block.
    fn set_block(&mut self, pos: BlockPos, block: Block) -> Result<()>;

    /// Fill the cuboid between two corners (inclusive) with one block.
    fn set_blocks(&mut self, from: BlockPos, to: BlockPos, block: Block) -> Result<()>;

    /// Read the block at a position.
    fn get_block(&mut self, pos: BlockPos) -> Result<Block>;

    /// Y coordinate of the highest non-air block at a column.
    fn get_height(&mut self, x: i32, z: i32) -> Result<i32>;

    /// Tile position of the player.
    fn player_tile_pos(&mut self) -> Result<BlockPos>;

    /// Post a message to the in-game chat.
    fn post_to_chat(&mut self, message: &str) -> Result<()>;
}

impl<W: World + ?Sized> World for &mut W {
    fn set_block(&mut self, pos: BlockPos, block: Block) -> Result<()> {
        (**self).set_block(pos, block)
    }

    fn set_blocks(&mut self, from: BlockPos, to: BlockPos, block: Block) -> Result<()> {
        (**self).set_blocks(from, to, block)
    }

    fn get_block(&mut self, pos: BlockPos) -> Result<Block> {
        (**self).get_block(pos)
    }

    fn get_height(&mut self, x: i32, z: i32) -> Result<i32> {
        (**self).get_height(x, z)
    }

    fn player_tile_pos(&mut self) -> Result<BlockPos> {
        (**self).player_tile_pos()
    }

    fn post_to_chat(&mut self, message: &str) -> Result<()> {
        (**self).post_to_chat(message)
    }
}

impl<W: World + ?Sized> World for Box<W> {
    fn set_block(&mut self, pos: BlockPos, block: Block) -> Result<()> {
        (**self).set_block(pos, block)
    }

    fn set_blocks(&mut self, from: BlockPos, to: BlockPos, block: Block) -> Result<()> {
        (**self).set_blocks(from, to, block)
    }

    fn get_block(&mut self, pos: BlockPos) -> Result<Block> {
        (**self).get_block(pos)
    }

    fn get_height(&mut self, x: i32, z: i32) -> Result<i32> {
        (**self).get_height(x, z)
    }

    fn player_tile_pos(&mut self) -> Result<BlockPos> {
        (**self).player_tile_pos()
    }

    fn post_to_chat(&mut self, message: &str) -> Result<()> {
        (**self).post_to_chat(message)
    }
}

/// Anchor for a scene: five blocks east of the player, on the ground.
pub fn anchor_near_player(world: &mut impl World) -> Result<BlockPos> {
    let player = world.player_tile_pos()?;
    let x = player.x + 5;
    let y = world.get_height(x, player.z)?;
    Ok(BlockPos::new(x, y, player.z))
}
