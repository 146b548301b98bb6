//! Block types used by the scene.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Minecraft Pi block: a type id plus a data value (wool colour, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Block {
    pub id: u8,
    pub data: u8,
}

impl Block {
    pub const AIR: Block = Block::new(0);
    pub const STONE: Block = Block::new(1);
    pub const WATER: Block = Block::new(8);
    pub const LAVA: Block = Block::new(10);
    pub const GLASS: Block = Block::new(20);
    pub const LAPIS_LAZULI_BLOCK: Block = Block::new(22);
    pub const WOOL: Block = Block::new(35);
    pub const GOLD_BLOCK: Block = Block::new(41);
    pub const IRON_BLOCK: Block = Block::new(42);
    pub const OBSIDIAN: Block = Block::new(49);
    pub const DIAMOND_BLOCK: Block = Block::new(57);
    pub const GLOWSTONE_BLOCK: Block = Block::new(89);

    pub const fn new(id: u8) -> Self {
        Self { id, data: 0 }
    }

    /// The same block type with a different data value.
    pub const fn with_data(self, data: u8) -> Self {
        Self { id: self.id, data }
    }

    /// Wool of one of the 16 dye colours.
    pub const fn wool(colour: u8) -> Self {
        Self::WOOL.with_data(colour)
    }

    pub fn is_air(&self) -> bool {
        self.id == Self::AIR.id
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.id, self.data)
    }
}

/// Wool colour values.
pub mod colour {
    pub const WHITE: u8 = 0;
    pub const ORANGE: u8 = 1;
    pub const YELLOW: u8 = 4;
    pub const GREY: u8 = 7;
    pub const BLUE: u8 = 11;
    pub const RED: u8 = 14;
    pub const BLACK: u8 = 15;
}
