//! An analog clock face standing upright in the x-y plane.

use crate::error::Result;
use crate::world::{block::colour, Block, BlockPos, World};
use chrono::{NaiveTime, Timelike};
use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::TAU;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Clock {
    centre: BlockPos,
    radius: i32,
    face: Block,
    face_blocks: BTreeSet<BlockPos>,
    hands: BTreeMap<BlockPos, Block>,
    shown: Option<NaiveTime>,
}

impl Clock {
    /// Draw an empty face of `radius` blocks around `centre`.
    pub fn new(world: &mut impl World, centre: BlockPos, face: Block, radius: i32) -> Result<Self> {
        let face_blocks = ring(centre, radius);
        for pos in &face_blocks {
            world.set_block(*pos, face)?;
        }
        Ok(Self {
            centre,
            radius,
            face,
            face_blocks,
            hands: BTreeMap::new(),
            shown: None,
        })
    }

    /// Time currently shown, to the second.
    pub fn shown(&self) -> Option<NaiveTime> {
        self.shown
    }

    /// Point the hands at `time`. Returns `false` when nothing changed.
    pub fn set_time(&mut self, world: &mut impl World, time: NaiveTime) -> Result<bool> {
        let time = time.with_nanosecond(0).unwrap_or(time);
        if self.shown == Some(time) {
            return Ok(false);
        }

        let hands = self.hand_blocks(time);
        for pos in self.hands.keys() {
            if !hands.contains_key(pos) {
                world.set_block(*pos, Block::AIR)?;
            }
        }
        for (pos, block) in &hands {
            if self.hands.get(pos) != Some(block) {
                world.set_block(*pos, *block)?;
            }
        }

        debug!("Clock shows {}", time);
        self.hands = hands;
        self.shown = Some(time);
        Ok(true)
    }

    fn hand_blocks(&self, time: NaiveTime) -> BTreeMap<BlockPos, Block> {
        let seconds = f64::from(time.second());
        let minutes = f64::from(time.minute()) + seconds / 60.0;
        let hours = f64::from(time.hour() % 12) + minutes / 60.0;
        let r = f64::from(self.radius);

        // later hands are drawn over earlier ones
        let hands = [
            (seconds / 60.0, r * 0.9, Block::wool(colour::RED)),
            (minutes / 60.0, r * 0.8, Block::wool(colour::BLACK)),
            (hours / 12.0, r * 0.5, Block::wool(colour::BLACK)),
        ];

        let mut blocks = BTreeMap::new();
        for (fraction, length, block) in hands {
            for pos in hand_line(self.centre, fraction * TAU, length) {
                if !self.face_blocks.contains(&pos) {
                    blocks.insert(pos, block);
                }
            }
        }
        blocks
    }

    /// Remove the face and hands.
    pub fn clear(&mut self, world: &mut impl World) -> Result<()> {
        for pos in self.face_blocks.iter().chain(self.hands.keys()) {
            world.set_block(*pos, Block::AIR)?;
        }
        self.hands.clear();
        self.shown = None;
        Ok(())
    }

    pub fn face(&self) -> Block {
        self.face
    }
}

/// Blocks on a circle of the given radius.
fn ring(centre: BlockPos, radius: i32) -> BTreeSet<BlockPos> {
    let r = f64::from(radius);
    (0..360)
        .map(|deg| {
            let angle = f64::from(deg).to_radians();
            centre.offset((angle.sin() * r).round() as i32, (angle.cos() * r).round() as i32, 0)
        })
        .collect()
}

/// A line from the centre out at `angle` (clockwise from twelve o'clock).
fn hand_line(centre: BlockPos, angle: f64, length: f64) -> Vec<BlockPos> {
    let steps = length.ceil().max(1.0) as i32;
    let (dx, dy) = (angle.sin() * length, angle.cos() * length);
    (0..=steps)
        .map(|s| {
            let t = f64::from(s) / f64::from(steps);
            centre.offset((dx * t).round() as i32, (dy * t).round() as i32, 0)
        })
        .collect()
}
