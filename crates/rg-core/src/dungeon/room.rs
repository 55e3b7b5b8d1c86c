//! Rooms, passages and region handles

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::Coord;
use crate::rng::GameRng;

/// Opaque handle for a room or a corridor network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Room(usize),
    Passage(usize),
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct RoomFlags: u8 {
        const DARK = 0x01;
        /// Vanished room or corridor network
        const GONE = 0x02;
        const MAZE = 0x04;
    }
}

/// A rectangular room, walls included, or a passage pseudo-room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub region: Region,
    /// Upper-left wall corner
    pub origin: Coord,
    /// Width and height including walls
    pub size: Coord,
    pub flags: RoomFlags,
    /// Gold pile still lying in the room
    pub gold: Option<Coord>,
}

impl Room {
    pub fn new(index: usize, origin: Coord, size: Coord) -> Self {
        Self {
            region: Region::Room(index),
            origin,
            size,
            flags: RoomFlags::empty(),
            gold: None,
        }
    }

    /// Corridor networks are dark and "gone": they have no interior
    pub fn passage(index: usize) -> Self {
        Self {
            region: Region::Passage(index),
            origin: Coord::default(),
            size: Coord::default(),
            flags: RoomFlags::DARK | RoomFlags::GONE,
            gold: None,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.flags.contains(RoomFlags::DARK)
    }

    pub fn is_gone(&self) -> bool {
        self.flags.contains(RoomFlags::GONE)
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.flags.set(RoomFlags::DARK, dark);
    }

    /// Inside the bounding box, walls included
    pub fn contains(&self, pos: Coord) -> bool {
        !self.is_gone()
            && pos.x >= self.origin.x
            && pos.x < self.origin.x + self.size.x
            && pos.y >= self.origin.y
            && pos.y < self.origin.y + self.size.y
    }

    /// Inside the walls
    pub fn contains_interior(&self, pos: Coord) -> bool {
        pos.x > self.origin.x
            && pos.x < self.origin.x + self.size.x - 1
            && pos.y > self.origin.y
            && pos.y < self.origin.y + self.size.y - 1
    }

    /// A random interior cell
    pub fn random_position(&self, rng: &mut GameRng) -> Coord {
        let w = (self.size.x - 2).max(1) as u32;
        let h = (self.size.y - 2).max(1) as u32;
        Coord::new(
            self.origin.x + rng.rnd(w) as i32 + 1,
            self.origin.y + rng.rnd(h) as i32 + 1,
        )
    }
}
