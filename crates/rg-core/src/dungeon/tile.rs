//! Map glyphs and per-cell flags

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

pub const FLOOR: char = '.';
pub const PASSAGE: char = '#';
pub const DOOR: char = '+';
pub const STAIRS: char = '%';
pub const TRAP: char = '^';
pub const GOLD: char = '*';
pub const POTION: char = '!';
pub const SCROLL: char = '?';
pub const FOOD: char = ':';
pub const WEAPON: char = ')';
pub const ARMOR: char = ']';
pub const AMULET: char = ',';
pub const RING: char = '=';
pub const STICK: char = '/';
pub const PLAYER: char = '@';
pub const HWALL: char = '-';
pub const VWALL: char = '|';
pub const ULWALL: char = '┌';
pub const URWALL: char = '┐';
pub const LLWALL: char = '└';
pub const LRWALL: char = '┘';
pub const SOLID: char = ' ';
pub const MISSILE: char = '*';

bitflags! {
    /// Flags stored alongside each map cell
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CellFlags: u8 {
        /// Not a secret door or passage
        const REAL = 0x01;
        /// Part of a corridor
        const PASSAGE = 0x02;
        /// Part of a maze room
        const MAZE = 0x04;
    }
}

/// Wall pieces and solid rock
pub fn is_wall(ch: char) -> bool {
    matches!(ch, HWALL | VWALL | ULWALL | URWALL | LLWALL | LRWALL | SOLID)
}

/// Glyphs that reflect a bolt
pub fn reflects_bolt(ch: char) -> bool {
    ch == DOOR || is_wall(ch)
}

/// Can a monster (or the hero) stand on a cell showing `ch`?
///
/// Monster letters count as blocked.
pub fn step_ok(ch: char) -> bool {
    !is_wall(ch) && !ch.is_ascii_alphabetic()
}

pub fn is_floor_or_passage(ch: char) -> bool {
    ch == FLOOR || ch == PASSAGE
}
