//! Dungeon system
//!
//! Coordinates, map glyphs, rooms and the level query surface.

mod coord;
mod level;
mod room;
pub mod tile;

pub use coord::{dir, Coord};
pub use level::{Grid, LevelMap};
pub use room::{Region, Room, RoomFlags};
pub use tile::{step_ok, CellFlags};
