//! Grid coordinates and directions

use core::ops::{Add, AddAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A cell on the level grid (x = column, y = row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance, the metric every range check uses
    pub const fn distance(self, other: Coord) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// True if `other` is one of the eight surrounding cells
    pub fn is_adjacent(self, other: Coord) -> bool {
        self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }

    /// Unit step (each component in -1..=1) from `self` toward `target`
    pub fn direction_to(self, target: Coord) -> Coord {
        Coord::new((target.x - self.x).signum(), (target.y - self.y).signum())
    }

    /// True if `target` lies on a row, column or diagonal through `self`
    pub fn in_line_with(self, target: Coord) -> bool {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        self != target && (dx == 0 || dy == 0 || dx.abs() == dy.abs())
    }

    /// The 3x3 block centered on `self`, row by row, including `self`
    pub fn neighborhood(self) -> impl Iterator<Item = Coord> {
        (-1..=1).flat_map(move |dy| (-1..=1).map(move |dx| Coord::new(self.x + dx, self.y + dy)))
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Coord {
    fn add_assign(&mut self, rhs: Coord) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Coord {
    type Output = Coord;

    fn neg(self) -> Coord {
        Coord::new(-self.x, -self.y)
    }
}

/// Compass directions a zap or bolt can travel in
pub mod dir {
    use super::Coord;

    pub const NORTH: Coord = Coord::new(0, -1);
    pub const SOUTH: Coord = Coord::new(0, 1);
    pub const EAST: Coord = Coord::new(1, 0);
    pub const WEST: Coord = Coord::new(-1, 0);
    pub const NORTH_EAST: Coord = Coord::new(1, -1);
    pub const NORTH_WEST: Coord = Coord::new(-1, -1);
    pub const SOUTH_EAST: Coord = Coord::new(1, 1);
    pub const SOUTH_WEST: Coord = Coord::new(-1, 1);

    pub const ALL: [Coord; 8] = [
        NORTH, NORTH_EAST, EAST, SOUTH_EAST, SOUTH, SOUTH_WEST, WEST, NORTH_WEST,
    ];
}
