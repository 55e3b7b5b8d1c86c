//! Level query surface
//!
//! The simulation never owns level topology. It reads tiles, flags and
//! room membership through [`LevelMap`]; [`Grid`] is a plain in-memory
//! implementation for embedders that have no level of their own.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::tile::{self, CellFlags};
use super::{Coord, Region, Room};
use crate::consts::{COLNO, ROWNO};

/// Read/write access to one dungeon level's terrain
pub trait LevelMap {
    fn in_bounds(&self, pos: Coord) -> bool;

    /// Terrain or object glyph at `pos`; solid rock off the map
    fn tile_at(&self, pos: Coord) -> char;

    fn set_tile(&mut self, pos: Coord, ch: char);

    fn flags_at(&self, pos: Coord) -> CellFlags;

    /// Room whose walls enclose `pos`, or the passage network it belongs to
    fn region_at(&self, pos: Coord) -> Option<Region>;

    /// Passage network a door or corridor cell connects to
    fn passage_at(&self, pos: Coord) -> Option<Region>;

    fn room_count(&self) -> usize;

    fn room(&self, region: Region) -> Option<&Room>;

    fn room_mut(&mut self, region: Region) -> Option<&mut Room>;

    /// Is the object lying at `pos` a scroll of scare monster?
    fn is_scare_monster(&self, pos: Coord) -> bool;

    fn is_floor_or_passage(&self, pos: Coord) -> bool {
        tile::is_floor_or_passage(self.tile_at(pos))
    }

    /// True for corridors and vanished rooms
    fn is_gone(&self, region: Region) -> bool {
        self.room(region).is_none_or(Room::is_gone)
    }
}

/// An in-memory level grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<char>,
    flags: Vec<CellFlags>,
    passage_ids: Vec<Option<usize>>,
    rooms: Vec<Room>,
    passages: Vec<Room>,
    scare: HashSet<Coord>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(COLNO, ROWNO)
    }
}

impl Grid {
    /// A level of solid rock
    pub fn new(width: i32, height: i32) -> Self {
        let cells = (width * height).max(0) as usize;
        Self {
            width,
            height,
            tiles: vec![tile::SOLID; cells],
            flags: vec![CellFlags::REAL; cells],
            passage_ids: vec![None; cells],
            rooms: Vec::new(),
            passages: Vec::new(),
            scare: HashSet::new(),
        }
    }

    fn index(&self, pos: Coord) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    /// Carve a walled room with a floor and return its handle
    pub fn add_room(&mut self, origin: Coord, size: Coord, dark: bool) -> Region {
        let index = self.rooms.len();
        let mut room = Room::new(index, origin, size);
        room.set_dark(dark);

        let (right, bottom) = (origin.x + size.x - 1, origin.y + size.y - 1);
        for y in origin.y..=bottom {
            for x in origin.x..=right {
                let ch = match (x, y) {
                    _ if x == origin.x && y == origin.y => tile::ULWALL,
                    _ if x == right && y == origin.y => tile::URWALL,
                    _ if x == origin.x && y == bottom => tile::LLWALL,
                    _ if x == right && y == bottom => tile::LRWALL,
                    _ if y == origin.y || y == bottom => tile::HWALL,
                    _ if x == origin.x || x == right => tile::VWALL,
                    _ => tile::FLOOR,
                };
                self.set_tile(Coord::new(x, y), ch);
            }
        }

        self.rooms.push(room);
        Region::Room(index)
    }

    fn ensure_passage(&mut self, passage: usize) -> Region {
        while self.passages.len() <= passage {
            let next = self.passages.len();
            self.passages.push(Room::passage(next));
        }
        Region::Passage(passage)
    }

    /// Put a door in a room wall, leading into passage network `passage`
    pub fn add_door(&mut self, pos: Coord, passage: usize) {
        self.ensure_passage(passage);
        self.set_tile(pos, tile::DOOR);
        if let Some(i) = self.index(pos) {
            self.passage_ids[i] = Some(passage);
        }
    }

    /// Lay corridor cells belonging to passage network `passage`
    pub fn add_passage(&mut self, cells: &[Coord], passage: usize) -> Region {
        let region = self.ensure_passage(passage);
        for &pos in cells {
            self.set_tile(pos, tile::PASSAGE);
            if let Some(i) = self.index(pos) {
                self.flags[i] |= CellFlags::PASSAGE;
                self.passage_ids[i] = Some(passage);
            }
        }
        region
    }

    /// Drop an object glyph on the floor
    pub fn place(&mut self, pos: Coord, ch: char) {
        self.set_tile(pos, ch);
    }

    /// Drop a gold pile and remember it on the enclosing room
    pub fn place_gold(&mut self, pos: Coord) {
        self.set_tile(pos, tile::GOLD);
        if let Some(region @ Region::Room(_)) = self.region_at(pos) {
            if let Some(room) = self.room_mut(region) {
                room.gold = Some(pos);
            }
        }
    }

    pub fn place_scare_monster(&mut self, pos: Coord) {
        self.set_tile(pos, tile::SCROLL);
        self.scare.insert(pos);
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

impl LevelMap for Grid {
    fn in_bounds(&self, pos: Coord) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn tile_at(&self, pos: Coord) -> char {
        self.index(pos).map_or(tile::SOLID, |i| self.tiles[i])
    }

    fn set_tile(&mut self, pos: Coord, ch: char) {
        if let Some(i) = self.index(pos) {
            self.tiles[i] = ch;
            if ch != tile::SCROLL {
                self.scare.remove(&pos);
            }
        }
    }

    fn flags_at(&self, pos: Coord) -> CellFlags {
        self.index(pos).map_or(CellFlags::empty(), |i| self.flags[i])
    }

    fn region_at(&self, pos: Coord) -> Option<Region> {
        if self.flags_at(pos).contains(CellFlags::PASSAGE) {
            return self.passage_at(pos);
        }
        self.rooms.iter().find(|r| r.contains(pos)).map(|r| r.region)
    }

    fn passage_at(&self, pos: Coord) -> Option<Region> {
        self.index(pos)
            .and_then(|i| self.passage_ids[i])
            .map(Region::Passage)
    }

    fn room_count(&self) -> usize {
        self.rooms.len()
    }

    fn room(&self, region: Region) -> Option<&Room> {
        match region {
            Region::Room(i) => self.rooms.get(i),
            Region::Passage(i) => self.passages.get(i),
        }
    }

    fn room_mut(&mut self, region: Region) -> Option<&mut Room> {
        match region {
            Region::Room(i) => self.rooms.get_mut(i),
            Region::Passage(i) => self.passages.get_mut(i),
        }
    }

    fn is_scare_monster(&self, pos: Coord) -> bool {
        self.scare.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_room_draws_walls() {
        let mut grid = Grid::new(20, 10);
        let region = grid.add_room(Coord::new(1, 1), Coord::new(6, 5), false);
        assert_eq!(region, Region::Room(0));
        assert_eq!(grid.tile_at(Coord::new(1, 1)), tile::ULWALL);
        assert_eq!(grid.tile_at(Coord::new(6, 5)), tile::LRWALL);
        assert_eq!(grid.tile_at(Coord::new(3, 1)), tile::HWALL);
        assert_eq!(grid.tile_at(Coord::new(1, 3)), tile::VWALL);
        assert_eq!(grid.tile_at(Coord::new(3, 3)), tile::FLOOR);
        assert_eq!(grid.region_at(Coord::new(3, 3)), Some(region));
        assert!(!grid.is_gone(region));
    }

    #[test]
    fn test_out_of_bounds_is_rock() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.tile_at(Coord::new(-1, 0)), tile::SOLID);
        assert_eq!(grid.tile_at(Coord::new(5, 2)), tile::SOLID);
        assert_eq!(grid.region_at(Coord::new(9, 9)), None);
    }

    #[test]
    fn test_doors_and_passages() {
        let mut grid = Grid::new(20, 10);
        let room = grid.add_room(Coord::new(1, 1), Coord::new(6, 5), false);
        grid.add_door(Coord::new(6, 3), 0);
        let passage = grid.add_passage(&[Coord::new(7, 3), Coord::new(8, 3)], 0);

        assert_eq!(grid.region_at(Coord::new(6, 3)), Some(room));
        assert_eq!(grid.passage_at(Coord::new(6, 3)), Some(passage));
        assert_eq!(grid.region_at(Coord::new(8, 3)), Some(passage));
        assert!(grid.is_gone(passage));
        assert!(grid.flags_at(Coord::new(7, 3)).contains(CellFlags::PASSAGE));
    }

    #[test]
    fn test_gold_and_scare_monster() {
        let mut grid = Grid::new(20, 10);
        let room = grid.add_room(Coord::new(1, 1), Coord::new(6, 5), false);
        grid.place_gold(Coord::new(3, 3));
        assert_eq!(grid.room(room).unwrap().gold, Some(Coord::new(3, 3)));

        grid.place_scare_monster(Coord::new(4, 3));
        assert!(grid.is_scare_monster(Coord::new(4, 3)));
        grid.set_tile(Coord::new(4, 3), tile::FLOOR);
        assert!(!grid.is_scare_monster(Coord::new(4, 3)));
    }
}
