//! Monster instances and the level's monster table

use serde::{Deserialize, Serialize};

use super::{MonsterFlags, Species};
use crate::dungeon::{Coord, Region};
use crate::error::{CoreError, Result};
use crate::object::{DamageDice, Item};

/// Unique identifier for monster instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(pub u32);

impl MonsterId {
    pub fn next(self) -> Self {
        MonsterId(self.0 + 1)
    }
}

/// Where a running monster is headed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Destination {
    #[default]
    Hero,
    Gold(Coord),
}

/// Behavioral state, derived from the monster's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiState {
    Sleeping,
    Wandering,
    Guarding,
    Chasing,
    Held,
    Cancelled,
    Disguised,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub species: Species,
    pub pos: Coord,
    pub hp: i32,
    pub max_hp: i32,
    pub level: i32,
    pub exp: u32,
    pub armor: i32,
    pub damage: DamageDice,
    pub flags: MonsterFlags,
    pub dest: Destination,
    pub pack: Vec<Item>,
    /// What the screen showed before the monster was drawn here
    pub tile_beneath: Option<char>,
    /// Glyph the monster is drawn as; its own letter unless disguised
    pub disguise: char,
    pub region: Option<Region>,
    /// Slowed monsters only move when this is set; it flips every turn
    pub turn: bool,
}

impl Monster {
    /// A monster with its species' base stats and a single hit point
    pub fn new(species: Species, pos: Coord) -> Self {
        let t = species.template();
        Self {
            id: MonsterId(0),
            species,
            pos,
            hp: 1,
            max_hp: 1,
            level: t.level,
            exp: t.exp,
            armor: t.armor,
            damage: t.damage.parse().unwrap_or_default(),
            flags: t.flags,
            dest: Destination::Hero,
            pack: Vec::new(),
            tile_beneath: None,
            disguise: species.letter(),
            region: None,
            turn: true,
        }
    }

    pub fn name(&self) -> &'static str {
        self.species.name()
    }

    pub fn has(&self, flag: MonsterFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn is_disguised(&self) -> bool {
        self.disguise != self.species.letter()
    }

    pub fn reveal_disguise(&mut self) {
        self.disguise = self.species.letter();
    }

    /// Wake up and head for `dest`; running breaks a hold
    pub fn start_run(&mut self, dest: Destination) {
        self.flags.remove(MonsterFlags::ASLEEP | MonsterFlags::HELD);
        self.flags.insert(MonsterFlags::RUNNING);
        self.dest = dest;
    }

    /// Take damage; returns false if the monster died
    pub fn decrease_hp(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        self.hp > 0
    }

    pub fn ai_state(&self) -> AiState {
        if self.is_disguised() {
            AiState::Disguised
        } else if self.has(MonsterFlags::HELD) {
            AiState::Held
        } else if self.has(MonsterFlags::RUNNING) {
            match self.dest {
                Destination::Hero => AiState::Chasing,
                Destination::Gold(_) => AiState::Guarding,
            }
        } else if self.has(MonsterFlags::ASLEEP) {
            AiState::Sleeping
        } else if self.has(MonsterFlags::CANCELLED) {
            AiState::Cancelled
        } else {
            AiState::Wandering
        }
    }
}

/// Every monster on the level, addressed by stable id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonsterTable {
    monsters: Vec<Monster>,
    next_id: MonsterId,
}

impl Default for MonsterId {
    fn default() -> Self {
        MonsterId(1)
    }
}

impl MonsterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a monster, assigning it a fresh id
    pub fn insert(&mut self, mut monster: Monster) -> MonsterId {
        let id = self.next_id;
        self.next_id = id.next();
        monster.id = id;
        self.monsters.push(monster);
        id
    }

    pub fn remove(&mut self, id: MonsterId) -> Option<Monster> {
        let index = self.monsters.iter().position(|m| m.id == id)?;
        Some(self.monsters.remove(index))
    }

    pub fn get(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|m| m.id == id)
    }

    /// Like [`MonsterTable::get_mut`], reporting a stale id as an error
    pub fn expect_mut(&mut self, id: MonsterId) -> Result<&mut Monster> {
        self.get_mut(id).ok_or(CoreError::UnknownMonster(id))
    }

    /// Monster standing at `pos`; disguised ones are skipped unless asked for
    pub fn at(&self, pos: Coord, include_disguised: bool) -> Option<MonsterId> {
        self.monsters
            .iter()
            .find(|m| m.pos == pos && (include_disguised || !m.is_disguised()))
            .map(|m| m.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter()
    }

    /// Snapshot of current ids, safe to hold while mutating the table
    pub fn ids(&self) -> Vec<MonsterId> {
        self.monsters.iter().map(|m| m.id).collect()
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    pub fn count_species(&self, species: Species) -> usize {
        self.monsters.iter().filter(|m| m.species == species).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kestrel(x: i32, y: i32) -> Monster {
        Monster::new(Species::from_letter('K').unwrap(), Coord::new(x, y))
    }

    #[test]
    fn test_insert_assigns_ids() {
        let mut table = MonsterTable::new();
        let a = table.insert(kestrel(1, 1));
        let b = table.insert(kestrel(2, 1));
        assert_ne!(a, b);
        assert_eq!(table.get(a).unwrap().id, a);
        assert_eq!(table.len(), 2);

        let removed = table.remove(a).unwrap();
        assert_eq!(removed.pos, Coord::new(1, 1));
        assert!(table.get(a).is_none());
        assert_eq!(table.expect_mut(a).unwrap_err(), CoreError::UnknownMonster(a));

        // ids are never reused
        let c = table.insert(kestrel(3, 3));
        assert!(c > b);
    }

    #[test]
    fn test_at_respects_disguise() {
        let mut table = MonsterTable::new();
        let mut mimic = Monster::new(Species::XEROC, Coord::new(4, 4));
        mimic.disguise = '!';
        let id = table.insert(mimic);
        assert_eq!(table.at(Coord::new(4, 4), true), Some(id));
        assert_eq!(table.at(Coord::new(4, 4), false), None);
    }

    #[test]
    fn test_ai_state_transitions() {
        let mut m = kestrel(0, 0);
        m.flags = MonsterFlags::ASLEEP;
        assert_eq!(m.ai_state(), AiState::Sleeping);

        m.start_run(Destination::Hero);
        assert_eq!(m.ai_state(), AiState::Chasing);
        assert!(!m.has(MonsterFlags::ASLEEP));

        m.dest = Destination::Gold(Coord::new(5, 5));
        assert_eq!(m.ai_state(), AiState::Guarding);

        m.flags.insert(MonsterFlags::HELD);
        assert_eq!(m.ai_state(), AiState::Held);

        m.flags = MonsterFlags::CANCELLED;
        assert_eq!(m.ai_state(), AiState::Cancelled);

        m.flags = MonsterFlags::empty();
        assert_eq!(m.ai_state(), AiState::Wandering);

        m.disguise = ']';
        assert_eq!(m.ai_state(), AiState::Disguised);
    }

    #[test]
    fn test_decrease_hp() {
        let mut m = kestrel(0, 0);
        m.hp = 5;
        assert!(m.decrease_hp(4));
        assert!(!m.decrease_hp(1));
    }
}
