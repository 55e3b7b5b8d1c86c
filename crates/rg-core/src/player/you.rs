//! The hero

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::dungeon::{Coord, Region};
use crate::monster::MonsterId;
use crate::object::Item;
use crate::rng::GameRng;

bitflags! {
    /// Hero status flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct HeroFlags: u8 {
        const BLIND = 0x01;
        const CONFUSED = 0x02;
        /// Caught by a venus flytrap
        const HELD = 0x04;
        const FAST = 0x08;
        const HALLUCINATING = 0x10;
        const SEE_INVISIBLE = 0x20;
        /// Hands glow red: next melee hit confuses
        const CAN_CONFUSE = 0x40;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum RingKind {
    #[strum(serialize = "protection")]
    Protection,
    #[strum(serialize = "stealth")]
    Stealth,
    #[strum(serialize = "aggravate monster")]
    Aggravate,
    #[strum(serialize = "increase damage")]
    AddDamage,
    #[strum(serialize = "dexterity")]
    AddHit,
    #[strum(serialize = "see invisible")]
    SeeInvisible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ring {
    pub kind: RingKind,
    /// Enchantment for protection, damage and dexterity rings
    pub bonus: i32,
}

impl Ring {
    pub fn new(kind: RingKind, bonus: i32) -> Self {
        Self { kind, bonus }
    }
}

/// Hit bonus by strength 0..=31
const STR_PLUS: [i32; 32] = [
    -7, -6, -5, -4, -3, -2, -1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2,
    2, 2, 3,
];

/// Damage bonus by strength 0..=31
const ADD_DAM: [i32; 32] = [
    -7, -6, -5, -4, -3, -2, -1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 2, 3, 3, 4, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 6,
];

/// Experience needed to leave each level
const EXP_LEVELS: [u32; 20] = [
    10, 20, 40, 80, 160, 320, 640, 1300, 2600, 5200, 13000, 26000, 50000, 100000, 200000, 400000,
    800000, 2000000, 4000000, 8000000,
];

pub fn str_plus(strength: i32) -> i32 {
    STR_PLUS[strength.clamp(0, 31) as usize]
}

pub fn add_dam(strength: i32) -> i32 {
    ADD_DAM[strength.clamp(0, 31) as usize]
}

/// Experience level reached with `exp` points
pub fn level_for_exp(exp: u32) -> i32 {
    EXP_LEVELS.iter().take_while(|&&need| exp >= need).count() as i32 + 1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub pos: Coord,
    pub hp: i32,
    pub max_hp: i32,
    pub strength: i32,
    pub exp: u32,
    pub level: i32,
    /// Armor class; 10 is naked, lower is better
    pub armor: i32,
    pub flags: HeroFlags,
    pub weapon: Option<Item>,
    pub rings: [Option<Ring>; 2],
    pub region: Option<Region>,
    pub held_by: Option<MonsterId>,
    pub confused_turns: u32,
    /// Turns the hero is frozen and cannot act
    pub sleep_turns: u32,
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            pos: Coord::default(),
            hp: 12,
            max_hp: 12,
            strength: 16,
            exp: 0,
            level: 1,
            armor: 10,
            flags: HeroFlags::empty(),
            weapon: None,
            rings: [None, None],
            region: None,
            held_by: None,
            confused_turns: 0,
            sleep_turns: 0,
        }
    }
}

impl Hero {
    pub fn is_blind(&self) -> bool {
        self.flags.contains(HeroFlags::BLIND)
    }

    pub fn is_confused(&self) -> bool {
        self.flags.contains(HeroFlags::CONFUSED)
    }

    pub fn is_wearing(&self, kind: RingKind) -> bool {
        self.rings.iter().flatten().any(|r| r.kind == kind)
    }

    /// Summed enchantment of worn rings of `kind`
    pub fn ring_bonus(&self, kind: RingKind) -> i32 {
        self.rings
            .iter()
            .flatten()
            .filter(|r| r.kind == kind)
            .map(|r| r.bonus)
            .sum()
    }

    pub fn is_held_by(&self, id: MonsterId) -> bool {
        self.held_by == Some(id)
    }

    pub fn set_hold(&mut self, id: MonsterId) {
        self.held_by = Some(id);
        self.flags.insert(HeroFlags::HELD);
    }

    pub fn clear_hold(&mut self) {
        self.held_by = None;
        self.flags.remove(HeroFlags::HELD);
    }

    /// Take damage; returns false if the hero died
    pub fn decrease_hp(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        self.hp > 0
    }

    /// Halve hit points, returning what is left
    pub fn drain_hp(&mut self) -> i32 {
        self.hp /= 2;
        self.hp
    }

    /// Confuse for `turns`, stacking onto any confusion already running
    pub fn confuse(&mut self, turns: u32) {
        if self.is_confused() {
            self.confused_turns += turns;
        } else {
            self.confused_turns = turns;
        }
        self.flags.insert(HeroFlags::CONFUSED);
    }

    pub fn increase_sleep_turns(&mut self, turns: u32) {
        self.sleep_turns += turns;
    }

    /// Credit experience; returns the new level if it went up
    pub fn add_exp(&mut self, exp: u32, rng: &mut GameRng) -> Option<i32> {
        self.exp = self.exp.saturating_add(exp);
        let new_level = level_for_exp(self.exp);
        if new_level <= self.level {
            return None;
        }
        let gained = rng.roll((new_level - self.level) as u32, 10) as i32;
        self.max_hp += gained;
        self.hp += gained;
        self.level = new_level;
        Some(new_level)
    }
}
