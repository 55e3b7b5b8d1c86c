//! Wands and staves: kinds, per-game appearances and naming

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use super::{DamageDice, Item, ItemKind};
use crate::consts::MAXSTICKS;
use crate::dungeon::Coord;
use crate::rng::GameRng;

/// The fourteen stick effects, in table order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum StickKind {
    #[strum(serialize = "light")]
    Light = 0,
    #[strum(serialize = "striking")]
    Striking = 1,
    #[strum(serialize = "lightning")]
    Lightning = 2,
    #[strum(serialize = "fire")]
    Fire = 3,
    #[strum(serialize = "cold")]
    Cold = 4,
    #[strum(serialize = "polymorph")]
    Polymorph = 5,
    #[strum(serialize = "magic missile")]
    MagicMissile = 6,
    #[strum(serialize = "haste monster")]
    HasteMonster = 7,
    #[strum(serialize = "slow monster")]
    SlowMonster = 8,
    #[strum(serialize = "drain life")]
    DrainLife = 9,
    #[strum(serialize = "nothing")]
    Nothing = 10,
    #[strum(serialize = "teleport away")]
    TeleportAway = 11,
    #[strum(serialize = "teleport to")]
    TeleportTo = 12,
    #[strum(serialize = "cancellation")]
    Cancellation = 13,
}

impl StickKind {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Relative frequency (percent) and base price
    const fn profile(self) -> (u32, u32) {
        match self {
            StickKind::Light => (12, 250),
            StickKind::Striking => (9, 75),
            StickKind::Lightning => (3, 330),
            StickKind::Fire => (3, 330),
            StickKind::Cold => (3, 330),
            StickKind::Polymorph => (15, 310),
            StickKind::MagicMissile => (10, 170),
            StickKind::HasteMonster => (9, 5),
            StickKind::SlowMonster => (11, 350),
            StickKind::DrainLife => (9, 300),
            StickKind::Nothing => (1, 5),
            StickKind::TeleportAway => (5, 340),
            StickKind::TeleportTo => (5, 50),
            StickKind::Cancellation => (5, 280),
        }
    }

    /// Sticks a careful player would rather not zap at a monster
    pub fn is_evil(self) -> bool {
        matches!(self, StickKind::HasteMonster | StickKind::TeleportTo)
    }
}

const WOOD: [&str; 33] = [
    "avocado wood", "balsa", "bamboo", "banyan", "birch", "cedar", "cherry", "cinnibar",
    "cypress", "dogwood", "driftwood", "ebony", "elm", "eucalyptus", "fall", "hemlock", "holly",
    "ironwood", "kukui wood", "mahogany", "manzanita", "maple", "oaken", "persimmon wood",
    "pecan", "pine", "poplar", "redwood", "rosewood", "spruce", "teak", "walnut", "zebrawood",
];

const METAL: [&str; 22] = [
    "aluminum", "beryllium", "bone", "brass", "bronze", "copper", "electrum", "gold", "iron",
    "lead", "magnesium", "mercury", "nickel", "pewter", "platinum", "steel", "silver", "silicon",
    "tin", "titanium", "tungsten", "zinc",
];

/// Wooden sticks are staves, metal ones wands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum StickForm {
    #[strum(serialize = "wand")]
    Wand,
    #[strum(serialize = "staff")]
    Staff,
}

/// What the player knows about one stick kind this game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickInfo {
    pub form: StickForm,
    pub material: String,
    pub discovered: bool,
    pub guess: Option<String>,
    /// Cumulative selection probability out of 100
    pub cumulative_prob: u32,
    pub worth: u32,
}

/// Per-game stick appearances and identification state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickCatalog {
    entries: Vec<StickInfo>,
}

impl StickCatalog {
    /// Assign every stick kind a distinct material at random
    pub fn new(rng: &mut GameRng) -> Self {
        let mut metal_used = [false; METAL.len()];
        let mut wood_used = [false; WOOD.len()];
        let mut entries = Vec::with_capacity(MAXSTICKS);
        let mut cumulative = 0;

        for kind in StickKind::iter() {
            let (form, material) = loop {
                if rng.rnd(2) == 0 {
                    let j = rng.rnd(METAL.len() as u32) as usize;
                    if !metal_used[j] {
                        metal_used[j] = true;
                        break (StickForm::Wand, METAL[j]);
                    }
                } else {
                    let j = rng.rnd(WOOD.len() as u32) as usize;
                    if !wood_used[j] {
                        wood_used[j] = true;
                        break (StickForm::Staff, WOOD[j]);
                    }
                }
            };
            let (prob, worth) = kind.profile();
            cumulative += prob;
            entries.push(StickInfo {
                form,
                material: material.to_string(),
                discovered: false,
                guess: None,
                cumulative_prob: cumulative,
                worth,
            });
        }

        Self { entries }
    }

    pub fn info(&self, kind: StickKind) -> &StickInfo {
        &self.entries[kind.index()]
    }

    pub fn is_staff(&self, kind: StickKind) -> bool {
        self.info(kind).form == StickForm::Staff
    }

    pub fn is_discovered(&self, kind: StickKind) -> bool {
        self.info(kind).discovered
    }

    pub fn discover(&mut self, kind: StickKind) {
        self.entries[kind.index()].discovered = true;
    }

    pub fn set_guess(&mut self, kind: StickKind, guess: impl Into<String>) {
        self.entries[kind.index()].guess = Some(guess.into());
    }

    /// Weighted random stick kind
    pub fn pick_kind(&self, rng: &mut GameRng) -> StickKind {
        let roll = rng.rnd(100);
        StickKind::iter()
            .find(|k| roll < self.info(*k).cumulative_prob)
            .unwrap_or(StickKind::Light)
    }

    /// A new stick of `kind` with its starting charges and dice
    pub fn create(&self, kind: StickKind, rng: &mut GameRng) -> Item {
        let mut item = Item {
            kind: ItemKind::Stick(kind),
            charges: 3 + rng.rnd(5),
            damage: if self.is_staff(kind) {
                DamageDice::single(2, 3)
            } else {
                DamageDice::single(1, 1)
            },
            throw_damage: DamageDice::single(1, 1),
            hit_plus: 0,
            damage_plus: 0,
            enemy: None,
            known: false,
            pos: Coord::default(),
        };
        match kind {
            StickKind::Striking => {
                item.hit_plus = 100;
                item.damage_plus = 3;
                item.damage = DamageDice::single(1, 8);
            }
            StickKind::Light => item.charges = 10 + rng.rnd(10),
            _ => {}
        }
        item
    }

    /// Shop value of a stick
    pub fn worth(&self, item: &Item) -> u32 {
        let Some(kind) = item.stick_kind() else {
            return 0;
        };
        let worth = self.info(kind).worth + 20 * item.charges;
        if item.known { worth } else { worth / 2 }
    }

    /// Name as shown in the inventory, e.g. "A staff of light [12 charges](oaken)"
    pub fn inventory_name(&self, item: &Item, reveal: bool) -> String {
        let Some(kind) = item.stick_kind() else {
            return String::new();
        };
        let info = self.info(kind);
        if info.discovered || reveal {
            let charges = if item.known || reveal {
                format!(" [{} charges]", item.charges)
            } else {
                String::new()
            };
            format!("A {} of {}{}({})", info.form, kind, charges, info.material)
        } else if let Some(guess) = &info.guess {
            format!("A {} called {}({})", info.form, guess, info.material)
        } else {
            format!("{} {} {}", article(&info.material), info.material, info.form)
        }
    }
}

fn article(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "An",
        _ => "A",
    }
}
