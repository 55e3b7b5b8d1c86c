//! Monster species templates
//!
//! One template per capital letter. Stats are those of level 1..26; deeper
//! levels scale them when the monster is created.

use core::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::consts::NUM_SPECIES;
use crate::error::{CoreError, Result};
use crate::magic::BoltKind;

bitflags! {
    /// Monster status and behavior flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MonsterFlags: u16 {
        const ASLEEP = 0x0001;
        /// Attacks on sight
        const MEAN = 0x0002;
        /// Guards gold
        const GREEDY = 0x0004;
        const INVISIBLE = 0x0008;
        /// Cannot move
        const HELD = 0x0010;
        /// Special powers nullified
        const CANCELLED = 0x0020;
        const HASTED = 0x0040;
        const SLOWED = 0x0080;
        /// Moving toward its destination every turn
        const RUNNING = 0x0100;
        /// Already seen by the hero (gaze fired)
        const FOUND = 0x0200;
        const REGENERATES = 0x0400;
        const FLIES = 0x0800;
        /// Next hit confuses the victim
        const CAN_CONFUSE = 0x1000;
        /// Stumbles around at random
        const CONFUSED = 0x2000;
    }
}

/// Static description of a species
#[derive(Debug, Clone, Copy)]
pub struct SpeciesTemplate {
    pub name: &'static str,
    /// Percent chance of carrying an item
    pub carry: u32,
    pub flags: MonsterFlags,
    pub exp: u32,
    pub level: i32,
    pub armor: i32,
    pub damage: &'static str,
}

const fn template(
    name: &'static str,
    carry: u32,
    flags: MonsterFlags,
    exp: u32,
    level: i32,
    armor: i32,
    damage: &'static str,
) -> SpeciesTemplate {
    SpeciesTemplate {
        name,
        carry,
        flags,
        exp,
        level,
        armor,
        damage,
    }
}

const NONE: MonsterFlags = MonsterFlags::empty();
const MEAN: MonsterFlags = MonsterFlags::MEAN;

static TEMPLATES: [SpeciesTemplate; NUM_SPECIES] = [
    template("aquator", 0, MEAN, 20, 5, 2, "0d0/0d0"),
    template("bat", 0, MonsterFlags::FLIES, 1, 1, 3, "1d2"),
    template("centaur", 15, NONE, 17, 4, 4, "1d2/1d5/1d5"),
    template("dragon", 100, MEAN, 5000, 10, -1, "1d8/1d8/3d10"),
    template("emu", 0, MEAN, 2, 1, 7, "1d2"),
    template("venus flytrap", 0, MEAN, 80, 8, 3, "0d0"),
    template(
        "griffin",
        20,
        MEAN.union(MonsterFlags::FLIES).union(MonsterFlags::REGENERATES),
        2000,
        13,
        2,
        "4d3/3d5",
    ),
    template("hobgoblin", 0, MEAN, 3, 1, 5, "1d8"),
    template("ice monster", 0, NONE, 5, 1, 9, "0d0"),
    template("jabberwock", 70, NONE, 3000, 15, 6, "2d12/2d4"),
    template("kestrel", 0, MEAN.union(MonsterFlags::FLIES), 1, 1, 7, "1d4"),
    template("leprechaun", 0, NONE, 10, 3, 8, "1d1"),
    template("medusa", 40, MEAN.union(MonsterFlags::CAN_CONFUSE), 200, 8, 2, "3d4/3d4/2d5"),
    template("nymph", 100, NONE, 37, 3, 9, "0d0"),
    template("orc", 15, MonsterFlags::GREEDY, 5, 1, 6, "1d8"),
    template("phantom", 0, MonsterFlags::INVISIBLE, 120, 8, 3, "4d4"),
    template("quagga", 0, MEAN, 15, 3, 3, "1d5/1d5"),
    template("rattlesnake", 0, MEAN, 9, 2, 3, "1d6"),
    template("slime", 0, MEAN, 1, 2, 8, "1d3"),
    template("troll", 50, MEAN.union(MonsterFlags::REGENERATES), 120, 6, 4, "1d8/1d8/2d6"),
    template("ur-vile", 0, MEAN, 190, 7, -2, "1d3/1d3/1d3/4d6"),
    template("vampire", 20, MEAN.union(MonsterFlags::REGENERATES), 350, 8, 1, "1d10"),
    template("wraith", 0, NONE, 55, 5, 4, "1d6"),
    template("xeroc", 30, NONE, 100, 7, 7, "4d4"),
    template("yeti", 30, NONE, 50, 4, 6, "1d6/1d6"),
    template("zombie", 0, MEAN, 6, 2, 8, "1d8"),
];

/// A monster species, identified by its letter 'A'..='Z'
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Species(u8);

impl Species {
    pub const AQUATOR: Species = Species(0);
    pub const DRAGON: Species = Species(3);
    pub const FLYTRAP: Species = Species(5);
    pub const ICE_MONSTER: Species = Species(8);
    pub const LEPRECHAUN: Species = Species(11);
    pub const MEDUSA: Species = Species(12);
    pub const NYMPH: Species = Species(13);
    pub const SLIME: Species = Species(18);
    pub const XEROC: Species = Species(23);

    pub fn from_letter(letter: char) -> Option<Species> {
        letter
            .is_ascii_uppercase()
            .then(|| Species(letter as u8 - b'A'))
    }

    /// Like [`Species::from_letter`] but reports a bad letter as an error
    pub fn parse(letter: char) -> Result<Species> {
        Self::from_letter(letter).ok_or(CoreError::UnknownSpecies(letter))
    }

    /// Species at position `index` of the alphabet (wraps past 'Z')
    pub fn from_index(index: usize) -> Species {
        Species((index % NUM_SPECIES) as u8)
    }

    pub fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn template(self) -> &'static SpeciesTemplate {
        &TEMPLATES[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.template().name
    }

    pub fn all() -> impl Iterator<Item = Species> {
        (0..NUM_SPECIES as u8).map(Species)
    }

    /// Flame bolts bounce off
    pub fn is_fire_immune(self) -> bool {
        self == Species::DRAGON
    }

    /// Bolt a monster of this species breathes at the hero, if any
    pub fn breath(self) -> Option<BoltKind> {
        match self {
            Species::DRAGON => Some(BoltKind::Flame),
            Species::ICE_MONSTER => Some(BoltKind::Frost),
            _ => None,
        }
    }
}

impl fmt::Debug for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Species('{}')", self.letter())
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
