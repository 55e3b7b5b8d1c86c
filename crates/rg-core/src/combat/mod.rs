//! Combat system
//!
//! Hit rolls, damage rolls and saving throws shared by melee, thrown
//! objects and bolts. Hero-versus-monster lives in `uhitm`,
//! monster-versus-hero in `mhitu`.

mod mhitu;
mod uhitm;

use crate::monster::Monster;
use crate::object::DamageDice;
use crate::player::RingKind;
use crate::rng::GameRng;
use crate::state::Sim;

pub use mhitu::monster_attack_hero;
pub use uhitm::{fight, killed_by_hero, projectile_hit, Strike};

/// Hazard classes a saving throw can be made against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveClass {
    Poison,
    Paralyzation,
    Death,
    Breath,
    Magic,
}

impl SaveClass {
    /// Added to the base need of 14
    pub const fn modifier(self) -> i32 {
        match self {
            SaveClass::Poison | SaveClass::Paralyzation | SaveClass::Death => 0,
            SaveClass::Breath => 2,
            SaveClass::Magic => 3,
        }
    }
}

/// Roll a d20 needed to resist, for a creature of `level`
pub fn save_need(class: SaveClass, level: i32, bonus: i32) -> i32 {
    14 + class.modifier() - level / 2 - bonus
}

/// Saving throw for a creature of `level`; `bonus` lowers the roll needed
pub fn save_throw(rng: &mut GameRng, class: SaveClass, level: i32, bonus: i32) -> bool {
    rng.roll(1, 20) as i32 >= save_need(class, level, bonus)
}

/// Chance of passing, for checking rates against a large sample
pub fn pass_probability(class: SaveClass, level: i32, bonus: i32) -> f64 {
    let need = save_need(class, level, bonus);
    f64::from((21 - need).clamp(0, 20)) / 20.0
}

pub fn monster_save(rng: &mut GameRng, class: SaveClass, monster: &Monster) -> bool {
    save_throw(rng, class, monster.level, 0)
}

/// The hero's saving throw; rings of protection help against magic
pub fn hero_save(sim: &mut Sim<'_>, class: SaveClass) -> bool {
    let hero = &sim.state.hero;
    let bonus = if class == SaveClass::Magic {
        hero.ring_bonus(RingKind::Protection)
    } else {
        0
    };
    save_throw(&mut sim.state.rng, class, hero.level, bonus)
}

/// One swing: d20 plus bonus against what the level and armor demand
pub fn swing(rng: &mut GameRng, level: i32, armor: i32, hit_plus: i32) -> bool {
    let res = rng.rnd(20) as i32;
    res + hit_plus >= 20 - level - armor
}

/// Roll each part of `dice` as a separate swing
///
/// Returns the total damage if any part connected.
pub fn roll_em(
    rng: &mut GameRng,
    level: i32,
    defender_armor: i32,
    dice: &DamageDice,
    hit_plus: i32,
    damage_plus: i32,
) -> Option<i32> {
    let mut hit = false;
    let mut total = 0;
    for die in dice.parts() {
        if swing(rng, level, defender_armor, hit_plus) {
            let rolled = rng.roll(die.count, die.sides) as i32;
            total += (rolled + damage_plus).max(0);
            hit = true;
        }
    }
    hit.then_some(total)
}

/// Outcome of one attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatResult {
    /// Whether the attack connected
    pub hit: bool,
    /// Whether the defender died
    pub defender_died: bool,
    /// Damage dealt
    pub damage: i32,
    /// Special effect triggered
    pub special_effect: Option<CombatEffect>,
}

impl CombatResult {
    pub const MISS: Self = Self {
        hit: false,
        defender_died: false,
        damage: 0,
        special_effect: None,
    };

    pub const fn hit(damage: i32) -> Self {
        Self {
            hit: true,
            defender_died: false,
            damage,
            special_effect: None,
        }
    }
}

/// Special effects that can occur during combat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatEffect {
    /// A flytrap got hold of the hero
    Held,
    /// Frozen stiff by an ice monster
    Frozen,
    /// The hero's glowing hands confused the monster
    Confused,
    /// A vorpal blade slew its enemy outright
    Slain,
    /// A slime split in two
    Divided,
}
