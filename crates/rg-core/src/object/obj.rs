//! Item instances: sticks, weapons and transient projectiles

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{DamageDice, StickKind};
use crate::dungeon::{tile, Coord};
use crate::monster::Species;
use crate::rng::GameRng;

/// Melee weapons the hero can wield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum WeaponKind {
    #[strum(serialize = "mace")]
    Mace,
    #[strum(serialize = "long sword")]
    LongSword,
    #[strum(serialize = "two handed sword")]
    TwoHandedSword,
    #[strum(serialize = "dagger")]
    Dagger,
    #[strum(serialize = "spear")]
    Spear,
}

impl WeaponKind {
    /// Wielded and thrown damage
    pub fn damage(self) -> (DamageDice, DamageDice) {
        let (wield, throw) = match self {
            WeaponKind::Mace => ((2, 4), (1, 3)),
            WeaponKind::LongSword => ((3, 4), (1, 2)),
            WeaponKind::TwoHandedSword => ((4, 4), (1, 2)),
            WeaponKind::Dagger => ((1, 6), (1, 4)),
            WeaponKind::Spear => ((2, 3), (1, 6)),
        };
        (
            DamageDice::single(wield.0, wield.1),
            DamageDice::single(throw.0, throw.1),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Stick(StickKind),
    Weapon(WeaponKind),
    /// Conjured by a magic missile zap
    Missile,
    /// A bolt of lightning, flame or frost in flight
    Bolt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub charges: u32,
    pub damage: DamageDice,
    pub throw_damage: DamageDice,
    pub hit_plus: i32,
    pub damage_plus: i32,
    /// Species a vorpal weapon slays outright
    pub enemy: Option<Species>,
    /// Charges and bonuses identified by the player
    pub known: bool,
    /// Where the item lies or where its flight ended
    pub pos: Coord,
}

impl Item {
    pub fn weapon(kind: WeaponKind) -> Self {
        let (damage, throw_damage) = kind.damage();
        Self {
            kind: ItemKind::Weapon(kind),
            charges: 0,
            damage,
            throw_damage,
            hit_plus: 0,
            damage_plus: 0,
            enemy: None,
            known: false,
            pos: Coord::default(),
        }
    }

    /// A weapon enchanted against `enemy`, able to zap `charges` times
    pub fn vorpal(kind: WeaponKind, enemy: Species, charges: u32) -> Self {
        Self {
            enemy: Some(enemy),
            charges,
            ..Self::weapon(kind)
        }
    }

    pub fn magic_missile() -> Self {
        Self {
            kind: ItemKind::Missile,
            charges: 0,
            damage: DamageDice::none(),
            throw_damage: DamageDice::single(1, 8),
            hit_plus: 1000,
            damage_plus: 1,
            enemy: None,
            known: true,
            pos: Coord::default(),
        }
    }

    /// The projectile half of a bolt of lightning, flame or frost
    pub fn bolt() -> Self {
        Self {
            kind: ItemKind::Bolt,
            charges: 0,
            damage: DamageDice::single(6, 6),
            throw_damage: DamageDice::single(6, 6),
            hit_plus: 30,
            damage_plus: 0,
            enemy: None,
            known: true,
            pos: Coord::default(),
        }
    }

    pub fn is_stick(&self) -> bool {
        matches!(self.kind, ItemKind::Stick(_))
    }

    pub fn stick_kind(&self) -> Option<StickKind> {
        match self.kind {
            ItemKind::Stick(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_vorpalized(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon(_)) && self.enemy.is_some()
    }

    pub fn is_vorpalized_against(&self, species: Species) -> bool {
        self.is_vorpalized() && self.enemy == Some(species)
    }

    /// Spend a charge; never goes below zero
    pub fn use_charge(&mut self) {
        self.charges = self.charges.saturating_sub(1);
    }

    /// A striking stick used in melee loses a charge; an empty one goes dead
    pub fn drain_striking(&mut self) {
        if self.charges == 0 {
            self.damage = DamageDice::none();
            self.hit_plus = 0;
            self.damage_plus = 0;
        } else {
            self.charges -= 1;
        }
    }

    /// Fresh striking damage for each zap: usually 2d8+4, now and then 3d8+9
    pub fn set_striking_damage(&mut self, rng: &mut GameRng) {
        if rng.rnd(20) == 0 {
            self.damage = DamageDice::single(3, 8);
            self.damage_plus = 9;
        } else {
            self.damage = DamageDice::single(2, 8);
            self.damage_plus = 4;
        }
    }

    /// Map glyph for the item lying on the floor
    pub fn glyph(&self) -> char {
        match self.kind {
            ItemKind::Stick(_) => tile::STICK,
            ItemKind::Weapon(_) => tile::WEAPON,
            ItemKind::Missile | ItemKind::Bolt => tile::MISSILE,
        }
    }
}
