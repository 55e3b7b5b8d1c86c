//! Hero attacks monster
//!
//! Melee with bare hands or a wielded item, and objects or bolts that fly
//! into a monster. Bolts fired by monsters are resolved here too and
//! credited to the hero.

use super::{roll_em, CombatEffect, CombatResult};
use crate::dungeon::Coord;
use crate::error::{CoreError, Result};
use crate::monster::{
    redraw_monster, remove_monster, slime_split, Destination, MonsterFlags, MonsterId, Species,
};
use crate::object::{DamageDice, Item, StickKind};
use crate::player::{add_dam, str_plus, HeroFlags, RingKind};
use crate::state::Sim;

/// How the hero is attacking
#[derive(Debug)]
pub enum Strike<'w> {
    /// Bare hands, or the item held in hand
    Melee(Option<&'w mut Item>),
    /// Something thrown, fired or zapped, named for messages
    Thrown(&'w Item, &'w str),
}

/// The hero attacks whatever monster stands at `pos`
pub fn fight(sim: &mut Sim<'_>, pos: Coord, mut strike: Strike<'_>) -> Result<CombatResult> {
    let id = sim
        .state
        .monsters
        .at(pos, true)
        .ok_or(CoreError::MonsterNotFound(pos))?;
    let thrown = matches!(strike, Strike::Thrown(..));

    let m = sim.state.monsters.expect_mut(id)?;
    let (species, armor, flags, hp, name) = (m.species, m.armor, m.flags, m.hp, m.name());
    if m.is_disguised() {
        m.reveal_disguise();
        redraw_monster(sim, id);
        if !sim.state.hero.is_blind() {
            sim.msg(format!("wait! That's a {name}!"));
        }
        if !thrown {
            return Ok(CombatResult::MISS);
        }
    }
    sim.state.monsters.expect_mut(id)?.start_run(Destination::Hero);

    if let Strike::Melee(Some(weapon)) = &strike {
        if weapon.is_vorpalized_against(species) {
            sim.msg(format!("the {name} vanishes in a puff of smoke"));
            killed_by_hero(sim, id, false)?;
            return Ok(CombatResult {
                hit: true,
                defender_died: true,
                damage: hp,
                special_effect: Some(CombatEffect::Slain),
            });
        }
    }

    let hero = &sim.state.hero;
    let mut hit_plus = str_plus(hero.strength) + hero.ring_bonus(RingKind::AddHit);
    let mut damage_plus = add_dam(hero.strength) + hero.ring_bonus(RingKind::AddDamage);
    let level = hero.level;
    let dice = match &mut strike {
        Strike::Melee(Some(weapon)) => {
            if weapon.stick_kind() == Some(StickKind::Striking) {
                weapon.drain_striking();
            }
            hit_plus += weapon.hit_plus;
            damage_plus += weapon.damage_plus;
            weapon.damage.clone()
        }
        Strike::Melee(None) => DamageDice::single(1, 4),
        Strike::Thrown(item, _) => {
            hit_plus += item.hit_plus;
            damage_plus += item.damage_plus;
            item.throw_damage.clone()
        }
    };
    // sitting ducks are easier to hit
    if !flags.contains(MonsterFlags::RUNNING)
        || flags.intersects(MonsterFlags::ASLEEP | MonsterFlags::HELD)
    {
        hit_plus += 4;
    }

    let rolled = roll_em(&mut sim.state.rng, level, armor, &dice, hit_plus, damage_plus);
    let Some(damage) = rolled else {
        match strike {
            Strike::Thrown(_, what) => sim.msg(format!("the {what} misses the {name}")),
            Strike::Melee(_) => sim.msg(format!("you miss the {name}")),
        }
        return Ok(CombatResult::MISS);
    };
    match strike {
        Strike::Thrown(_, what) => sim.msg(format!("the {what} hits the {name}")),
        Strike::Melee(_) => sim.msg(format!("you hit the {name}")),
    }
    let mut result = CombatResult::hit(damage);

    if !thrown && sim.state.hero.flags.contains(HeroFlags::CAN_CONFUSE) {
        sim.state.hero.flags.remove(HeroFlags::CAN_CONFUSE);
        sim.state.monsters.expect_mut(id)?.flags.insert(MonsterFlags::CONFUSED);
        sim.msg("your hands stop glowing red");
        sim.msg(format!("the {name} appears confused"));
        result.special_effect = Some(CombatEffect::Confused);
    }

    if !sim.state.monsters.expect_mut(id)?.decrease_hp(damage) {
        killed_by_hero(sim, id, true)?;
        result.defender_died = true;
    } else if species == Species::SLIME {
        let chance = sim.state.options.slime_split_chance;
        if sim.state.rng.percent(chance) && slime_split(sim, id)?.is_some() {
            result.special_effect = Some(CombatEffect::Divided);
        }
    }
    Ok(result)
}

/// A flying object or bolt reached `pos`; returns the monster it hit
pub fn projectile_hit(
    sim: &mut Sim<'_>,
    pos: Coord,
    item: &Item,
    name: &str,
) -> Result<Option<MonsterId>> {
    let Some(id) = sim.state.monsters.at(pos, true) else {
        return Ok(None);
    };
    let result = fight(sim, pos, Strike::Thrown(item, name))?;
    Ok(result.hit.then_some(id))
}

/// The hero killed a monster: take it off the level, drop what it carried
/// and credit the experience
pub fn killed_by_hero(sim: &mut Sim<'_>, id: MonsterId, announce: bool) -> Result<()> {
    let m = remove_monster(sim, id)?;
    if announce {
        sim.msg(format!("you have defeated the {}", m.name()));
    }
    tracing::debug!(?id, species = m.name(), exp = m.exp, "monster killed");

    if let Some(level) = sim.state.hero.add_exp(m.exp, &mut sim.state.rng) {
        sim.msg(format!("Welcome to level {level}"));
    }
    let pos = m.pos;
    for mut item in m.pack {
        item.pos = pos;
        sim.state.floor_items.push(item);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::new_monster;
    use crate::object::WeaponKind;
    use crate::test_support::Fixture;

    fn sure_hit() -> Item {
        let mut item = Item::weapon(WeaponKind::Mace);
        item.hit_plus = 100;
        item
    }

    #[test]
    fn test_fight_nothing_is_an_error() {
        let mut fx = Fixture::lit_room();
        let mut sim = fx.sim();
        let pos = Coord::new(4, 4);
        assert_eq!(
            fight(&mut sim, pos, Strike::Melee(None)),
            Err(CoreError::MonsterNotFound(pos))
        );
    }

    #[test]
    fn test_kill_credits_exp_and_drops_pack() {
        let mut fx = Fixture::lit_room();
        let mut sim = fx.sim();
        let pos = Coord::new(9, 8);
        let id = new_monster(&mut sim, Species::parse('Z').unwrap(), pos);
        {
            let m = sim.state.monsters.get_mut(id).unwrap();
            m.hp = 1;
            m.exp = 6;
            m.pack.push(Item::weapon(WeaponKind::Dagger));
        }
        let mut mace = sure_hit();
        let result = fight(&mut sim, pos, Strike::Melee(Some(&mut mace))).unwrap();
        assert!(result.hit && result.defender_died);
        assert!(sim.state.monsters.get(id).is_none());
        assert_eq!(sim.state.hero.exp, 6);
        assert_eq!(sim.state.floor_items.len(), 1);
        assert_eq!(sim.state.floor_items[0].pos, pos);
        assert!(fx.display.saw("you have defeated the zombie"));
    }

    #[test]
    fn test_mimic_reveals_itself() {
        let mut fx = Fixture::lit_room();
        let mut sim = fx.sim();
        let pos = Coord::new(9, 8);
        let id = new_monster(&mut sim, Species::XEROC, pos);
        assert!(sim.state.monsters.get(id).unwrap().is_disguised());
        let result = fight(&mut sim, pos, Strike::Melee(None)).unwrap();
        assert_eq!(result, CombatResult::MISS);
        assert!(!sim.state.monsters.get(id).unwrap().is_disguised());
        assert!(fx.display.saw("wait! That's a xeroc!"));
    }

    #[test]
    fn test_vorpal_blade_slays_enemy() {
        let mut fx = Fixture::lit_room();
        let mut sim = fx.sim();
        let pos = Coord::new(9, 8);
        let id = new_monster(&mut sim, Species::DRAGON, pos);
        sim.state.monsters.get_mut(id).unwrap().hp = 1000;
        let mut blade = Item::vorpal(WeaponKind::LongSword, Species::DRAGON, 3);
        let result = fight(&mut sim, pos, Strike::Melee(Some(&mut blade))).unwrap();
        assert_eq!(result.special_effect, Some(CombatEffect::Slain));
        assert!(sim.state.monsters.is_empty());
    }

    #[test]
    fn test_striking_staff_drains_in_melee() {
        let mut fx = Fixture::lit_room();
        let mut sim = fx.sim();
        let pos = Coord::new(9, 8);
        let id = new_monster(&mut sim, Species::DRAGON, pos);
        sim.state.monsters.get_mut(id).unwrap().hp = 1000;
        let mut staff = sim
            .state
            .sticks
            .create(StickKind::Striking, &mut sim.state.rng);
        staff.charges = 1;
        fight(&mut sim, pos, Strike::Melee(Some(&mut staff))).unwrap();
        assert_eq!(staff.charges, 0);
        fight(&mut sim, pos, Strike::Melee(Some(&mut staff))).unwrap();
        assert_eq!(staff.damage, DamageDice::none());
        assert_eq!(staff.hit_plus, 0);
    }

    #[test]
    fn test_slime_divides_when_hit() {
        let mut fx = Fixture::lit_room();
        fx.state.options.slime_split_chance = 100;
        let mut sim = fx.sim();
        let pos = Coord::new(9, 8);
        let id = new_monster(&mut sim, Species::SLIME, pos);
        sim.state.monsters.get_mut(id).unwrap().hp = 1000;
        let mut mace = sure_hit();
        let result = fight(&mut sim, pos, Strike::Melee(Some(&mut mace))).unwrap();
        assert_eq!(result.special_effect, Some(CombatEffect::Divided));
        assert_eq!(sim.state.monsters.count_species(Species::SLIME), 2);
    }

    #[test]
    fn test_glowing_hands_confuse() {
        let mut fx = Fixture::lit_room();
        fx.state.hero.flags.insert(HeroFlags::CAN_CONFUSE);
        let mut sim = fx.sim();
        let pos = Coord::new(9, 8);
        let id = new_monster(&mut sim, Species::DRAGON, pos);
        sim.state.monsters.get_mut(id).unwrap().hp = 1000;
        let mut mace = sure_hit();
        fight(&mut sim, pos, Strike::Melee(Some(&mut mace))).unwrap();
        assert!(sim.state.monsters.get(id).unwrap().has(MonsterFlags::CONFUSED));
        assert!(!sim.state.hero.flags.contains(HeroFlags::CAN_CONFUSE));
        assert!(fx.display.saw("the dragon appears confused"));
    }

    #[test]
    fn test_projectile_hit_reports_victim() {
        let mut fx = Fixture::lit_room();
        let mut sim = fx.sim();
        let pos = Coord::new(4, 4);
        let id = new_monster(&mut sim, Species::DRAGON, pos);
        sim.state.monsters.get_mut(id).unwrap().hp = 1000;
        let missile = Item::magic_missile();
        assert_eq!(projectile_hit(&mut sim, pos, &missile, "missile").unwrap(), Some(id));
        assert_eq!(projectile_hit(&mut sim, Coord::new(5, 5), &missile, "missile").unwrap(), None);
        assert!(fx.display.saw("the missile hits the dragon"));
    }
}
