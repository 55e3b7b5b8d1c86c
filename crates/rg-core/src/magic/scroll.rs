//! Scroll effects that act on monsters and the wielded weapon
//!
//! Reading the scroll itself (identification, using it up) belongs to the
//! caller; these only apply what the scroll does.

use crate::monster::{plop_monster, random_monster, Destination, MonsterFlags, MonsterId, Species};
use crate::object::ItemKind;
use crate::player::HeroFlags;
use crate::state::Sim;

/// Reach of a hold monster scroll, in cells from the hero
const HOLD_RADIUS: i32 = 3;

/// Stop every monster near the hero from chasing it
///
/// Returns how many monsters were caught.
pub fn hold_monsters(sim: &mut Sim<'_>) -> usize {
    let hero = sim.state.hero.pos;
    let mut held = 0;
    for id in sim.state.monsters.ids() {
        let Some(m) = sim.state.monsters.get_mut(id) else {
            continue;
        };
        let d = m.pos - hero;
        if d.x.abs() > HOLD_RADIUS || d.y.abs() > HOLD_RADIUS {
            continue;
        }
        m.flags.remove(MonsterFlags::RUNNING);
        m.flags.insert(MonsterFlags::HELD);
        held += 1;
    }
    tracing::debug!(held, "monsters held");
    held
}

/// Conjure a random monster next to the hero
pub fn create_monster(sim: &mut Sim<'_>) -> Option<MonsterId> {
    let hero = sim.state.hero.pos;
    let created = plop_monster(sim, hero).and_then(|pos| random_monster(sim, pos));
    if created.is_none() {
        sim.msg("you hear a faint cry of anguish in the distance");
    }
    created
}

/// Every monster on the level wakes up and comes for the hero
pub fn aggravate(sim: &mut Sim<'_>) {
    for id in sim.state.monsters.ids() {
        if let Some(m) = sim.state.monsters.get_mut(id) {
            m.start_run(Destination::Hero);
        }
    }
    sim.msg("you hear a high pitched humming noise");
}

/// The hero's next melee hit confuses its victim
pub fn confuse_touch(sim: &mut Sim<'_>) {
    sim.state.hero.flags.insert(HeroFlags::CAN_CONFUSE);
    sim.msg("your hands begin to glow red");
}

/// Make the wielded weapon vorpal against one species
///
/// A weapon that already has an enemy cannot take a second one and is
/// destroyed instead.
pub fn vorpalize(sim: &mut Sim<'_>) {
    let kind = match sim.state.hero.weapon.as_ref().map(|w| &w.kind) {
        Some(&ItemKind::Weapon(kind)) => kind,
        _ => {
            sim.msg("you hear maniacal laughter in the distance.");
            return;
        }
    };

    if sim.state.hero.weapon.as_ref().is_some_and(|w| w.enemy.is_some()) {
        sim.state.hero.weapon = None;
        tracing::debug!(weapon = %kind, "doubly vorpalized weapon destroyed");
        sim.msg(format!("your {kind} vanishes in a puff of smoke"));
        return;
    }

    let enemy = Species::from_index(sim.state.rng.rnd(26) as usize);
    if let Some(weapon) = sim.state.hero.weapon.as_mut() {
        weapon.enemy = Some(enemy);
        weapon.hit_plus += 1;
        weapon.damage_plus += 1;
        weapon.charges = 1;
    }
    tracing::debug!(weapon = %kind, enemy = %enemy.letter(), "weapon vorpalized");
    sim.msg(format!("your {kind} gives off a flash of intense white light"));
}
