//! Monster attacks hero

use super::{roll_em, CombatEffect, CombatResult};
use crate::consts::MAX_FREEZE;
use crate::error::{CoreError, Result};
use crate::monster::{redraw_monster, MonsterFlags, MonsterId, Species};
use crate::player::{DeathCause, RingKind};
use crate::state::Sim;

/// A monster next to the hero swings at it
pub fn monster_attack_hero(sim: &mut Sim<'_>, id: MonsterId) -> Result<CombatResult> {
    let m = sim
        .state
        .monsters
        .get_mut(id)
        .ok_or(CoreError::UnknownMonster(id))?;
    // a mimic gives itself away by attacking
    let disguised = m.is_disguised();
    m.reveal_disguise();
    let (species, level, name) = (m.species, m.level, m.name());
    let cancelled = m.has(MonsterFlags::CANCELLED);
    let dice = m.damage.clone();
    if disguised {
        redraw_monster(sim, id);
    }

    let hero = &sim.state.hero;
    let armor = hero.armor - hero.ring_bonus(RingKind::Protection);
    let hit_plus = if hero.sleep_turns > 0 { 4 } else { 0 };
    let Some(damage) = roll_em(&mut sim.state.rng, level, armor, &dice, hit_plus, 0) else {
        sim.msg(format!("the {name} misses you"));
        return Ok(CombatResult::MISS);
    };

    sim.msg(format!("the {name} hits you"));
    let mut result = CombatResult::hit(damage);
    if !sim.state.hero.decrease_hp(damage) {
        sim.state.kill_hero(DeathCause::Monster(species));
        result.defender_died = true;
        return Ok(result);
    }

    if cancelled {
        return Ok(result);
    }
    match species {
        Species::FLYTRAP => {
            sim.state.hero.set_hold(id);
            result.special_effect = Some(CombatEffect::Held);
        }
        Species::ICE_MONSTER if sim.state.hero.sleep_turns < MAX_FREEZE => {
            let turns = sim.state.rng.rnd(2) + 2;
            sim.state.hero.increase_sleep_turns(turns);
            sim.msg("you are frozen by the ice monster");
            result.special_effect = Some(CombatEffect::Frozen);
        }
        _ => {}
    }
    Ok(result)
}
