//! Drain life
//!
//! Half the hero's hit points are shared out as damage among the monsters
//! in the same room. A hero in a passage reaches monsters standing in the
//! doorways of that passage; a hero in a doorway also reaches the passage
//! behind it.

use crate::combat::killed_by_hero;
use crate::consts::MAX_DRAINEES;
use crate::dungeon::{tile, LevelMap};
use crate::error::Result;
use crate::monster::{Destination, MonsterId};
use crate::state::Sim;

/// Monsters a drain from the hero's current spot would reach
pub fn drainees(sim: &Sim<'_>) -> Vec<MonsterId> {
    let hero = &sim.state.hero;
    let doorway = if sim.level.tile_at(hero.pos) == tile::DOOR {
        sim.level.passage_at(hero.pos)
    } else {
        None
    };
    let in_passage = hero.region.is_none_or(|r| sim.level.is_gone(r));

    sim.state
        .monsters
        .iter()
        .filter(|m| {
            (hero.region.is_some() && m.region == hero.region)
                || (doorway.is_some() && m.region == doorway)
                || (in_passage
                    && sim.level.tile_at(m.pos) == tile::DOOR
                    && sim.level.passage_at(m.pos) == hero.region)
        })
        .map(|m| m.id)
        .take(MAX_DRAINEES)
        .collect()
}

/// Halve the hero's hit points and spread the loss over nearby monsters
///
/// Returns the damage each monster took, or `None` if nobody was in reach.
pub fn drain(sim: &mut Sim<'_>) -> Result<Option<i32>> {
    let victims = drainees(sim);
    if victims.is_empty() {
        sim.msg("you have a tingling feeling");
        return Ok(None);
    }

    let per = sim.state.hero.drain_hp() / victims.len() as i32 + 1;
    tracing::debug!(count = victims.len(), per, "draining life");
    for id in victims {
        let seen = sim.can_see_monster(id);
        let m = sim.state.monsters.expect_mut(id)?;
        if m.decrease_hp(per) {
            m.start_run(Destination::Hero);
        } else {
            killed_by_hero(sim, id, seen)?;
        }
    }
    Ok(Some(per))
}
