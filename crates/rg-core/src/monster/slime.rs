//! Slime division
//!
//! A wounded slime splits into two. The new slime appears next to the one
//! that was hit, or, if that one is boxed in, next to any slime of the same
//! blob reachable through its neighbors.

use hashbrown::HashSet;

use super::makemon::new_monster;
use super::{Destination, MonsterId};
use crate::dungeon::{step_ok, tile, Coord, LevelMap};
use crate::error::{CoreError, Result};
use crate::state::Sim;

/// Split the slime `id`, returning the newcomer if there was room for it
pub fn slime_split(sim: &mut Sim<'_>, id: MonsterId) -> Result<Option<MonsterId>> {
    let m = sim
        .state
        .monsters
        .get(id)
        .ok_or(CoreError::UnknownMonster(id))?;
    let (species, name) = (m.species, m.name());

    let mut visited = HashSet::new();
    let Some(spot) = new_slime(sim, id, &mut visited) else {
        tracing::debug!(?id, searched = visited.len(), "slime has no room to divide");
        return Ok(None);
    };

    sim.msg(format!("The {name} divides.  Ick!"));
    let child = new_monster(sim, species, spot);
    sim.state.monsters.expect_mut(child)?.start_run(Destination::Hero);
    tracing::debug!(?id, ?child, x = spot.x, y = spot.y, "slime divided");
    Ok(Some(child))
}

/// Find a free cell next to `id` or, failing that, next to a same-species
/// neighbor not yet searched
fn new_slime(sim: &mut Sim<'_>, id: MonsterId, visited: &mut HashSet<MonsterId>) -> Option<Coord> {
    visited.insert(id);
    let m = sim.state.monsters.get(id)?;
    let (pos, species) = (m.pos, m.species);

    if let Some(spot) = plop_monster(sim, pos) {
        return Some(spot);
    }

    for near in pos.neighborhood() {
        let Some(other) = sim.state.monsters.at(near, true) else {
            continue;
        };
        let same = sim
            .state
            .monsters
            .get(other)
            .is_some_and(|o| o.species == species);
        if same && !visited.contains(&other) {
            if let Some(spot) = new_slime(sim, other, visited) {
                return Some(spot);
            }
        }
    }
    None
}

/// Pick a random open cell around `center`
///
/// Every candidate is equally likely whatever the scan order.
pub fn plop_monster(sim: &mut Sim<'_>, center: Coord) -> Option<Coord> {
    let mut appear = 0;
    let mut spot = None;
    for pos in center.neighborhood() {
        if pos == sim.state.hero.pos || !sim.level.in_bounds(pos) {
            continue;
        }
        if sim.monster_at(pos).is_some() {
            continue;
        }
        let ch = sim.glyph_at(pos, true);
        if !step_ok(ch) {
            continue;
        }
        if ch == tile::SCROLL && sim.level.is_scare_monster(pos) {
            continue;
        }
        appear += 1;
        if sim.state.rng.rnd(appear) == 0 {
            spot = Some(pos);
        }
    }
    spot
}
