//! Monster creation: species selection, new monsters and wanderers

use serde::{Deserialize, Serialize};

use super::lifecycle::{place_monster, remove_monster};
use super::{Destination, Monster, MonsterFlags, MonsterId, Species};
use crate::consts::{AMULETLEVEL, DISGUISES, HASTE_DEPTH, NUM_SPECIES};
use crate::dungeon::{step_ok, Coord, LevelMap, Region};
use crate::player::RingKind;
use crate::state::Sim;

/// Monsters in rough order of toughness
const LEVEL_ORDER: &str = "KEBSHIROZLCQANYFTWPXUMVGJD";
/// Same ranks, blanking species that never turn up as wanderers
const WANDER_ORDER: &str = "KEBSH ROZ CQA Y TWP UMVGJ ";

/// Tries at finding a room the hero is not in
const WANDER_ROOM_TRIES: usize = 50;

/// The two rank-ordered species tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesTable {
    level: [Option<Species>; NUM_SPECIES],
    wander: [Option<Species>; NUM_SPECIES],
}

fn parse_order(order: &str) -> [Option<Species>; NUM_SPECIES] {
    let mut slots = [None; NUM_SPECIES];
    for (slot, ch) in slots.iter_mut().zip(order.chars()) {
        *slot = Species::from_letter(ch);
    }
    slots
}

impl Default for SpeciesTable {
    fn default() -> Self {
        Self {
            level: parse_order(LEVEL_ORDER),
            wander: parse_order(WANDER_ORDER),
        }
    }
}

impl SpeciesTable {
    /// Pick a species to show up at `depth`; the deeper, the meaner
    ///
    /// Returns `None` only when every slot has been wiped out.
    pub fn pick(&self, depth: i32, wander: bool, rng: &mut crate::rng::GameRng) -> Option<Species> {
        let slots = if wander { &self.wander } else { &self.level };
        let mut rank = depth + rng.rnd(10) as i32 - 6;
        if rank < 0 {
            rank = rng.rnd(5) as i32;
        }
        if rank > 25 {
            rank = rng.rnd(5) as i32 + 21;
        }
        let rank = rank as usize;

        slots[..=rank]
            .iter()
            .rev()
            .chain(slots[rank + 1..].iter())
            .find_map(|s| *s)
    }

    /// Blank `species` in both tables; true if it was still present
    pub fn remove(&mut self, species: Species) -> bool {
        let mut found = false;
        for (level, wander) in self.level.iter_mut().zip(self.wander.iter_mut()) {
            if *level == Some(species) {
                *level = None;
                *wander = None;
                found = true;
            }
        }
        found
    }

    pub fn is_removed(&self, species: Species) -> bool {
        !self.level.contains(&Some(species))
    }
}

/// Experience bonus for a freshly rolled monster
fn exp_add(hp: i32, level: i32) -> u32 {
    let base = if level == 1 { hp / 8 } else { hp / 6 };
    let bonus = if level > 9 {
        base * 20
    } else if level > 6 {
        base * 4
    } else {
        base
    };
    bonus.max(0) as u32
}

/// Create a monster of `species` at `pos` and put it on the level
pub fn new_monster(sim: &mut Sim<'_>, species: Species, pos: Coord) -> MonsterId {
    let depth = sim.state.depth;
    let rng = &mut sim.state.rng;
    let t = species.template();
    let lev_add = (depth - AMULETLEVEL).max(0);

    let mut monster = Monster::new(species, pos);
    monster.level = t.level + lev_add;
    monster.hp = rng.roll(monster.level as u32, 8) as i32;
    monster.max_hp = monster.hp;
    monster.armor = t.armor - lev_add;
    monster.exp = t.exp + lev_add as u32 * 10 + exp_add(monster.hp, monster.level);
    monster.flags = t.flags | MonsterFlags::ASLEEP;
    if depth > HASTE_DEPTH {
        monster.flags.insert(MonsterFlags::HASTED);
    }
    if species == Species::XEROC {
        let choices = if depth > 25 { DISGUISES.len() } else { DISGUISES.len() - 1 };
        monster.disguise = DISGUISES[rng.rnd(choices as u32) as usize];
    }
    if sim.state.hero.is_wearing(RingKind::Aggravate) {
        monster.start_run(Destination::Hero);
    }

    let id = place_monster(sim, monster);
    tracing::debug!(?id, species = %species.letter(), x = pos.x, y = pos.y, "new monster");
    id
}

/// Spawn a random monster from the level table
pub fn random_monster(sim: &mut Sim<'_>, pos: Coord) -> Option<MonsterId> {
    let depth = sim.state.depth;
    let species = sim.state.species.pick(depth, false, &mut sim.state.rng)?;
    Some(new_monster(sim, species, pos))
}

/// A wandering monster appears in another room and heads for the hero
///
/// Returns `None` when no spot could be found; that is not an error.
pub fn wanderer_event(sim: &mut Sim<'_>) -> Option<MonsterId> {
    let rooms = sim.level.room_count();
    if rooms == 0 {
        return None;
    }
    let hero_region = sim.state.hero.region;

    let room = (0..WANDER_ROOM_TRIES).find_map(|_| {
        let region = Region::Room(sim.state.rng.rnd(rooms as u32) as usize);
        let room = sim.level.room(region)?;
        (Some(region) != hero_region && !room.is_gone()).then(|| room.clone())
    })?;

    let pos = room.random_position(&mut sim.state.rng);
    if !step_ok(sim.glyph_at(pos, true)) || sim.monster_at(pos).is_some() {
        tracing::debug!(x = pos.x, y = pos.y, "no room for a wanderer");
        return None;
    }

    let depth = sim.state.depth;
    let species = sim.state.species.pick(depth, true, &mut sim.state.rng)?;
    let id = new_monster(sim, species, pos);
    if let Some(m) = sim.state.monsters.get_mut(id) {
        m.start_run(Destination::Hero);
    }
    tracing::info!(?id, species = species.name(), "wandering monster");
    if sim.state.options.wizard {
        sim.msg(format!("Started a wandering {}", species.name()));
    }
    Some(id)
}

/// Wipe a species out: it never appears again and all current ones vanish
///
/// Returns how many monsters were removed from the level.
pub fn remove_species(sim: &mut Sim<'_>, species: Species) -> usize {
    sim.state.species.remove(species);
    let doomed: Vec<MonsterId> = sim
        .state
        .monsters
        .iter()
        .filter(|m| m.species == species)
        .map(|m| m.id)
        .collect();
    let removed = doomed
        .into_iter()
        .filter(|&id| remove_monster(sim, id).is_ok())
        .count();
    tracing::info!(species = species.name(), removed, "species wiped out");
    removed
}
