//! Zapping wands, staves and vorpal weapons
//!
//! Each stick kind has one effect routine. A routine reports whether it
//! went off; only then is a charge spent. One with nothing to act on costs
//! neither a charge nor the turn.

use super::bolt::{fire_bolt, BoltKind, MagicBolt};
use super::drain::drain;
use super::missile::do_motion;
use crate::combat::{fight, killed_by_hero, monster_save, projectile_hit, SaveClass, Strike};
use crate::config::StrikingChargePolicy;
use crate::display::Presentation;
use crate::dungeon::{step_ok, Coord, LevelMap, Region};
use crate::error::Result;
use crate::monster::{
    move_monster, new_monster, redraw_monster, remove_monster, Destination, MonsterFlags,
    MonsterId, Species,
};
use crate::object::{Item, StickKind};
use crate::state::Sim;

/// Attempts at finding a free cell for a teleported monster
const TELEPORT_TRIES: usize = 100;

/// Result of zapping something
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZapResult {
    /// Whether the zap used up the hero's turn
    pub took_turn: bool,
    /// Whether a charge was spent
    pub consumed: bool,
}

impl ZapResult {
    /// Nothing was zapped; the hero may act again
    pub const NO_TURN: Self = Self {
        took_turn: false,
        consumed: false,
    };

    pub const fn turn(consumed: bool) -> Self {
        Self {
            took_turn: true,
            consumed,
        }
    }
}

/// What an effect routine did with the zap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Went off; costs a charge
    Fired,
    /// Went off, but the charge was already paid for
    Prepaid,
    /// Nothing to act on, or the hero could not use it
    Fizzled,
}

impl Outcome {
    fn settle(self, item: &mut Item) -> ZapResult {
        match self {
            Outcome::Fired => {
                item.use_charge();
                ZapResult::turn(true)
            }
            Outcome::Prepaid => ZapResult::turn(false),
            Outcome::Fizzled => ZapResult::NO_TURN,
        }
    }
}

/// The monster a zap in direction `dir` is aimed at
///
/// With `check_distant` the aim travels over anything a monster could
/// stand on until it meets something else; otherwise only the adjacent
/// cell counts.
pub fn get_monster_in_direction(
    sim: &Sim<'_>,
    dir: Coord,
    check_distant: bool,
) -> Option<MonsterId> {
    let mimics = sim.state.options.throws_affect_mimics;
    let mut pos = sim.state.hero.pos + dir;
    if check_distant && dir != Coord::default() {
        while step_ok(sim.glyph_at(pos, mimics)) {
            pos += dir;
        }
    }
    sim.state.monsters.at(pos, true)
}

/// Zap `item` in direction `dir`
pub fn do_zap(sim: &mut Sim<'_>, dir: Coord, item: &mut Item) -> Result<ZapResult> {
    let dir = Coord::new(dir.x.signum(), dir.y.signum());
    if dir == Coord::default() {
        tracing::debug!("zap without a direction");
        return Ok(ZapResult::NO_TURN);
    }

    if let Some(kind) = item.stick_kind() {
        if item.charges == 0 {
            sim.msg("nothing happens");
            return Ok(ZapResult::turn(false));
        }
        tracing::debug!(stick = %kind, charges = item.charges, dx = dir.x, dy = dir.y, "zap");
        let outcome = zap_stick(sim, kind, dir, item)?;
        tracing::trace!(?outcome, "zap settled");
        return Ok(outcome.settle(item));
    }

    if item.is_vorpalized() && item.charges > 0 {
        let outcome = zap_vorpalized_weapon(sim, dir, item)?;
        return Ok(outcome.settle(item));
    }

    sim.msg("you can't zap with that!");
    Ok(ZapResult::NO_TURN)
}

fn zap_stick(sim: &mut Sim<'_>, kind: StickKind, dir: Coord, stick: &mut Item) -> Result<Outcome> {
    match kind {
        StickKind::Light => Ok(zap_light(sim)),
        StickKind::Striking => zap_striking(sim, dir, stick),
        StickKind::Lightning => zap_bolt(sim, dir, kind, BoltKind::Lightning),
        StickKind::Fire => zap_bolt(sim, dir, kind, BoltKind::Flame),
        StickKind::Cold => zap_bolt(sim, dir, kind, BoltKind::Ice),
        StickKind::Polymorph => zap_polymorph(sim, dir),
        StickKind::MagicMissile => zap_magic_missile(sim, dir),
        StickKind::HasteMonster => zap_haste_monster(sim, dir),
        StickKind::SlowMonster => zap_slow_monster(sim, dir),
        StickKind::DrainLife => zap_drain_life(sim),
        StickKind::Nothing => {
            tracing::debug!("what a bizarre schtick!");
            Ok(Outcome::Fired)
        }
        StickKind::TeleportAway => zap_teleport_away(sim, dir),
        StickKind::TeleportTo => zap_teleport_to(sim, dir),
        StickKind::Cancellation => zap_cancellation(sim, dir),
    }
}

fn zap_light(sim: &mut Sim<'_>) -> Outcome {
    let region = sim.state.hero.region;
    let gone = region.is_none_or(|r| sim.level.is_gone(r));
    if sim.state.hero.is_blind() {
        sim.msg("you feel a warm glow around you");
    } else {
        sim.state.sticks.discover(StickKind::Light);
        if gone {
            sim.msg("the corridor glows and then fades");
        } else {
            sim.msg("the room is lit by a shimmering blue light");
        }
    }

    if let Some(region) = region.filter(|_| !gone) {
        if let Some(room) = sim.level.room_mut(region) {
            room.set_dark(false);
        }
        light_room(sim, region);
    }
    Outcome::Fired
}

/// Draw the whole room and whatever the hero can see in it
fn light_room(sim: &mut Sim<'_>, region: Region) {
    let Some(room) = sim.level.room(region) else {
        return;
    };
    let (origin, size) = (room.origin, room.size);
    for y in origin.y..origin.y + size.y {
        for x in origin.x..origin.x + size.x {
            let pos = Coord::new(x, y);
            if pos == sim.state.hero.pos {
                continue;
            }
            let ch = match sim.monster_at(pos) {
                Some(id) if sim.can_see_monster(id) => sim.glyph_at(pos, false),
                _ => sim.level.tile_at(pos),
            };
            sim.display.draw_char(pos, ch);
        }
    }
}

fn zap_striking(sim: &mut Sim<'_>, dir: Coord, stick: &mut Item) -> Result<Outcome> {
    let Some(id) = get_monster_in_direction(sim, dir, false) else {
        return Ok(Outcome::Fizzled);
    };
    let Some(pos) = sim.state.monsters.get(id).map(|m| m.pos) else {
        return Ok(Outcome::Fizzled);
    };
    stick.set_striking_damage(&mut sim.state.rng);
    fight(sim, pos, Strike::Melee(Some(stick)))?;
    // the melee engine already took a charge
    Ok(match sim.state.options.striking_charge {
        StrikingChargePolicy::DoubleDrain => Outcome::Fired,
        StrikingChargePolicy::SingleDrain => Outcome::Prepaid,
    })
}

fn zap_bolt(sim: &mut Sim<'_>, dir: Coord, stick: StickKind, kind: BoltKind) -> Result<Outcome> {
    let start = sim.state.hero.pos;
    fire_bolt(sim, start, dir, MagicBolt::new(kind, true))?;
    sim.state.sticks.discover(stick);
    Ok(Outcome::Fired)
}

fn zap_polymorph(sim: &mut Sim<'_>, dir: Coord) -> Result<Outcome> {
    let Some(id) = get_monster_in_direction(sim, dir, true) else {
        return Ok(Outcome::Fizzled);
    };
    let was_seen = sim.can_see_monster(id);
    let old = remove_monster(sim, id)?;

    let species = Species::from_index(sim.state.rng.rnd(26) as usize);
    let new_id = new_monster(sim, species, old.pos);
    let m = sim.state.monsters.expect_mut(new_id)?;
    m.tile_beneath = old.tile_beneath;
    m.pack = old.pack;
    m.start_run(Destination::Hero);
    if was_seen && species != old.species {
        sim.state.sticks.discover(StickKind::Polymorph);
    }
    tracing::debug!(from = %old.species.letter(), to = %species.letter(), "polymorphed");
    Ok(Outcome::Fired)
}

fn zap_magic_missile(sim: &mut Sim<'_>, dir: Coord) -> Result<Outcome> {
    sim.state.sticks.discover(StickKind::MagicMissile);
    let mut missile = Item::magic_missile();
    do_motion(sim, &mut missile, dir);

    let pos = missile.pos;
    let struck = match sim.monster_at(pos).and_then(|id| sim.state.monsters.get(id)) {
        Some(m) => !monster_save(&mut sim.state.rng, SaveClass::Magic, m),
        None => false,
    };
    if struck {
        projectile_hit(sim, pos, &missile, "missile")?;
    } else {
        sim.msg("the missile vanishes with a puff of smoke");
    }
    Ok(Outcome::Fired)
}

fn zap_haste_monster(sim: &mut Sim<'_>, dir: Coord) -> Result<Outcome> {
    let Some(id) = get_monster_in_direction(sim, dir, true) else {
        return Ok(Outcome::Fizzled);
    };
    let m = sim.state.monsters.expect_mut(id)?;
    if m.has(MonsterFlags::SLOWED) {
        m.flags.remove(MonsterFlags::SLOWED);
    } else {
        m.flags.insert(MonsterFlags::HASTED);
    }
    m.start_run(Destination::Hero);
    Ok(Outcome::Fired)
}

fn zap_slow_monster(sim: &mut Sim<'_>, dir: Coord) -> Result<Outcome> {
    let Some(id) = get_monster_in_direction(sim, dir, true) else {
        return Ok(Outcome::Fizzled);
    };
    let m = sim.state.monsters.expect_mut(id)?;
    if m.has(MonsterFlags::HASTED) {
        m.flags.remove(MonsterFlags::HASTED);
    } else {
        m.flags.insert(MonsterFlags::SLOWED);
    }
    m.turn = true;
    m.start_run(Destination::Hero);
    Ok(Outcome::Fired)
}

fn zap_drain_life(sim: &mut Sim<'_>) -> Result<Outcome> {
    if sim.state.hero.hp < 2 {
        sim.msg("you are too weak to use it");
        return Ok(Outcome::Fizzled);
    }
    drain(sim)?;
    Ok(Outcome::Fired)
}

/// A random free cell in some room that still exists
fn find_empty_location(sim: &mut Sim<'_>) -> Option<Coord> {
    let rooms = sim.level.room_count();
    if rooms == 0 {
        return None;
    }
    (0..TELEPORT_TRIES).find_map(|_| {
        let region = Region::Room(sim.state.rng.rnd(rooms as u32) as usize);
        let room = sim.level.room(region).filter(|r| !r.is_gone())?;
        let pos = room.random_position(&mut sim.state.rng);
        let free = pos != sim.state.hero.pos
            && step_ok(sim.glyph_at(pos, true))
            && sim.monster_at(pos).is_none();
        free.then_some(pos)
    })
}

fn zap_teleport_away(sim: &mut Sim<'_>, dir: Coord) -> Result<Outcome> {
    let Some(id) = get_monster_in_direction(sim, dir, true) else {
        return Ok(Outcome::Fizzled);
    };
    match find_empty_location(sim) {
        Some(to) => move_monster(sim, id, to)?,
        None => tracing::debug!(?id, "nowhere to teleport to"),
    }
    if sim.state.hero.is_held_by(id) {
        sim.state.hero.clear_hold();
    }
    sim.state.monsters.expect_mut(id)?.start_run(Destination::Hero);
    Ok(Outcome::Fired)
}

fn zap_teleport_to(sim: &mut Sim<'_>, dir: Coord) -> Result<Outcome> {
    let Some(target) = get_monster_in_direction(sim, dir, true) else {
        return Ok(Outcome::Fizzled);
    };
    let to = sim.state.hero.pos + dir;
    // whatever already stands next to the hero, disguised or not, takes the zap
    let id = sim.state.monsters.at(to, true).unwrap_or(target);
    if sim.state.monsters.get(id).is_some_and(|m| m.pos != to) {
        move_monster(sim, id, to)?;
    } else if id != target {
        tracing::debug!(?id, ?target, "teleport blocked next to the hero");
    }
    sim.state.monsters.expect_mut(id)?.start_run(Destination::Hero);
    Ok(Outcome::Fired)
}

fn zap_cancellation(sim: &mut Sim<'_>, dir: Coord) -> Result<Outcome> {
    let Some(id) = get_monster_in_direction(sim, dir, true) else {
        return Ok(Outcome::Fizzled);
    };
    if sim.state.hero.is_held_by(id) {
        sim.state.hero.clear_hold();
    }
    let m = sim.state.monsters.expect_mut(id)?;
    m.flags.insert(MonsterFlags::CANCELLED);
    m.flags.remove(MonsterFlags::INVISIBLE | MonsterFlags::CAN_CONFUSE);
    m.reveal_disguise();
    m.start_run(Destination::Hero);
    redraw_monster(sim, id);
    Ok(Outcome::Fired)
}

/// A vorpal weapon zapped at its enemy slays it; anything else just laughs
fn zap_vorpalized_weapon(sim: &mut Sim<'_>, dir: Coord, weapon: &Item) -> Result<Outcome> {
    let Some(id) = get_monster_in_direction(sim, dir, true) else {
        return Ok(Outcome::Fizzled);
    };
    let m = sim.state.monsters.expect_mut(id)?;
    if weapon.is_vorpalized_against(m.species) {
        let name = m.name();
        sim.msg(format!("the {name} vanishes in a puff of smoke"));
        killed_by_hero(sim, id, false)?;
    } else {
        m.start_run(Destination::Hero);
        sim.msg("you hear a maniacal chuckle in the distance.");
    }
    Ok(Outcome::Fired)
}
