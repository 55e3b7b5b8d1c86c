//! Bolts of lightning, flame and frost
//!
//! A bolt flies a fixed number of cells from where it was fired, bouncing
//! off walls and doors. Every bounce swaps who it is looking for: a bolt
//! on its way out hunts monsters, one coming back hunts the hero. Passing
//! through a target (hit or not) also swaps, and the `changed` latch keeps
//! a bounce right after such a pass from swapping a second time.

use crate::combat::{hero_save, monster_save, projectile_hit, SaveClass};
use crate::consts::{BOLT_LENGTH, MAX_FREEZE};
use crate::display::{Color, Presentation};
use crate::dungeon::{tile, Coord};
use crate::error::{CoreError, Result};
use crate::monster::{Destination, MonsterId};
use crate::object::Item;
use crate::player::DeathCause;
use crate::state::Sim;

/// Bounces allowed before a bolt wedged between two reflectors fizzles
const MAX_BOUNCES: usize = 2 * BOLT_LENGTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoltKind {
    Lightning,
    Flame,
    /// Zapped from a wand of cold
    Ice,
    /// Breathed by an ice monster: never saved against, freezes the hero
    Frost,
}

impl BoltKind {
    pub const fn name(self) -> &'static str {
        match self {
            BoltKind::Lightning => "bolt",
            BoltKind::Flame => "flame",
            BoltKind::Ice => "ice",
            BoltKind::Frost => "frost",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            BoltKind::Frost | BoltKind::Ice => Color::Blue,
            BoltKind::Lightning => Color::Yellow,
            BoltKind::Flame => Color::Red,
        }
    }

    pub const fn is_frost(self) -> bool {
        matches!(self, BoltKind::Frost)
    }
}

/// One bolt in flight
#[derive(Debug, Clone)]
pub struct MagicBolt {
    pub kind: BoltKind,
    /// Zapped by the hero rather than breathed by a monster
    pub from_player: bool,
    /// Where the bolt is now
    pub pos: Coord,
    /// Damage and hit bonus used when the bolt strikes a monster
    pub item: Item,
}

impl MagicBolt {
    pub fn new(kind: BoltKind, from_player: bool) -> Self {
        Self {
            kind,
            from_player,
            pos: Coord::default(),
            item: Item::bolt(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Glyph drawn along the bolt's path for a given direction
pub fn bolt_glyph(dir: Coord) -> char {
    match dir.x + dir.y {
        0 => '/',
        1 | -1 if dir.y == 0 => '-',
        1 | -1 => '|',
        _ => '\\',
    }
}

/// What happened when the bolt reached a monster
enum Impact {
    Missed,
    /// The bolt stopped here, wounding `victim` if it did any harm
    Stopped { victim: Option<MonsterId> },
}

/// Fire a bolt from `start` in direction `dir`
///
/// Returns the monster it hit, if any. The start cell itself is never hit.
pub fn fire_bolt(
    sim: &mut Sim<'_>,
    start: Coord,
    dir: Coord,
    mut bolt: MagicBolt,
) -> Result<Option<MonsterId>> {
    let dirch = bolt_glyph(dir);
    let mimics = sim.state.options.throws_affect_mimics;
    let mut dir = dir;
    let mut hero_is_target = !bolt.from_player;
    let mut changed = false;
    let mut victim = None;
    let mut hit = false;
    let mut bounces = 0;
    // screen contents to put back once the bolt is gone, one per step
    let mut spots: Vec<(Coord, Option<char>)> = Vec::with_capacity(BOLT_LENGTH);
    bolt.pos = start;

    let mut i = 0;
    while i < BOLT_LENGTH && !hit {
        bolt.pos += dir;
        let ch = sim.glyph_at(bolt.pos, mimics);
        let shown = sim.display.char_at(bolt.pos);
        let spot = (bolt.pos, (shown != dirch).then_some(shown));
        if i < spots.len() {
            spots[i] = spot;
        } else {
            spots.push(spot);
        }

        if tile::reflects_bolt(ch) {
            if !changed {
                hero_is_target = !hero_is_target;
            }
            changed = false;
            dir = -dir;
            bounces += 1;
            tracing::debug!(kind = ?bolt.kind, x = bolt.pos.x, y = bolt.pos.y, bounces, "bolt bounced");
            sim.msg(format!("the {} bounces", bolt.name()));
            if bounces > MAX_BOUNCES {
                tracing::debug!(kind = ?bolt.kind, "bolt trapped between reflectors");
                break;
            }
            continue;
        }

        if !hero_is_target {
            if let Some(id) = sim.state.monsters.at(bolt.pos, mimics) {
                hero_is_target = true;
                changed = !changed;
                if let Impact::Stopped { victim: v } = bolt_vs_monster(sim, &bolt, id)? {
                    hit = true;
                    victim = v;
                    let now = sim.display.char_at(bolt.pos);
                    if now != dirch {
                        spots[i].1 = Some(now);
                    }
                }
            }
        } else if bolt.pos == sim.state.hero.pos {
            hero_is_target = false;
            changed = !changed;
            if bolt_vs_hero(sim, &bolt, start) {
                hit = true;
            }
        }

        sim.display.set_color(bolt.kind.color());
        sim.display.standout();
        sim.display.pause();
        sim.display.draw_char(bolt.pos, dirch);
        sim.display.standend();
        i += 1;
    }

    for &(pos, under) in spots.iter().take(i) {
        sim.display.pause();
        if let Some(under) = under {
            sim.display.draw_char(pos, under);
        }
    }
    tracing::debug!(kind = ?bolt.kind, steps = i, ?victim, "bolt finished");
    Ok(victim)
}

/// The bolt reached the hero; returns true if it stopped there
fn bolt_vs_hero(sim: &mut Sim<'_>, bolt: &MagicBolt, start: Coord) -> bool {
    let name = bolt.name();
    if hero_save(sim, SaveClass::Magic) {
        sim.msg(format!("the {name} whizzes by you"));
        return false;
    }

    if bolt.kind.is_frost() {
        sim.msg("You are frozen by a blast of frost.");
        if sim.state.hero.sleep_turns < MAX_FREEZE {
            let turns = sim.state.rng.spread(7);
            sim.state.hero.increase_sleep_turns(turns);
        }
        return true;
    }

    let damage = sim.state.rng.roll(6, 6) as i32;
    if !sim.state.hero.decrease_hp(damage) {
        let cause = if bolt.from_player {
            DeathCause::Bolt
        } else {
            sim.state
                .monsters
                .at(start, true)
                .and_then(|id| sim.state.monsters.get(id))
                .map_or(DeathCause::Bolt, |m| DeathCause::Monster(m.species))
        };
        sim.state.kill_hero(cause);
    }
    sim.msg(format!("you are hit by the {name}"));
    true
}

fn bolt_vs_monster(sim: &mut Sim<'_>, bolt: &MagicBolt, id: MonsterId) -> Result<Impact> {
    let m = sim
        .state
        .monsters
        .get(id)
        .ok_or(CoreError::UnknownMonster(id))?;
    let (pos, species, name, disguised) = (m.pos, m.species, m.name(), m.is_disguised());
    let saved = monster_save(&mut sim.state.rng, SaveClass::Magic, m);

    if !saved || bolt.kind.is_frost() {
        if bolt.kind == BoltKind::Flame && species.is_fire_immune() {
            sim.msg(format!("the flame bounces off the {name}"));
            return Ok(Impact::Stopped { victim: None });
        }
        let victim = projectile_hit(sim, pos, &bolt.item, bolt.name())?;
        tracing::debug!(?id, ?victim, "bolt struck monster");
        return Ok(Impact::Stopped { victim });
    }

    if !disguised {
        if bolt.from_player {
            sim.state.monsters.expect_mut(id)?.start_run(Destination::Hero);
        }
        sim.msg(format!("the {} whizzes past the {name}", bolt.name()));
    }
    Ok(Impact::Missed)
}
