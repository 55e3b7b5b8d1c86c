//! Monster AI
//!
//! Waking monsters when the hero comes near, and moving the ones that are
//! running toward the hero or a pile of gold.

use super::lifecycle::move_monster;
use super::{Destination, MonsterFlags, MonsterId, Species};
use crate::combat::{hero_save, monster_attack_hero, SaveClass};
use crate::consts::{BOLT_LENGTH, HUHDURATION, LAMPDIST};
use crate::dungeon::{step_ok, tile, Coord, LevelMap};
use crate::error::{CoreError, Result};
use crate::magic::{fire_bolt, MagicBolt};
use crate::player::RingKind;
use crate::state::Sim;

/// What a monster did with one of its moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    /// Stayed put
    Waited,
    /// Stepped to a new cell
    Moved(Coord),
    /// Swung at the hero
    AttackedHero,
    /// Breathed a bolt at the hero
    Breathed,
}

/// The hero has come next to (or interacted with) the monster at `pos`
///
/// Mean monsters may start chasing, a medusa's gaze may confuse, and greedy
/// monsters go guard the gold in the hero's room.
pub fn wake_monster(sim: &mut Sim<'_>, pos: Coord) -> Result<MonsterId> {
    let id = sim
        .state
        .monsters
        .at(pos, true)
        .ok_or(CoreError::MonsterNotFound(pos))?;

    let stealthy = sim.state.hero.is_wearing(RingKind::Stealth);
    let aggro = sim.state.rng.rnd(3) != 0;
    let m = sim.state.monsters.expect_mut(id)?;
    if aggro && m.has(MonsterFlags::MEAN) && !m.has(MonsterFlags::HELD) && !stealthy {
        m.start_run(Destination::Hero);
    }
    let (species, flags) = (m.species, m.flags);

    if species == Species::MEDUSA
        && !flags.contains(MonsterFlags::CANCELLED)
        && !sim.state.hero.is_blind()
    {
        let lit = sim
            .state
            .hero
            .region
            .and_then(|r| sim.level.room(r))
            .is_some_and(|room| !room.is_dark());
        if lit || pos.distance(sim.state.hero.pos) < LAMPDIST {
            if !flags.contains(MonsterFlags::FOUND) && !hero_save(sim, SaveClass::Magic) {
                sim.msg("The medusa's gaze has confused you.");
                let turns = sim.state.rng.rnd(20) + HUHDURATION;
                sim.state.hero.confuse(turns);
            }
            sim.state.monsters.expect_mut(id)?.flags.insert(MonsterFlags::FOUND);
        }
    }

    let running = sim.state.monsters.expect_mut(id)?.has(MonsterFlags::RUNNING);
    if flags.contains(MonsterFlags::GREEDY) && !running {
        let gold = sim
            .state
            .hero
            .region
            .and_then(|r| sim.level.room(r))
            .and_then(|room| room.gold);
        if let Some(gold) = gold {
            sim.state.monsters.expect_mut(id)?.start_run(Destination::Gold(gold));
        }
    }

    Ok(id)
}

/// Wake every monster standing next to the hero
pub fn wake_nearby(sim: &mut Sim<'_>) -> Result<()> {
    let hero = sim.state.hero.pos;
    let near: Vec<Coord> = sim
        .state
        .monsters
        .iter()
        .filter(|m| m.pos.is_adjacent(hero))
        .map(|m| m.pos)
        .collect();
    for pos in near {
        wake_monster(sim, pos)?;
    }
    Ok(())
}

/// Can a monster step from `from` to `to`?
fn can_step(sim: &Sim<'_>, from: Coord, to: Coord) -> bool {
    if to == from || to == sim.state.hero.pos || !sim.level.in_bounds(to) {
        return false;
    }
    if !step_ok(sim.glyph_at(to, true)) || sim.monster_at(to).is_some() {
        return false;
    }
    if sim.level.is_scare_monster(to) {
        return false;
    }
    if from.x != to.x && from.y != to.y {
        // no cutting corners, and doors are entered straight on
        if sim.level.tile_at(from) == tile::DOOR || sim.level.tile_at(to) == tile::DOOR {
            return false;
        }
        return step_ok(sim.level.tile_at(Coord::new(from.x, to.y)))
            && step_ok(sim.level.tile_at(Coord::new(to.x, from.y)));
    }
    true
}

/// The open neighbor that gets closest to `goal`, if any beats standing still
fn best_step(sim: &Sim<'_>, from: Coord, goal: Coord) -> Option<Coord> {
    let mut best = from.distance(goal);
    let mut choice = None;
    for to in from.neighborhood() {
        if can_step(sim, from, to) && to.distance(goal) < best {
            best = to.distance(goal);
            choice = Some(to);
        }
    }
    choice
}

/// A random open neighbor
fn stumble(sim: &mut Sim<'_>, from: Coord) -> Option<Coord> {
    let open: Vec<Coord> = from.neighborhood().filter(|&to| can_step(sim, from, to)).collect();
    sim.state.rng.choose(&open).copied()
}

/// Take one move for a running monster
pub fn chase_step(sim: &mut Sim<'_>, id: MonsterId) -> Result<AiAction> {
    let m = sim
        .state
        .monsters
        .get(id)
        .ok_or(CoreError::UnknownMonster(id))?;
    let (pos, dest, species, flags) = (m.pos, m.dest, m.species, m.flags);
    if flags.contains(MonsterFlags::HELD) {
        return Ok(AiAction::Waited);
    }

    let hero = sim.state.hero.pos;
    let goal = match dest {
        Destination::Hero => hero,
        Destination::Gold(gold) => {
            if sim.level.tile_at(gold) != tile::GOLD {
                // somebody took it
                sim.state.monsters.expect_mut(id)?.dest = Destination::Hero;
                hero
            } else if pos == gold {
                return Ok(AiAction::Waited);
            } else {
                gold
            }
        }
    };
    let chasing_hero = goal == hero;

    if chasing_hero && pos.is_adjacent(hero) {
        monster_attack_hero(sim, id)?;
        return Ok(AiAction::AttackedHero);
    }

    if let Some(kind) = species.breath() {
        if chasing_hero
            && !flags.contains(MonsterFlags::CANCELLED)
            && pos.in_line_with(hero)
            && pos.distance(hero) < (BOLT_LENGTH * BOLT_LENGTH) as i32
            && sim.state.rng.one_in(sim.state.options.dragon_shot)
        {
            tracing::debug!(?id, bolt = kind.name(), "monster breathes");
            fire_bolt(sim, pos, pos.direction_to(hero), MagicBolt::new(kind, false))?;
            return Ok(AiAction::Breathed);
        }
    }

    let next = if flags.contains(MonsterFlags::CONFUSED) && sim.state.rng.rnd(5) != 0 {
        stumble(sim, pos)
    } else {
        best_step(sim, pos, goal)
    };
    if flags.contains(MonsterFlags::CONFUSED) && sim.state.rng.one_in(20) {
        sim.state.monsters.expect_mut(id)?.flags.remove(MonsterFlags::CONFUSED);
    }

    match next {
        Some(to) => {
            move_monster(sim, id, to)?;
            tracing::trace!(?id, x = to.x, y = to.y, "chase step");
            Ok(AiAction::Moved(to))
        }
        None => Ok(AiAction::Waited),
    }
}

/// Move every running monster once; hasted ones twice, slowed ones every
/// other turn
pub fn run_monsters(sim: &mut Sim<'_>) -> Result<()> {
    for id in sim.state.monsters.ids() {
        if sim.state.is_hero_dead() {
            break;
        }
        let Some(m) = sim.state.monsters.get(id) else {
            continue;
        };
        if !m.has(MonsterFlags::RUNNING) {
            continue;
        }
        let (slowed, hasted, turn) = (
            m.has(MonsterFlags::SLOWED),
            m.has(MonsterFlags::HASTED),
            m.turn,
        );

        if !slowed || turn {
            chase_step(sim, id)?;
        }
        if hasted && !sim.state.is_hero_dead() && sim.state.monsters.get(id).is_some() {
            chase_step(sim, id)?;
        }
        if let Some(m) = sim.state.monsters.get_mut(id) {
            m.turn = !m.turn;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Presentation;
    use crate::monster::{new_monster, Monster};
    use crate::player::{HeroFlags, Ring};
    use crate::test_support::Fixture;

    fn runner(sim: &mut Sim<'_>, letter: char, pos: Coord) -> MonsterId {
        let id = new_monster(sim, Species::parse(letter).unwrap(), pos);
        sim.state.monsters.get_mut(id).unwrap().start_run(Destination::Hero);
        id
    }

    #[test]
    fn test_wake_missing_monster_is_an_error() {
        let mut fx = Fixture::lit_room();
        let mut sim = fx.sim();
        let pos = Coord::new(3, 3);
        assert_eq!(wake_monster(&mut sim, pos), Err(CoreError::MonsterNotFound(pos)));
    }

    #[test]
    fn test_mean_monster_starts_chasing() {
        let mut fx = Fixture::lit_room();
        let mut sim = fx.sim();
        let pos = Coord::new(9, 8);
        let id = new_monster(&mut sim, Species::parse('Z').unwrap(), pos);
        for _ in 0..30 {
            wake_monster(&mut sim, pos).unwrap();
        }
        let m = sim.state.monsters.get(id).unwrap();
        assert!(m.has(MonsterFlags::RUNNING));
        assert_eq!(m.dest, Destination::Hero);
    }

    #[test]
    fn test_stealth_keeps_monsters_asleep() {
        let mut fx = Fixture::lit_room();
        fx.state.hero.rings[1] = Some(Ring::new(RingKind::Stealth, 0));
        let mut sim = fx.sim();
        let pos = Coord::new(9, 8);
        let id = new_monster(&mut sim, Species::parse('Z').unwrap(), pos);
        for _ in 0..30 {
            wake_monster(&mut sim, pos).unwrap();
        }
        assert!(!sim.state.monsters.get(id).unwrap().has(MonsterFlags::RUNNING));
    }

    #[test]
    fn test_medusa_gaze_fires_once() {
        let mut fx = Fixture::lit_room();
        let mut sim = fx.sim();
        let pos = Coord::new(12, 8);
        let id = new_monster(&mut sim, Species::MEDUSA, pos);
        wake_monster(&mut sim, pos).unwrap();
        assert!(sim.state.monsters.get(id).unwrap().has(MonsterFlags::FOUND));

        let confused = sim.state.hero.confused_turns;
        for _ in 0..20 {
            wake_monster(&mut sim, pos).unwrap();
        }
        assert_eq!(sim.state.hero.confused_turns, confused);
    }

    #[test]
    fn test_blind_hero_ignores_gaze() {
        let mut fx = Fixture::lit_room();
        fx.state.hero.flags.insert(HeroFlags::BLIND);
        let mut sim = fx.sim();
        let pos = Coord::new(12, 8);
        let id = new_monster(&mut sim, Species::MEDUSA, pos);
        wake_monster(&mut sim, pos).unwrap();
        assert!(!sim.state.monsters.get(id).unwrap().has(MonsterFlags::FOUND));
        assert!(!sim.state.hero.is_confused());
    }

    #[test]
    fn test_greedy_monster_guards_gold() {
        let mut fx = Fixture::lit_room();
        fx.grid.place_gold(Coord::new(15, 4));
        let mut sim = fx.sim();
        let pos = Coord::new(9, 8);
        let id = new_monster(&mut sim, Species::parse('O').unwrap(), pos);
        wake_monster(&mut sim, pos).unwrap();
        let m = sim.state.monsters.get(id).unwrap();
        assert_eq!(m.dest, Destination::Gold(Coord::new(15, 4)));
        assert!(m.has(MonsterFlags::RUNNING));
    }

    #[test]
    fn test_chase_closes_distance() {
        let mut fx = Fixture::lit_room();
        let mut sim = fx.sim();
        let hero = sim.state.hero.pos;
        let id = runner(&mut sim, 'Z', Coord::new(3, 3));
        let before = Coord::new(3, 3).distance(hero);
        let action = chase_step(&mut sim, id).unwrap();
        let Some(m) = sim.state.monsters.get(id) else {
            panic!("monster vanished");
        };
        assert_eq!(action, AiAction::Moved(m.pos));
        assert!(m.pos.distance(hero) < before);
        assert_eq!(sim.display.char_at(Coord::new(3, 3)), tile::FLOOR);
    }

    #[test]
    fn test_adjacent_runner_attacks() {
        let mut fx = Fixture::lit_room();
        let mut sim = fx.sim();
        let hero = sim.state.hero.pos;
        let id = runner(&mut sim, 'Z', hero + Coord::new(1, 0));
        assert_eq!(chase_step(&mut sim, id).unwrap(), AiAction::AttackedHero);
        assert!(fx.display.saw("zombie"));
    }

    #[test]
    fn test_held_monster_stays_put() {
        let mut fx = Fixture::lit_room();
        let mut sim = fx.sim();
        let id = runner(&mut sim, 'Z', Coord::new(3, 3));
        sim.state.monsters.get_mut(id).unwrap().flags.insert(MonsterFlags::HELD);
        run_monsters(&mut sim).unwrap();
        assert_eq!(sim.state.monsters.get(id).unwrap().pos, Coord::new(3, 3));
    }

    #[test]
    fn test_speed_flags() {
        let mut fx = Fixture::lit_room();
        let mut sim = fx.sim();
        let fast = runner(&mut sim, 'Z', Coord::new(3, 3));
        sim.state.monsters.get_mut(fast).unwrap().flags.insert(MonsterFlags::HASTED);
        let slow = runner(&mut sim, 'Z', Coord::new(3, 10));
        sim.state.monsters.get_mut(slow).unwrap().flags.insert(MonsterFlags::SLOWED);

        run_monsters(&mut sim).unwrap();
        let f = sim.state.monsters.get(fast).unwrap().pos;
        assert_eq!((f.x - 3).abs().max((f.y - 3).abs()), 2);
        let s1 = sim.state.monsters.get(slow).unwrap().pos;
        run_monsters(&mut sim).unwrap();
        let s2 = sim.state.monsters.get(slow).unwrap().pos;
        // exactly one of the two turns moved the slow monster
        let moves = usize::from(s1 != Coord::new(3, 10)) + usize::from(s2 != s1);
        assert_eq!(moves, 1);
    }

    #[test]
    fn test_dragon_breathes_in_line() {
        let mut fx = Fixture::lit_room();
        fx.state.options.dragon_shot = 1;
        let mut sim = fx.sim();
        let hero = sim.state.hero.pos;
        let id = runner(&mut sim, 'D', hero + Coord::new(0, -4));
        assert_eq!(chase_step(&mut sim, id).unwrap(), AiAction::Breathed);
        assert!(fx.display.saw("flame"));
    }

    #[test]
    fn test_sleeping_monsters_do_not_move() {
        let mut fx = Fixture::lit_room();
        let mut sim = fx.sim();
        let id = sim
            .state
            .monsters
            .insert(Monster::new(Species::parse('K').unwrap(), Coord::new(4, 4)));
        sim.state.monsters.get_mut(id).unwrap().flags.insert(MonsterFlags::ASLEEP);
        run_monsters(&mut sim).unwrap();
        assert_eq!(sim.state.monsters.get(id).unwrap().pos, Coord::new(4, 4));
    }
}
