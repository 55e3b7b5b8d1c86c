//! Scenario tests: zapping, scrolls, polymorph, slime division and drain
//!
//! Each test builds a small level by hand, runs a few operations through
//! the public API and checks what the hero would see.

use rg_core::dungeon::{dir, tile};
use rg_core::magic::{do_zap, drain, hold_monsters, vorpalize, ZapResult};
use rg_core::monster::{new_monster, slime_split, MonsterFlags, MonsterId, Species};
use rg_core::object::{Item, StickKind, WeaponKind};
use rg_core::{Coord, Grid, Sim, SimOptions, SimulationState, Transcript};

// ============================================================================
// Helpers
// ============================================================================

/// One lit room with the hero in the middle
struct World {
    grid: Grid,
    state: SimulationState,
    display: Transcript,
}

impl World {
    fn new(options: SimOptions) -> Self {
        let mut grid = Grid::new(40, 20);
        let room = grid.add_room(Coord::new(1, 1), Coord::new(20, 12), false);
        let mut state = SimulationState::new(777, options);
        state.hero.pos = Coord::new(10, 8);
        state.hero.region = Some(room);
        Self {
            grid,
            state,
            display: Transcript::new(),
        }
    }

    fn sim(&mut self) -> Sim<'_> {
        Sim::new(&mut self.state, &mut self.grid, &mut self.display)
    }
}

fn spawn(sim: &mut Sim<'_>, letter: char, pos: Coord, hp: i32) -> MonsterId {
    let id = new_monster(sim, Species::parse(letter).unwrap(), pos);
    sim.state.monsters.get_mut(id).unwrap().hp = hp;
    id
}

fn wand(sim: &mut Sim<'_>, kind: StickKind, charges: u32) -> Item {
    let mut item = sim.state.sticks.create(kind, &mut sim.state.rng);
    item.charges = charges;
    item
}

// ============================================================================
// Stick dispatcher
// ============================================================================

#[test]
fn slow_monster_undoes_haste() {
    let mut world = World::new(SimOptions::default());
    let mut sim = world.sim();
    let hero = sim.state.hero.pos;
    let id = spawn(&mut sim, 'O', hero + Coord::new(0, -3), 50);
    sim.state.monsters.get_mut(id).unwrap().flags.insert(MonsterFlags::HASTED);
    let mut item = wand(&mut sim, StickKind::SlowMonster, 3);

    let result = do_zap(&mut sim, dir::NORTH, &mut item).unwrap();

    assert_eq!(result, ZapResult::turn(true));
    let m = sim.state.monsters.get(id).unwrap();
    assert!(!m.has(MonsterFlags::HASTED));
    assert!(!m.has(MonsterFlags::SLOWED));
    assert!(m.has(MonsterFlags::RUNNING));
    assert_eq!(item.charges, 2);
}

#[test]
fn empty_polymorph_wand_does_nothing() {
    let mut world = World::new(SimOptions::default());
    let mut sim = world.sim();
    let hero = sim.state.hero.pos;
    let id = spawn(&mut sim, 'O', hero + Coord::new(0, -3), 50);
    let mut item = wand(&mut sim, StickKind::Polymorph, 0);

    do_zap(&mut sim, dir::NORTH, &mut item).unwrap();

    assert_eq!(item.charges, 0);
    assert_eq!(sim.state.monsters.len(), 1);
    assert_eq!(sim.state.monsters.get(id).unwrap().species.letter(), 'O');
    assert_eq!(world.display.last_message(), Some("nothing happens"));
}

#[test]
fn vorpal_blade_zaps_its_enemy_away() {
    let mut world = World::new(SimOptions::default());
    let mut sim = world.sim();
    let hero = sim.state.hero.pos;
    let id = spawn(&mut sim, 'D', hero + Coord::new(4, 0), 10_000);
    let mut sword = Item::vorpal(WeaponKind::LongSword, Species::DRAGON, 1);

    do_zap(&mut sim, dir::EAST, &mut sword).unwrap();

    assert!(sim.state.monsters.get(id).is_none());
    assert!(world.display.saw("the dragon vanishes in a puff of smoke"));
}

#[test]
fn zapping_at_nothing_is_free() {
    let mut world = World::new(SimOptions::default());
    world.state.hero.hp = 1;
    let mut sim = world.sim();
    for kind in [StickKind::TeleportAway, StickKind::Striking, StickKind::DrainLife] {
        let mut item = wand(&mut sim, kind, 2);
        let result = do_zap(&mut sim, dir::SOUTH, &mut item).unwrap();
        assert_eq!(result, ZapResult::NO_TURN, "{kind}");
        assert_eq!(item.charges, 2, "{kind}");
    }
    assert_eq!(world.display.last_message(), Some("you are too weak to use it"));
}

#[test]
fn plain_item_cannot_be_zapped() {
    let mut world = World::new(SimOptions::default());
    let mut sim = world.sim();
    let mut dagger = Item::weapon(WeaponKind::Dagger);
    let result = do_zap(&mut sim, dir::EAST, &mut dagger).unwrap();
    assert!(!result.took_turn);
    assert!(world.display.saw("you can't zap with that!"));
}

// ============================================================================
// Scrolls
// ============================================================================

#[test]
fn held_monsters_stay_put_until_struck() {
    let mut world = World::new(SimOptions::default());
    let mut sim = world.sim();
    let hero = sim.state.hero.pos;
    let id = spawn(&mut sim, 'O', hero + Coord::new(2, 2), 50);
    sim.state.monsters.get_mut(id).unwrap().flags.remove(MonsterFlags::ASLEEP);
    sim.state.monsters.get_mut(id).unwrap().flags.insert(MonsterFlags::RUNNING);

    assert_eq!(hold_monsters(&mut sim), 1);
    let m = sim.state.monsters.get(id).unwrap();
    assert!(m.has(MonsterFlags::HELD));
    assert!(!m.has(MonsterFlags::RUNNING));
}

#[test]
fn second_vorpal_enchantment_destroys_the_weapon() {
    let mut world = World::new(SimOptions::default());
    world.state.hero.weapon = Some(Item::vorpal(WeaponKind::Mace, Species::DRAGON, 1));
    let mut sim = world.sim();
    vorpalize(&mut sim);
    assert!(sim.state.hero.weapon.is_none());
    assert!(world.display.saw("your mace vanishes in a puff of smoke"));
}

// ============================================================================
// Polymorph
// ============================================================================

#[test]
fn polymorph_species_are_uniform() {
    let options = SimOptions {
        throws_affect_mimics: true,
        ..SimOptions::default()
    };
    let mut world = World::new(options);
    let mut sim = world.sim();
    let hero = sim.state.hero.pos;
    let pos = hero + Coord::new(0, -2);
    let id = spawn(&mut sim, 'O', pos, 50);
    sim.state.monsters.get_mut(id).unwrap().pack.push(Item::weapon(WeaponKind::Spear));
    sim.state.hero.set_hold(id);
    let mut item = wand(&mut sim, StickKind::Polymorph, 10_000);

    let mut counts = [0u32; 26];
    for _ in 0..5200 {
        do_zap(&mut sim, dir::NORTH, &mut item).unwrap();
        assert_eq!(sim.state.monsters.len(), 1);
        let m = sim.state.monsters.iter().next().unwrap();
        assert_eq!(m.pos, pos);
        assert_eq!(m.pack.len(), 1);
        counts[m.species.index()] += 1;
    }
    assert_eq!(sim.state.hero.held_by, None);
    // 200 expected per letter
    assert!(counts.iter().all(|&n| (120..=280).contains(&n)), "{counts:?}");
}

// ============================================================================
// Slime division
// ============================================================================

#[test]
fn surrounded_slime_cannot_divide() {
    let mut world = World::new(SimOptions::default());
    let mut sim = world.sim();
    let center = Coord::new(5, 5);
    let slime = spawn(&mut sim, 'S', center, 50);
    for (i, &d) in dir::ALL.iter().enumerate() {
        spawn(&mut sim, if i % 2 == 0 { 'Z' } else { 'K' }, center + d, 50);
    }

    assert_eq!(slime_split(&mut sim, slime).unwrap(), None);
    assert_eq!(sim.state.monsters.len(), 9);
}

#[test]
fn slime_cluster_fills_its_only_gap() {
    let mut world = World::new(SimOptions::default());
    // a corridor of floor four cells long, walled in
    for y in 4..=6 {
        for x in 4..=9 {
            let inside = y == 5 && (5..=8).contains(&x);
            if !inside {
                world.grid.place(Coord::new(x, y), tile::HWALL);
            }
        }
    }
    let mut sim = world.sim();
    let first = spawn(&mut sim, 'S', Coord::new(5, 5), 50);
    spawn(&mut sim, 'S', Coord::new(6, 5), 50);
    spawn(&mut sim, 'S', Coord::new(7, 5), 50);

    let child = slime_split(&mut sim, first).unwrap().unwrap();
    assert_eq!(sim.state.monsters.get(child).unwrap().pos, Coord::new(8, 5));
    assert_eq!(sim.state.monsters.len(), 4);
}

// ============================================================================
// Drain life
// ============================================================================

#[test]
fn drain_splits_half_the_hero() {
    let mut world = World::new(SimOptions::default());
    world.state.hero.hp = 31;
    let mut sim = world.sim();
    let ids: Vec<MonsterId> = (0..3)
        .map(|i| spawn(&mut sim, 'T', Coord::new(3 + i * 2, 3), 100))
        .collect();

    let per = drain(&mut sim).unwrap().unwrap();

    // 31 halves to 15; 15 / 3 + 1
    assert_eq!(sim.state.hero.hp, 15);
    assert_eq!(per, 6);
    for id in ids {
        assert_eq!(sim.state.monsters.get(id).unwrap().hp, 94);
    }
}
